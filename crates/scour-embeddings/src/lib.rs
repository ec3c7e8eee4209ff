mod backend;
mod chunk;
mod fake;
mod ollama;
mod service;

pub use backend::{FakeBackend, HttpBackend, ProviderBackend, ProviderRequest, ProviderResponse};
pub use chunk::chunk_text;
pub use fake::FakeEmbeddings;
pub use ollama::{OllamaEmbeddings, OllamaEmbeddingsConfig};
pub use service::{EmbeddingCache, EmbeddingService};

// Re-export the Embeddings trait from core (forward-declared there).
pub use scour_core::Embeddings;
