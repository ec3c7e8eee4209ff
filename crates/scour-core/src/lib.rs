mod config;
mod error;
mod types;

pub use config::{CacheConfig, EmbeddingConfig, HybridConfig, ScourConfig};
pub use error::ScourError;
pub use types::{SearchResult, UrlContent};

use async_trait::async_trait;

/// Trait for embedding text into vectors.
///
/// Implementations live in `scour-embeddings`; the trait is declared here so
/// downstream crates can depend on the seam without pulling in providers.
#[async_trait]
pub trait Embeddings: Send + Sync {
    /// Embed multiple texts (for batch document embedding).
    async fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, ScourError>;

    /// Embed a single query text.
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, ScourError>;
}

/// Normalize free text into a cache key: lowercased, whitespace-collapsed,
/// trimmed, capped at `max_len` characters.
///
/// All cache tiers key on this form so that `"Foo  Bar"` and `"foo bar"`
/// land on the same entry.
pub fn normalize_key(text: &str, max_len: usize) -> String {
    let collapsed = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    collapsed.chars().take(max_len).collect()
}
