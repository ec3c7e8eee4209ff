//! Scour — multi-tier caching and hybrid retrieval for search-and-fetch
//! pipelines.
//!
//! This crate re-exports the Scour sub-crates for convenient single-import
//! usage and provides [`ScourContext`], the wired-up entry point that owns
//! one instance of every cache and tracker.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use scour::core::{ScourConfig, SearchResult};
//! use scour::ScourContext;
//!
//! let ctx = ScourContext::new(ScourConfig::default())?;
//! if let Some(cached) = ctx.find_similar_results("capital of france").await {
//!     return Ok(cached);
//! }
//! ```

/// Shared types, configuration and the `Embeddings` trait.
pub use scour_core as core;

/// Embedding providers (Ollama, Fake) and the degrading `EmbeddingService`.
pub use scour_embeddings as embeddings;

/// BM25, cosine similarity and sparse/dense/hybrid reranking.
pub use scour_retrieval as retrieval;

/// Caching tiers: TTL caches, semantic cache, query/link dedup.
pub use scour_cache as cache;

/// Per-session rolling history, cache hints and the background sweep.
pub use scour_session as session;

mod context;

pub use context::ScourContext;
