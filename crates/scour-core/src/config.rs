use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Embedding provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub enabled: bool,
    pub host: String,
    pub model: String,
    pub top_k: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "http://localhost:11434".to_string(),
            model: "nomic-embed-text".to_string(),
            top_k: 3,
            chunk_size: 1000,
            chunk_overlap: 100,
        }
    }
}

/// Cache tier settings. `ttl` and `max_size` apply to the combined
/// search/embedding tier and the URL tier alike.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub ttl_secs: u64,
    pub max_size: usize,
    pub search_enabled: bool,
    pub embedding_enabled: bool,
    pub url_enabled: bool,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 300,
            max_size: 1000,
            search_enabled: true,
            embedding_enabled: true,
            url_enabled: true,
        }
    }
}

/// Hybrid fusion weights and the semantic-cache match threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HybridConfig {
    pub sparse_weight: f64,
    pub dense_weight: f64,
    pub similarity_threshold: f64,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            sparse_weight: 0.3,
            dense_weight: 0.7,
            similarity_threshold: 0.95,
        }
    }
}

/// Top-level configuration consumed by `ScourContext`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScourConfig {
    pub embedding: EmbeddingConfig,
    pub cache: CacheConfig,
    pub hybrid: HybridConfig,
}

impl ScourConfig {
    /// Validate cross-field constraints before wiring anything up.
    pub fn validate(&self) -> Result<(), crate::ScourError> {
        if self.embedding.enabled && self.embedding.host.is_empty() {
            return Err(crate::ScourError::Config(
                "embedding host must be set when embedding is enabled".to_string(),
            ));
        }
        if self.embedding.chunk_overlap >= self.embedding.chunk_size {
            return Err(crate::ScourError::Config(
                "chunk_overlap must be smaller than chunk_size".to_string(),
            ));
        }
        if self.cache.max_size == 0 {
            return Err(crate::ScourError::Config(
                "cache max_size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ScourConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_overlap_larger_than_chunk() {
        let mut config = ScourConfig::default();
        config.embedding.chunk_size = 10;
        config.embedding.chunk_overlap = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_deserializes_from_json() {
        let config: ScourConfig = serde_json::from_value(serde_json::json!({
            "embedding": {
                "enabled": false,
                "host": "http://ollama:11434",
                "model": "nomic-embed-text",
                "top_k": 5,
                "chunk_size": 500,
                "chunk_overlap": 50
            },
            "cache": {
                "ttl_secs": 60,
                "max_size": 10,
                "search_enabled": true,
                "embedding_enabled": false,
                "url_enabled": true
            },
            "hybrid": {
                "sparse_weight": 0.4,
                "dense_weight": 0.6,
                "similarity_threshold": 0.9
            }
        }))
        .expect("well-formed config");

        assert!(!config.embedding.enabled);
        assert_eq!(config.embedding.host, "http://ollama:11434");
        assert_eq!(config.cache.ttl(), Duration::from_secs(60));
        assert!((config.hybrid.sparse_weight - 0.4).abs() < 1e-9);
    }

    #[test]
    fn rejects_zero_capacity() {
        let mut config = ScourConfig::default();
        config.cache.max_size = 0;
        assert!(config.validate().is_err());
    }
}
