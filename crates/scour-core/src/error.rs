use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScourError {
    #[error("embedding error: {0}")]
    Embedding(String),
    #[error("cache error: {0}")]
    Cache(String),
    #[error("retriever error: {0}")]
    Retriever(String),
    #[error("parsing error: {0}")]
    Parsing(String),
    #[error("config error: {0}")]
    Config(String),
}
