mod bm25;
mod hybrid;
mod similarity;

pub use bm25::{bm25, Bm25};
pub use hybrid::{
    dense_retrieve, hybrid_retrieve, rerank, sparse_retrieve, FusionWeights, HybridResult,
};
pub use similarity::cosine_similarity;

/// Tokenize text for lexical scoring: lowercase, keep word characters and
/// CJK ideographs, split on whitespace.
pub(crate) fn tokenize(input: &str) -> Vec<String> {
    input
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || ('\u{4e00}'..='\u{9fa5}').contains(&c) {
                c
            } else if c.is_whitespace() {
                ' '
            } else {
                // Punctuation and symbols are stripped, not treated as separators.
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split_whitespace()
        .map(|term| term.to_string())
        .collect()
}
