use std::collections::HashMap;

use futures::future::join_all;
use scour_core::SearchResult;
use scour_embeddings::EmbeddingService;

use crate::bm25::Bm25;
use crate::similarity::cosine_similarity;

/// Weights applied when fusing sparse (lexical) and dense (vector) scores.
#[derive(Debug, Clone, Copy)]
pub struct FusionWeights {
    pub sparse: f64,
    pub dense: f64,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            sparse: 0.3,
            dense: 0.7,
        }
    }
}

/// A reranked search hit. `result.score` carries the fused score; the
/// per-channel scores are kept alongside for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct HybridResult {
    pub result: SearchResult,
    pub sparse_score: f64,
    pub dense_score: f64,
    pub hybrid_score: f64,
}

/// Rank `documents` by BM25 against `query`, descending. Returns
/// `(document index, score)` pairs for the top `top_k`.
pub fn sparse_retrieve(
    query: &str,
    documents: &[SearchResult],
    top_k: usize,
) -> Vec<(usize, f64)> {
    let contents: Vec<&str> = documents.iter().map(|d| d.content.as_str()).collect();
    let scorer = Bm25::new(&contents);

    let mut scored: Vec<(usize, f64)> = documents
        .iter()
        .enumerate()
        .map(|(idx, doc)| (idx, scorer.score(query, &doc.content)))
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(top_k);
    scored
}

/// Rank `documents` by cosine similarity between the query embedding and
/// each document's content embedding, descending.
///
/// If the query embedding is empty (provider disabled or failed), every
/// document scores 0 and the full set is returned unranked.
pub async fn dense_retrieve(
    query: &str,
    documents: &[SearchResult],
    top_k: usize,
    embedder: &EmbeddingService,
) -> Vec<(usize, f64)> {
    let query_embedding = embedder.embed(query).await;
    if query_embedding.is_empty() {
        return documents.iter().enumerate().map(|(idx, _)| (idx, 0.0)).collect();
    }

    let doc_embeddings =
        join_all(documents.iter().map(|doc| embedder.embed(&doc.content))).await;

    let mut scored: Vec<(usize, f64)> = doc_embeddings
        .iter()
        .enumerate()
        .map(|(idx, embedding)| {
            (idx, cosine_similarity(&query_embedding, embedding) as f64)
        })
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(top_k);
    scored
}

/// Fuse sparse and dense rankings into a single top-`top_k` list.
///
/// Each channel retrieves `min(2 * top_k, N)` candidates; the union is
/// scored as `sparse_weight * sparse + dense_weight * dense` with a missing
/// channel contributing 0.
pub async fn hybrid_retrieve(
    query: &str,
    documents: &[SearchResult],
    top_k: usize,
    weights: FusionWeights,
    embedder: &EmbeddingService,
) -> Vec<HybridResult> {
    let retrieve_count = (top_k * 2).min(documents.len());

    let sparse = sparse_retrieve(query, documents, retrieve_count);
    let dense = dense_retrieve(query, documents, retrieve_count, embedder).await;

    let sparse_scores: HashMap<usize, f64> = sparse.iter().copied().collect();
    let dense_scores: HashMap<usize, f64> = dense.iter().copied().collect();

    // Union of candidate indices, in ascending order so fusion is stable.
    let mut candidates: Vec<usize> = sparse_scores
        .keys()
        .chain(dense_scores.keys())
        .copied()
        .collect();
    candidates.sort_unstable();
    candidates.dedup();

    let mut fused: Vec<HybridResult> = candidates
        .into_iter()
        .map(|idx| {
            let sparse_score = sparse_scores.get(&idx).copied().unwrap_or(0.0);
            let dense_score = dense_scores.get(&idx).copied().unwrap_or(0.0);
            let hybrid_score = weights.sparse * sparse_score + weights.dense * dense_score;

            let mut result = documents[idx].clone();
            result.score = hybrid_score;

            HybridResult {
                result,
                sparse_score,
                dense_score,
                hybrid_score,
            }
        })
        .collect();

    fused.sort_by(|a, b| {
        b.hybrid_score
            .partial_cmp(&a.hybrid_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    fused.truncate(top_k);
    fused
}

/// Rerank entry point for the retrieval pipeline.
///
/// Pass-through (sparse score 0, dense and hybrid equal to the original
/// score, order unchanged) when embedding is disabled or the candidate set
/// already fits in `top_k`. Otherwise fuse lexical and vector rankings, or
/// rank by vector similarity alone when `use_hybrid` is false.
pub async fn rerank(
    query: &str,
    results: Vec<SearchResult>,
    top_k: usize,
    weights: FusionWeights,
    use_hybrid: bool,
    embedder: &EmbeddingService,
) -> Vec<HybridResult> {
    if !embedder.is_enabled() || results.len() <= top_k {
        return results
            .into_iter()
            .map(|result| {
                let score = result.score;
                HybridResult {
                    result,
                    sparse_score: 0.0,
                    dense_score: score,
                    hybrid_score: score,
                }
            })
            .collect();
    }

    if !use_hybrid {
        let dense = dense_retrieve(query, &results, top_k, embedder).await;
        return dense
            .into_iter()
            .map(|(idx, dense_score)| {
                let mut result = results[idx].clone();
                result.score = dense_score;
                HybridResult {
                    result,
                    sparse_score: 0.0,
                    dense_score,
                    hybrid_score: dense_score,
                }
            })
            .collect();
    }

    hybrid_retrieve(query, &results, top_k, weights, embedder).await
}
