use std::collections::HashMap;

use crate::tokenize;

/// BM25 scorer with corpus statistics precomputed at construction time.
///
/// The scored document does not need to be part of the corpus: inverse
/// document frequency and average length come from the corpus, term
/// frequency and length from the document itself. Term frequency is the
/// relative frequency (count / document token count), and IDF is
/// `ln(N / df)` with no smoothing — a term absent from the corpus
/// contributes nothing.
#[derive(Debug, Clone)]
pub struct Bm25 {
    /// Number of corpus documents containing each term
    doc_freq: HashMap<String, usize>,
    corpus_size: usize,
    avg_doc_len: f64,
    /// Term saturation parameter (default 1.5)
    k1: f64,
    /// Length normalization parameter (default 0.75)
    b: f64,
}

impl Bm25 {
    /// Create a scorer with default parameters (k1=1.5, b=0.75).
    pub fn new<S: AsRef<str>>(corpus: &[S]) -> Self {
        Self::with_params(corpus, 1.5, 0.75)
    }

    /// Create a scorer with custom k1 and b parameters.
    pub fn with_params<S: AsRef<str>>(corpus: &[S], k1: f64, b: f64) -> Self {
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        let mut total_len = 0usize;

        for doc in corpus {
            let tokens = tokenize(doc.as_ref());
            total_len += tokens.len();

            let mut seen: HashMap<&str, ()> = HashMap::new();
            for token in &tokens {
                if seen.insert(token, ()).is_none() {
                    *doc_freq.entry(token.clone()).or_insert(0) += 1;
                }
            }
        }

        let avg_doc_len = if corpus.is_empty() {
            0.0
        } else {
            total_len as f64 / corpus.len() as f64
        };

        Self {
            doc_freq,
            corpus_size: corpus.len(),
            avg_doc_len,
            k1,
            b,
        }
    }

    /// Score `document` against `query` using the corpus statistics.
    pub fn score(&self, query: &str, document: &str) -> f64 {
        if self.corpus_size == 0 || self.avg_doc_len == 0.0 {
            return 0.0;
        }

        let doc_tokens = tokenize(document);
        let doc_len = doc_tokens.len();
        if doc_len == 0 {
            return 0.0;
        }

        let mut term_counts: HashMap<&str, usize> = HashMap::new();
        for token in &doc_tokens {
            *term_counts.entry(token).or_insert(0) += 1;
        }

        let n = self.corpus_size as f64;
        let mut score = 0.0;

        for term in tokenize(query) {
            let count = *term_counts.get(term.as_str()).unwrap_or(&0);
            let df = *self.doc_freq.get(&term).unwrap_or(&0) as f64;
            if count == 0 || df == 0.0 {
                continue;
            }

            // Relative term frequency
            let tf = count as f64 / doc_len as f64;
            let idf = (n / df).ln();

            let numerator = tf * (self.k1 + 1.0);
            let denominator =
                tf + self.k1 * (1.0 - self.b + self.b * doc_len as f64 / self.avg_doc_len);

            score += idf * numerator / denominator;
        }

        score
    }
}

/// One-shot BM25 relevance of `document` to `query` over `corpus`.
pub fn bm25<S: AsRef<str>>(query: &str, document: &str, corpus: &[S]) -> f64 {
    Bm25::new(corpus).score(query, document)
}
