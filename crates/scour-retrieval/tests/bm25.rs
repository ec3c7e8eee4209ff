use scour_retrieval::{bm25, Bm25};

fn corpus() -> Vec<String> {
    vec![
        "the rust tokio runtime".to_string(),
        "the python framework".to_string(),
        "the java library".to_string(),
    ]
}

#[test]
fn bm25_zero_when_no_query_token_in_document() {
    let docs = corpus();
    assert_eq!(bm25("javascript", &docs[0], &docs), 0.0);
}

#[test]
fn bm25_non_negative_on_overlap() {
    let docs = corpus();
    assert!(bm25("rust runtime", &docs[0], &docs) >= 0.0);
}

#[test]
fn bm25_prefers_rare_terms() {
    // "tokio" appears in one corpus doc, "the" in all three.
    // The rare term should contribute more than the common one.
    let docs = corpus();
    let rare = bm25("tokio", &docs[0], &docs);
    let common = bm25("the", &docs[0], &docs);
    assert!(rare > common);
    // ln(3/3) = 0: a term present everywhere scores nothing.
    assert_eq!(common, 0.0);
}

#[test]
fn bm25_single_doc_corpus_has_zero_idf() {
    let docs = vec!["capital of france".to_string()];
    assert_eq!(bm25("capital of france", &docs[0], &docs), 0.0);
}

#[test]
fn bm25_repeated_terms_score_higher() {
    let docs = vec![
        "rust rust rust async".to_string(),
        "rust programming".to_string(),
        "python scripting".to_string(),
    ];
    let scorer = Bm25::new(&docs);
    assert!(scorer.score("rust", &docs[0]) > scorer.score("rust", &docs[1]));
}

#[test]
fn bm25_empty_corpus_scores_zero() {
    let docs: Vec<String> = vec![];
    assert_eq!(bm25("rust", "rust runtime", &docs), 0.0);
}

#[test]
fn bm25_empty_document_scores_zero() {
    let docs = corpus();
    assert_eq!(bm25("rust", "", &docs), 0.0);
}

#[test]
fn bm25_scored_document_need_not_be_in_corpus() {
    let docs = corpus();
    let score = bm25("tokio runtime", "tokio is an async runtime", &docs);
    assert!(score > 0.0);
}

#[test]
fn bm25_custom_params() {
    let docs = corpus();
    let default = Bm25::new(&docs).score("tokio", &docs[0]);
    let heavy_tf = Bm25::with_params(&docs, 2.0, 0.5).score("tokio", &docs[0]);
    assert!(default > 0.0);
    assert!(heavy_tf > 0.0);
}
