use serde::{Deserialize, Serialize};

/// A single search hit as returned by the upstream search provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub content: String,
    pub url: String,
    pub score: f64,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        url: impl Into<String>,
        score: f64,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            url: url.into(),
            score,
        }
    }
}

/// Fetched page content in both raw and converted form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlContent {
    pub html: String,
    pub markdown: String,
}

impl UrlContent {
    pub fn new(html: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            markdown: markdown.into(),
        }
    }
}
