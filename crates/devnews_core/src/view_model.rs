use crate::{highlight, Article, SearchPhase, Segment};

/// Shown when an article names no source.
pub const UNKNOWN_SOURCE: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub topic: String,
    pub keyword: String,
    pub recent_only: bool,
    pub phase: SearchPhase,
    pub status: StatusLine,
    pub articles: Vec<ArticleRowView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusLine {
    /// Nothing searched yet.
    #[default]
    Idle,
    Loading,
    Error(String),
    /// `recent_days` is set when the shown results were filtered by recency.
    Found {
        count: usize,
        recent_days: Option<i64>,
    },
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRowView {
    pub url: String,
    pub title: Vec<Segment>,
    pub description: Option<Vec<Segment>>,
    pub image_url: Option<String>,
    pub source_name: String,
    pub author: Option<String>,
    pub published_at: Option<String>,
}

impl ArticleRowView {
    /// Build a row, highlighting `term` in the title and description.
    pub fn new(article: &Article, term: &str) -> Self {
        Self {
            url: article.url.clone(),
            title: highlight(&article.title, term),
            description: article
                .description
                .as_deref()
                .map(|description| highlight(description, term)),
            image_url: article.image_url.clone(),
            source_name: article
                .source_name
                .clone()
                .unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
            author: article.author.clone(),
            published_at: article.published_at.clone(),
        }
    }
}
