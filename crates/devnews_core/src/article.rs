use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Message used when an error response carries no message of its own.
pub const API_ERROR_FALLBACK: &str = "API error";

/// Provider-independent article shape used for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Article {
    pub title: String,
    pub description: Option<String>,
    /// Unique within one result set.
    pub url: String,
    pub image_url: Option<String>,
    /// Timestamp as the provider sent it.
    pub published_at: Option<String>,
    pub author: Option<String>,
    pub source_name: Option<String>,
}

/// Item of an `articles` array ("everything" style providers).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsApiArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<String>,
    pub author: Option<String>,
    pub source: Option<NewsApiSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct NewsApiSource {
    pub name: Option<String>,
}

/// Item of a `news` array ("latest-news/search" style providers).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct CurrentsArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub published: Option<String>,
    pub author: Option<String>,
}

/// Article list of a successful response, tagged by provider shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderPayload {
    Articles(Vec<NewsApiArticle>),
    News(Vec<CurrentsArticle>),
}

impl ProviderPayload {
    /// Detect the shape by its list field. Items that do not deserialize are skipped.
    pub fn detect(body: &Value) -> Option<Self> {
        if let Some(items) = body.get("articles").and_then(Value::as_array) {
            return Some(Self::Articles(parse_items(items)));
        }
        if let Some(items) = body.get("news").and_then(Value::as_array) {
            return Some(Self::News(parse_items(items)));
        }
        None
    }

    /// Map into [`Article`]s, dropping repeated URLs (first occurrence wins).
    /// Items without a URL are kept as they are.
    pub fn normalize(self) -> Vec<Article> {
        let articles: Vec<Article> = match self {
            Self::Articles(items) => items.into_iter().map(Article::from).collect(),
            Self::News(items) => items.into_iter().map(Article::from).collect(),
        };
        let mut seen = HashSet::new();
        articles
            .into_iter()
            .filter(|article| article.url.is_empty() || seen.insert(article.url.clone()))
            .collect()
    }
}

impl From<NewsApiArticle> for Article {
    fn from(item: NewsApiArticle) -> Self {
        Self {
            title: item.title.unwrap_or_default(),
            description: non_empty(item.description),
            url: item.url.unwrap_or_default(),
            image_url: non_empty(item.url_to_image),
            published_at: non_empty(item.published_at),
            author: non_empty(item.author),
            source_name: non_empty(item.source.and_then(|source| source.name)),
        }
    }
}

impl From<CurrentsArticle> for Article {
    fn from(item: CurrentsArticle) -> Self {
        let author = non_empty(item.author);
        Self {
            title: item.title.unwrap_or_default(),
            description: non_empty(item.description),
            url: item.url.unwrap_or_default(),
            image_url: non_empty(item.image),
            published_at: non_empty(item.published),
            // This shape has no source field; the author stands in for it.
            source_name: author.clone(),
            author,
        }
    }
}

/// Turn a proxy response body into articles, or a displayable error message.
///
/// Anything other than `status: "ok"` is an error; its `message` is preferred.
/// An ok body without a recognized list yields no articles.
pub fn interpret_response(body: &Value) -> Result<Vec<Article>, String> {
    let status = body.get("status").and_then(Value::as_str);
    if status != Some("ok") {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .unwrap_or(API_ERROR_FALLBACK);
        return Err(message.to_string());
    }

    Ok(ProviderPayload::detect(body)
        .map(ProviderPayload::normalize)
        .unwrap_or_default())
}

fn parse_items<T: DeserializeOwned>(items: &[Value]) -> Vec<T> {
    items
        .iter()
        .filter_map(|item| T::deserialize(item).ok())
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
