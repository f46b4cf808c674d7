use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

use crate::SearchRequest;

/// Article language requested from every provider.
pub const LANGUAGE: &str = "en";

const API_KEY_PARAM: &str = "apiKey";

/// External news search services the proxy can forward to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    /// NewsAPI `everything` endpoint; responds with an `articles` array.
    #[default]
    NewsApi,
    /// Currents API `search` endpoint; responds with a `news` array.
    Currents,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown news provider {0:?} (expected \"newsapi\" or \"currents\")")]
pub struct UnknownProvider(pub String);

impl Provider {
    pub fn name(self) -> &'static str {
        match self {
            Provider::NewsApi => "newsapi",
            Provider::Currents => "currents",
        }
    }

    pub fn default_endpoint(self) -> &'static str {
        match self {
            Provider::NewsApi => "https://newsapi.org/v2/everything",
            Provider::Currents => "https://api.currentsapi.services/v1/search",
        }
    }

    pub fn query_param(self) -> &'static str {
        match self {
            Provider::NewsApi => "q",
            Provider::Currents => "keywords",
        }
    }

    pub fn date_param(self) -> &'static str {
        match self {
            Provider::NewsApi => "from",
            Provider::Currents => "start_date",
        }
    }

    /// Page-size parameter and the largest value the provider accepts.
    pub fn page_size(self) -> (&'static str, u32) {
        match self {
            Provider::NewsApi => ("pageSize", 100),
            Provider::Currents => ("page_size", 200),
        }
    }

    /// Upstream search URL for `request`, with values form-encoded.
    pub fn search_url(self, endpoint: &Url, api_key: &str, request: &SearchRequest) -> Url {
        let (page_param, page_size) = self.page_size();
        let mut url = endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("language", LANGUAGE)
                .append_pair(page_param, &page_size.to_string())
                .append_pair(API_KEY_PARAM, api_key);
            if let Some(keywords) = request.keywords.as_deref() {
                pairs.append_pair(self.query_param(), keywords);
            }
            if let Some(start_date) = request.start_date.as_deref() {
                pairs.append_pair(self.date_param(), start_date);
            }
        }
        url
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newsapi" | "news_api" | "newsapi.org" => Ok(Provider::NewsApi),
            "currents" | "currentsapi" => Ok(Provider::Currents),
            _ => Err(UnknownProvider(s.to_string())),
        }
    }
}

/// Render `url` for logs with the API key value masked.
pub fn redact_api_key(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == API_KEY_PARAM {
                "***".to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();
    if !pairs.is_empty() {
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
    }
    redacted.to_string()
}
