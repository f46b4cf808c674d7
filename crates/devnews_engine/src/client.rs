use std::sync::Arc;

use serde_json::Value;
use url::Url;

use crate::fetch::{decode_json, Fetcher};
use crate::{FailureKind, FetchError, SearchRequest};

/// Message used when the proxy fails without explaining why.
pub const FETCH_FAILED: &str = "Failed to fetch news";

/// Client side of the news proxy (`GET /api/news`).
#[derive(Clone)]
pub struct ProxyClient {
    endpoint: Url,
    fetcher: Arc<dyn Fetcher>,
}

impl ProxyClient {
    pub fn new(endpoint: Url, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { endpoint, fetcher }
    }

    pub fn search_url(&self, request: &SearchRequest) -> Url {
        let pairs: Vec<(&str, &str)> = [
            ("keywords", request.keywords.as_deref()),
            ("start_date", request.start_date.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name, value)))
        .collect();

        let mut url = self.endpoint.clone();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        url
    }

    /// Run a search and return the proxy's JSON body.
    ///
    /// A non-2xx status is an error carrying the body's `message` when there is one.
    pub async fn search(&self, request: &SearchRequest) -> Result<Value, FetchError> {
        let url = self.search_url(request);
        let output = self.fetcher.get(&url).await?;

        if !output.is_success() {
            let message = decode_json(&output.bytes)
                .ok()
                .and_then(|body| {
                    body.get("message")
                        .and_then(Value::as_str)
                        .map(str::trim)
                        .filter(|message| !message.is_empty())
                        .map(ToOwned::to_owned)
                })
                .unwrap_or_else(|| FETCH_FAILED.to_string());
            return Err(FetchError::new(FailureKind::HttpStatus(output.status), message));
        }

        decode_json(&output.bytes)
    }
}
