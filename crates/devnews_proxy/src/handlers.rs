use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::Json;
use devnews_engine::{decode_json, redact_api_key, SearchRequest};
use devnews_logging::{news_error, news_info, news_warn};
use serde_json::Value;
use url::form_urlencoded;

use crate::{ProxyError, ProxyState};

/// Search parameters taken from the query string. Nothing is validated.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NewsParams {
    pub keywords: Option<String>,
    pub start_date: Option<String>,
}

impl NewsParams {
    /// Parse a raw query string. A repeated key keeps its first value; unknown keys are ignored.
    pub fn from_query(raw: Option<&str>) -> Self {
        let mut params = Self::default();
        for (name, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            let slot = match name.as_ref() {
                "keywords" => &mut params.keywords,
                "start_date" => &mut params.start_date,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }
}

/// `/api/news` for any method but `OPTIONS`: forward the search upstream and relay its JSON body.
pub async fn news(
    State(state): State<Arc<ProxyState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<Value>, ProxyError> {
    let Some(api_key) = state.api_key.api_key() else {
        let message = state.api_key.missing_message();
        news_error!("{}", message);
        return Err(ProxyError::MissingConfig(message));
    };

    let params = NewsParams::from_query(query.as_deref());
    let request = SearchRequest {
        keywords: params.keywords,
        start_date: params.start_date,
    }
    .normalized();
    let url = state.provider.search_url(&state.upstream, &api_key, &request);
    news_info!("Fetching from {}: {}", state.provider, redact_api_key(&url));

    let output = state.fetcher.get(&url).await.map_err(|err| {
        news_warn!("Upstream request failed: {} ({})", err, err.kind);
        ProxyError::Upstream(err.message)
    })?;
    let body = decode_json(&output.bytes).map_err(|err| {
        news_warn!(
            "Upstream returned status {} with unreadable {} body: {}",
            output.status,
            output.content_type.as_deref().unwrap_or("untyped"),
            err
        );
        ProxyError::Upstream(err.message)
    })?;

    if !output.is_success() {
        news_warn!("Upstream returned status {}; relaying body", output.status);
    }
    Ok(Json(body))
}

/// `OPTIONS /api/news`: CORS preflight.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
