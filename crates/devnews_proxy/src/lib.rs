//! Dev News Hub proxy: forwards news searches upstream with a server-held API key.
use std::sync::Arc;

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use devnews_engine::ReqwestFetcher;
use devnews_logging::news_info;
use tower_http::set_header::SetResponseHeaderLayer;

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

pub use config::{ApiKeySource, ConfigError, EnvApiKey, ProxyConfig, StaticApiKey};
pub use error::ProxyError;
pub use state::ProxyState;

pub const NEWS_ROUTE: &str = "/api/news";

/// Router serving [`NEWS_ROUTE`], with CORS headers on every response.
pub fn create_app(state: ProxyState) -> Router {
    Router::new()
        .route(
            NEWS_ROUTE,
            get(handlers::news)
                .options(handlers::preflight)
                .fallback(handlers::news),
        )
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .with_state(Arc::new(state))
}

/// Bind `config.addr` and serve until the process is stopped.
pub async fn serve(config: ProxyConfig, api_key: Arc<dyn ApiKeySource>) -> anyhow::Result<()> {
    let fetcher = ReqwestFetcher::new(config.fetch.clone())?;
    let state = ProxyState {
        provider: config.provider,
        upstream: config.upstream.clone(),
        api_key,
        fetcher: Arc::new(fetcher),
    };

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    news_info!(
        "Serving {} on http://{} (provider {})",
        NEWS_ROUTE,
        listener.local_addr()?,
        config.provider
    );
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}
