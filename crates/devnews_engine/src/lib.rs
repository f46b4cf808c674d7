//! Dev News Hub engine: HTTP fetching, provider requests and background search execution.
mod client;
mod engine;
mod fetch;
mod provider;
mod types;

pub use client::{ProxyClient, FETCH_FAILED};
pub use engine::EngineHandle;
pub use fetch::{decode_json, FetchSettings, Fetcher, ReqwestFetcher};
pub use provider::{redact_api_key, Provider, UnknownProvider, LANGUAGE};
pub use types::{EngineEvent, FailureKind, FetchError, FetchOutput, RequestId, SearchRequest};
