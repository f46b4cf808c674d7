use std::sync::Arc;
use std::time::Duration;

use devnews_engine::{
    EngineEvent, EngineHandle, FailureKind, FetchSettings, ProxyClient, ReqwestFetcher,
    SearchRequest, FETCH_FAILED,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ProxyClient {
    let endpoint = Url::parse(&format!("{}/api/news", server.uri())).unwrap();
    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    ProxyClient::new(endpoint, Arc::new(fetcher))
}

#[test]
fn search_url_encodes_parameters() {
    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    let client = ProxyClient::new(
        Url::parse("http://localhost:3000/api/news").unwrap(),
        Arc::new(fetcher),
    );

    let url = client.search_url(&SearchRequest::new("c# OR rust", Some("2024-02-01".to_string())));
    assert_eq!(
        url.as_str(),
        "http://localhost:3000/api/news?keywords=c%23+OR+rust&start_date=2024-02-01"
    );

    let url = client.search_url(&SearchRequest::new("  ", None));
    assert_eq!(url.as_str(), "http://localhost:3000/api/news");
}

#[tokio::test]
async fn search_returns_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/news"))
        .and(query_param("keywords", "rust async"))
        .and(query_param_is_missing("start_date"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "articles": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let body = client_for(&server)
        .search(&SearchRequest::new("rust async", None))
        .await
        .unwrap();

    assert_eq!(body, json!({ "status": "ok", "articles": [] }));
}

#[tokio::test]
async fn error_status_prefers_proxy_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/news"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": "error",
            "message": "NEWS_API_TOKEN environment variable is not set"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search(&SearchRequest::new("rust", None))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.message, "NEWS_API_TOKEN environment variable is not set");
}

#[tokio::test]
async fn error_status_without_json_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/news"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search(&SearchRequest::new("rust", None))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(502));
    assert_eq!(err.message, FETCH_FAILED);
}

#[tokio::test]
async fn success_with_invalid_json_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/news"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search(&SearchRequest::new("rust", None))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test(flavor = "multi_thread")]
async fn engine_reports_completion() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/news"))
        .and(query_param("keywords", "go"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok", "news": [] })))
        .mount(&server)
        .await;

    let engine = EngineHandle::new(client_for(&server)).unwrap();
    engine.search(7, SearchRequest::new("go", None));

    let event = tokio::task::spawn_blocking(move || engine.recv_timeout(Duration::from_secs(5)))
        .await
        .unwrap()
        .expect("engine event");

    assert_eq!(
        event,
        EngineEvent::SearchCompleted {
            request_id: 7,
            result: Ok(json!({ "status": "ok", "news": [] })),
        }
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn cancelled_search_emits_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/news"))
        .and(query_param("keywords", "slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(json!({ "status": "ok", "articles": [] })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/news"))
        .and(query_param("keywords", "fast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok", "articles": [] })))
        .mount(&server)
        .await;

    let engine = EngineHandle::new(client_for(&server)).unwrap();
    engine.search(1, SearchRequest::new("slow", None));
    engine.cancel(1);
    engine.search(2, SearchRequest::new("fast", None));

    let events = tokio::task::spawn_blocking(move || {
        let mut events = Vec::new();
        while let Some(event) = engine.recv_timeout(Duration::from_millis(1500)) {
            events.push(event);
        }
        events
    })
    .await
    .unwrap();

    let ids: Vec<_> = events
        .iter()
        .map(|EngineEvent::SearchCompleted { request_id, .. }| *request_id)
        .collect();
    assert_eq!(ids, vec![2]);
}
