use std::sync::Once;

use chrono::{DateTime, Duration, TimeZone, Utc};
use devnews_core::{update, AppState, Effect, Msg, SearchPhase, StatusLine};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(devnews_logging::initialize_for_tests);
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 9, 30, 0).unwrap()
}

fn with_query(topic: &str, keyword: &str, recent_only: bool) -> AppState {
    let (state, _) = update(AppState::new(), Msg::TopicSelected(topic.to_string()));
    let (state, _) = update(state, Msg::KeywordChanged(keyword.to_string()));
    let (state, _) = update(state, Msg::RecentOnlyToggled(recent_only));
    state
}

fn submit(state: AppState) -> (AppState, Vec<Effect>) {
    update(state, Msg::SearchSubmitted { now: now() })
}

fn complete(state: AppState, request_id: u64, result: Result<Value, String>) -> AppState {
    let (state, effects) = update(
        state,
        Msg::SearchCompleted {
            request_id,
            result,
            now: now(),
        },
    );
    assert!(effects.is_empty());
    state
}

fn newsapi_body(published: &[(&str, Option<String>)]) -> Value {
    let articles: Vec<Value> = published
        .iter()
        .map(|(url, at)| {
            json!({
                "title": format!("Story at {url}"),
                "url": url,
                "publishedAt": at,
                "source": { "name": "Wire" }
            })
        })
        .collect();
    json!({ "status": "ok", "totalResults": articles.len(), "articles": articles })
}

#[test]
fn submit_enters_loading_and_emits_search() {
    init_logging();
    let state = with_query("rust language", "tokio", false);

    let (mut state, effects) = submit(state);
    let view = state.view();

    assert_eq!(view.phase, SearchPhase::Loading);
    assert_eq!(view.status, StatusLine::Loading);
    assert!(view.articles.is_empty());
    assert!(state.consume_dirty());
    assert_eq!(
        effects,
        vec![Effect::Search {
            request_id: 1,
            keywords: "rust language tokio".to_string(),
            start_date: None,
        }]
    );
}

#[test]
fn empty_query_searches_technology() {
    init_logging();
    let (_state, effects) = submit(AppState::new());
    assert_eq!(
        effects,
        vec![Effect::Search {
            request_id: 1,
            keywords: "technology".to_string(),
            start_date: None,
        }]
    );
}

#[test]
fn recent_only_sends_start_date() {
    init_logging();
    let (_state, effects) = submit(with_query("", "wasm", true));
    assert_eq!(
        effects,
        vec![Effect::Search {
            request_id: 1,
            keywords: "wasm".to_string(),
            start_date: Some("2025-03-07".to_string()),
        }]
    );
}

#[test]
fn success_lists_articles() {
    init_logging();
    let (state, _) = submit(with_query("", "rust", false));
    let body = newsapi_body(&[
        ("https://a.example.com", None),
        ("https://b.example.com", Some("2020-01-01T00:00:00Z".to_string())),
    ]);

    let state = complete(state, 1, Ok(body));
    let view = state.view();

    assert_eq!(view.phase, SearchPhase::Success);
    assert_eq!(
        view.status,
        StatusLine::Found {
            count: 2,
            recent_days: None
        }
    );
    assert_eq!(view.articles[0].url, "https://a.example.com");
    assert_eq!(view.articles[1].source_name, "Wire");
    assert_eq!(state.in_flight(), None);
}

#[test]
fn recent_only_filters_by_publish_date() {
    init_logging();
    let (state, _) = submit(with_query("", "rust", true));
    let body = newsapi_body(&[
        ("https://old.example.com", Some((now() - Duration::days(10)).to_rfc3339())),
        ("https://new.example.com", Some((now() - Duration::days(1)).to_rfc3339())),
        ("https://undated.example.com", None),
    ]);

    let view = complete(state, 1, Ok(body)).view();

    let urls: Vec<_> = view.articles.iter().map(|a| a.url.as_str()).collect();
    assert_eq!(urls, vec!["https://new.example.com"]);
    assert_eq!(
        view.status,
        StatusLine::Found {
            count: 1,
            recent_days: Some(3)
        }
    );
}

#[test]
fn recent_only_can_leave_nothing() {
    init_logging();
    let (state, _) = submit(with_query("", "rust", true));
    let body = newsapi_body(&[("https://old.example.com", Some("2001-01-01".to_string()))]);

    let view = complete(state, 1, Ok(body)).view();
    assert_eq!(view.phase, SearchPhase::Success);
    assert_eq!(view.status, StatusLine::Empty);
}

#[test]
fn transport_failure_shows_error() {
    init_logging();
    let (state, _) = submit(with_query("", "rust", false));

    let view = complete(state, 1, Err("Failed to fetch news".to_string())).view();

    assert_eq!(view.phase, SearchPhase::Error);
    assert_eq!(view.status, StatusLine::Error("Failed to fetch news".to_string()));
    assert!(view.articles.is_empty());
}

#[test]
fn error_status_in_body_shows_upstream_message() {
    init_logging();
    let (state, _) = submit(with_query("", "rust", false));
    let body = json!({ "status": "error", "message": "You have made too many requests recently." });

    let view = complete(state, 1, Ok(body)).view();
    assert_eq!(
        view.status,
        StatusLine::Error("You have made too many requests recently.".to_string())
    );
}

#[test]
fn blank_error_message_gets_generic_text() {
    init_logging();
    let (state, _) = submit(with_query("", "rust", false));

    let view = complete(state, 1, Err("  ".to_string())).view();
    assert_eq!(view.status, StatusLine::Error("Something went wrong".to_string()));
}

#[test]
fn resubmit_cancels_superseded_search() {
    init_logging();
    let (state, _) = submit(with_query("", "rust", false));
    let (state, _) = update(state, Msg::KeywordChanged("go".to_string()));

    let (state, effects) = submit(state);

    assert_eq!(state.in_flight(), Some(2));
    assert_eq!(
        effects,
        vec![
            Effect::CancelSearch { request_id: 1 },
            Effect::Search {
                request_id: 2,
                keywords: "go".to_string(),
                start_date: None,
            },
        ]
    );
}

#[test]
fn stale_response_is_ignored() {
    init_logging();
    let (state, _) = submit(with_query("", "rust", false));
    let (mut state, _) = submit(state);
    assert!(state.consume_dirty());

    // The first request resolves after the second was issued.
    let stale = newsapi_body(&[("https://stale.example.com", None)]);
    let mut state = complete(state, 1, Ok(stale));
    assert_eq!(state.phase(), SearchPhase::Loading);
    assert!(!state.consume_dirty());

    let fresh = newsapi_body(&[("https://fresh.example.com", None)]);
    let state = complete(state, 2, Ok(fresh));
    let view = state.view();
    assert_eq!(view.articles.len(), 1);
    assert_eq!(view.articles[0].url, "https://fresh.example.com");

    // Late arrivals after completion are ignored as well.
    let late = newsapi_body(&[("https://late.example.com", None)]);
    let state = complete(state, 1, Ok(late));
    assert_eq!(state.view().articles[0].url, "https://fresh.example.com");
}

#[test]
fn new_submission_clears_previous_results() {
    init_logging();
    let (state, _) = submit(with_query("", "rust", false));
    let state = complete(
        state,
        1,
        Ok(newsapi_body(&[("https://a.example.com", None)])),
    );
    assert_eq!(state.view().articles.len(), 1);

    let (state, _) = submit(state);
    let view = state.view();
    assert_eq!(view.status, StatusLine::Loading);
    assert!(view.articles.is_empty());
}

#[test]
fn repeated_search_renders_identically() {
    init_logging();
    let body = newsapi_body(&[
        ("https://a.example.com", None),
        ("https://b.example.com", None),
    ]);

    let (state, _) = submit(with_query("devops", "rust", false));
    let state = complete(state, 1, Ok(body.clone()));
    let first = state.view();

    let (state, _) = submit(state);
    let state = complete(state, 2, Ok(body));
    let second = state.view();

    assert_eq!(first.articles, second.articles);
    assert_eq!(first.status, second.status);
}

#[test]
fn query_edits_mark_dirty_only_on_change() {
    init_logging();
    let (mut state, _) = update(AppState::new(), Msg::KeywordChanged("rust".to_string()));
    assert!(state.consume_dirty());

    let (mut state, effects) = update(state, Msg::KeywordChanged("rust".to_string()));
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());

    let (mut state, _) = update(state, Msg::RecentOnlyToggled(true));
    assert!(state.consume_dirty());
    assert!(state.query().recent_only);
}
