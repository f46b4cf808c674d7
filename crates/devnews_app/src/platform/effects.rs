use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use devnews_core::{Effect, Msg};
use devnews_engine::{EngineEvent, EngineHandle, SearchRequest};
use devnews_logging::{news_debug, news_info};

use super::app::AppEvent;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Hands core effects to the engine and feeds its completions back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, event_tx: mpsc::Sender<AppEvent>) -> Self {
        let runner = Self { engine };
        runner.spawn_event_loop(event_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Search {
                    request_id,
                    keywords,
                    start_date,
                } => {
                    news_info!(
                        "Search request_id={} keywords={:?} start_date={:?}",
                        request_id,
                        keywords,
                        start_date
                    );
                    self.engine
                        .search(request_id, SearchRequest::new(keywords, start_date));
                }
                Effect::CancelSearch { request_id } => {
                    news_debug!("Cancel request_id={}", request_id);
                    self.engine.cancel(request_id);
                }
            }
        }
    }

    fn spawn_event_loop(&self, event_tx: mpsc::Sender<AppEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.recv_timeout(POLL_INTERVAL) {
                let msg = completion_msg(event, Utc::now());
                if event_tx.send(AppEvent::Core(msg)).is_err() {
                    break;
                }
            }
        });
    }
}

fn completion_msg(event: EngineEvent, now: DateTime<Utc>) -> Msg {
    match event {
        EngineEvent::SearchCompleted { request_id, result } => Msg::SearchCompleted {
            request_id,
            result: result.map_err(|err| err.message),
            now,
        },
    }
}
