use crate::view_model::{AppViewModel, ArticleRowView, StatusLine};
use crate::{Article, Query, RecencyFilter};

pub type RequestId = u64;

const GENERIC_ERROR: &str = "Something went wrong";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    query: Query,
    recency: RecencyFilter,
    phase: SearchPhase,
    articles: Vec<Article>,
    error: Option<String>,
    /// Query of the search whose results are shown (or awaited).
    submitted: Option<Query>,
    last_request_id: RequestId,
    in_flight: Option<RequestId>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recency(recency: RecencyFilter) -> Self {
        Self {
            recency,
            ..Self::default()
        }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn recency(&self) -> RecencyFilter {
        self.recency
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn submitted(&self) -> Option<&Query> {
        self.submitted.as_ref()
    }

    pub fn view(&self) -> AppViewModel {
        let status = match self.phase {
            SearchPhase::Idle => StatusLine::Idle,
            SearchPhase::Loading => StatusLine::Loading,
            SearchPhase::Error => StatusLine::Error(self.error.clone().unwrap_or_default()),
            SearchPhase::Success if self.articles.is_empty() => StatusLine::Empty,
            SearchPhase::Success => StatusLine::Found {
                count: self.articles.len(),
                recent_days: self
                    .submitted
                    .as_ref()
                    .filter(|query| query.recent_only)
                    .map(|_| self.recency.lookback_days),
            },
        };

        AppViewModel {
            topic: self.query.topic.clone(),
            keyword: self.query.keyword.clone(),
            recent_only: self.query.recent_only,
            phase: self.phase,
            status,
            articles: self
                .articles
                .iter()
                .map(|article| ArticleRowView::new(article, &self.query.keyword))
                .collect(),
        }
    }

    /// Returns whether the state changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_topic(&mut self, topic: String) {
        if self.query.topic != topic {
            self.query.topic = topic;
            self.dirty = true;
        }
    }

    pub(crate) fn set_keyword(&mut self, keyword: String) {
        if self.query.keyword != keyword {
            self.query.keyword = keyword;
            self.dirty = true;
        }
    }

    pub(crate) fn set_recent_only(&mut self, recent_only: bool) {
        if self.query.recent_only != recent_only {
            self.query.recent_only = recent_only;
            self.dirty = true;
        }
    }

    /// Enter loading for a fresh request id, clearing prior results.
    pub(crate) fn begin_search(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.in_flight = Some(self.last_request_id);
        self.submitted = Some(self.query.clone());
        self.phase = SearchPhase::Loading;
        self.articles.clear();
        self.error = None;
        self.dirty = true;
        self.last_request_id
    }

    pub(crate) fn finish_success(&mut self, articles: Vec<Article>) {
        self.in_flight = None;
        self.phase = SearchPhase::Success;
        self.articles = articles;
        self.error = None;
        self.dirty = true;
    }

    pub(crate) fn finish_error(&mut self, message: String) {
        self.in_flight = None;
        self.phase = SearchPhase::Error;
        self.articles.clear();
        self.error = Some(if message.trim().is_empty() {
            GENERIC_ERROR.to_string()
        } else {
            message
        });
        self.dirty = true;
    }
}
