//! Dev News Hub core: pure search state machine, normalization and view-model helpers.
mod article;
mod effect;
mod highlight;
mod msg;
mod query;
mod recency;
mod state;
mod topic;
mod update;
mod view_model;

pub use article::{
    interpret_response, Article, CurrentsArticle, NewsApiArticle, NewsApiSource, ProviderPayload,
    API_ERROR_FALLBACK,
};
pub use effect::Effect;
pub use highlight::{highlight, Segment};
pub use msg::Msg;
pub use query::{combined_query, Query, DEFAULT_QUERY};
pub use recency::{parse_published, CutoffBoundary, RecencyFilter, DEFAULT_LOOKBACK_DAYS};
pub use state::{AppState, RequestId, SearchPhase};
pub use topic::{find_topic, Topic, TOPICS};
pub use update::update;
pub use view_model::{AppViewModel, ArticleRowView, StatusLine, UNKNOWN_SOURCE};
