use chrono::{DateTime, Utc};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a topic value (empty for all topics).
    TopicSelected(String),
    /// User edited the keyword input.
    KeywordChanged(String),
    /// User flipped the "last N days" toggle.
    RecentOnlyToggled(bool),
    /// User submitted the current query.
    SearchSubmitted { now: DateTime<Utc> },
    /// Proxy answered a search, or the call failed with a displayable message.
    SearchCompleted {
        request_id: crate::RequestId,
        result: Result<Value, String>,
        now: DateTime<Utc>,
    },
}
