/// Search phrase used when neither a topic nor a keyword is given.
pub const DEFAULT_QUERY: &str = "technology";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    pub topic: String,
    pub keyword: String,
    pub recent_only: bool,
}

impl Query {
    pub fn new(topic: impl Into<String>, keyword: impl Into<String>, recent_only: bool) -> Self {
        Self {
            topic: topic.into(),
            keyword: keyword.into(),
            recent_only,
        }
    }

    pub fn combined(&self) -> String {
        combined_query(&self.topic, &self.keyword)
    }
}

/// Space-joins the non-empty parts, falling back to [`DEFAULT_QUERY`].
pub fn combined_query(topic: &str, keyword: &str) -> String {
    let joined = [topic, keyword]
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() {
        DEFAULT_QUERY.to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_topic_and_keyword() {
        assert_eq!(combined_query("rust language", "tokio"), "rust language tokio");
        assert_eq!(combined_query("", "tokio"), "tokio");
        assert_eq!(combined_query("devops", ""), "devops");
    }

    #[test]
    fn trims_and_defaults() {
        assert_eq!(combined_query("  ", " \t"), DEFAULT_QUERY);
        assert_eq!(combined_query("", ""), "technology");
        assert_eq!(combined_query(" react ", " hooks "), "react hooks");
    }

    #[test]
    fn query_uses_its_fields() {
        let query = Query::new("python", "pandas", true);
        assert_eq!(query.combined(), "python pandas");
    }
}
