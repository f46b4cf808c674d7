#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Call the proxy with the combined query.
    Search {
        request_id: crate::RequestId,
        keywords: String,
        start_date: Option<String>,
    },
    /// Abort the transfer of a search that a newer submission superseded.
    CancelSearch { request_id: crate::RequestId },
}
