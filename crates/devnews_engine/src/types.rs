use std::fmt;

use serde_json::Value;
use thiserror::Error;

pub type RequestId = u64;

/// Parameters of one news search, as accepted by the proxy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchRequest {
    pub keywords: Option<String>,
    /// `YYYY-MM-DD`; forwarded without validation.
    pub start_date: Option<String>,
}

impl SearchRequest {
    pub fn new(keywords: impl Into<String>, start_date: Option<String>) -> Self {
        Self {
            keywords: Some(keywords.into()),
            start_date,
        }
        .normalized()
    }

    /// Blank values count as absent.
    pub fn normalized(self) -> Self {
        Self {
            keywords: self.keywords.filter(|value| !value.trim().is_empty()),
            start_date: self.start_date.filter(|value| !value.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    SearchCompleted {
        request_id: RequestId,
        result: Result<Value, FetchError>,
    },
}

/// Raw HTTP response, before any status interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub status: u16,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FetchOutput {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "invalid json"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
