use std::fmt;

use serde::{Serialize, Serializer};

/// Placeholder title used when neither the search result nor the page provides one.
pub const TITLE_NOT_AVAILABLE: &str = "Title not available";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub url: String,
    pub title: String,
}

/// Result of fetching one URL. Exactly one is produced per input URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success {
        title: String,
        url: String,
        text: String,
    },
    Failure {
        url: String,
        error_message: String,
    },
}

impl FetchOutcome {
    pub fn url(&self) -> &str {
        match self {
            FetchOutcome::Success { url, .. } | FetchOutcome::Failure { url, .. } => url,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }

    /// Renders the outcome as the text block handed to the host.
    pub fn render(&self) -> String {
        match self {
            FetchOutcome::Success { title, url, text } => {
                format!("# Title: {title}\n# URL: {url}\n# Content: {text}\n")
            }
            FetchOutcome::Failure { url, error_message } => {
                format!("# Fetch Failed!\n# URL: {url}\n# Error Message: {error_message}\n")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusAction {
    WebSearch,
    WebScrape,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEvent {
    pub done: bool,
    pub action: StatusAction,
    pub description: String,
    pub urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationEvent {
    pub title: String,
    pub url: String,
    pub content: String,
}

// Hosts expect `{"document": [..], "metadata": [{"name", "source", "html"}]}`.
impl Serialize for CitationEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Metadata<'a> {
            name: &'a str,
            source: &'a str,
            html: bool,
        }

        #[derive(Serialize)]
        struct Wire<'a> {
            document: [&'a str; 1],
            metadata: [Metadata<'a>; 1],
        }

        Wire {
            document: [&self.content],
            metadata: [Metadata {
                name: &self.title,
                source: &self.url,
                html: false,
            }],
        }
        .serialize(serializer)
    }
}

/// Event delivered to the host, serialized as `{"type": .., "data": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum HostEvent {
    Status(StatusEvent),
    Citation(CitationEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
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
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
