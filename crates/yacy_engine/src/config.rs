use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://ya.gudarzi.com/solr/select";
pub const DEFAULT_RESULT_COUNT: usize = 10;
pub const DEFAULT_WORD_BUDGET: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Please set the YaCy search URL!")]
    MissingEndpoint,
}

/// HTTP transport knobs shared by the search client and the page fetcher.
///
/// Timeouts and the body size cap are unset by default, leaving the transport's own
/// behavior in charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    pub redirect_limit: usize,
    pub max_bytes: Option<u64>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            request_timeout: None,
            redirect_limit: 10,
            max_bytes: None,
        }
    }
}

/// Immutable configuration for one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSettings {
    pub search_endpoint: String,
    pub result_count: usize,
    pub word_budget: usize,
    pub fetch: FetchSettings,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            result_count: DEFAULT_RESULT_COUNT,
            word_budget: DEFAULT_WORD_BUDGET,
            fetch: FetchSettings::default(),
        }
    }
}

impl ToolSettings {
    /// Only a blank endpoint is refused here. An unparsable endpoint surfaces as a
    /// search error, and zero counts simply yield empty output.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_endpoint.trim().is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }
        Ok(())
    }
}
