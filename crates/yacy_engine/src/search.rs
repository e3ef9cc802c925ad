use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use thiserror::Error;
use yacy_logging::{yacy_debug, yacy_warn};

use crate::fetch::{build_client, map_reqwest_error};
use crate::{FetchSettings, SearchResult, TITLE_NOT_AVAILABLE};

/// Characters left bare in the query value: unreserved marks plus `/`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("invalid search endpoint {endpoint:?}: {message}")]
    InvalidEndpoint { endpoint: String, message: String },
    #[error("{0}")]
    Transport(String),
    #[error("search endpoint returned {status}: {message}")]
    HttpStatus { status: u16, message: String },
    #[error("malformed search response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub endpoint: String,
    pub query: String,
    pub rows: usize,
}

impl SearchRequest {
    /// Full request URL with the YaCy `yjson` select parameters appended.
    pub fn to_url(&self) -> Result<url::Url, SearchError> {
        let mut url =
            url::Url::parse(self.endpoint.trim()).map_err(|err| SearchError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                message: err.to_string(),
            })?;
        let params = format!(
            "hl=false&wt=yjson&facet=true&facet.mincount=1&facet.field=url_file_ext_s\
             &start=0&rows={}&query={}",
            self.rows,
            utf8_percent_encode(&self.query, QUERY_VALUE)
        );
        let query = match url.query() {
            Some(existing) if !existing.is_empty() => format!("{existing}&{params}"),
            _ => params,
        };
        url.set_query(Some(&query));
        Ok(url)
    }
}

#[async_trait::async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>, SearchError>;
}

#[derive(Debug, Clone, Default)]
pub struct YacySearchClient {
    settings: FetchSettings,
}

impl YacySearchClient {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl SearchClient for YacySearchClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>, SearchError> {
        let url = request.to_url()?;
        let client = build_client(&self.settings)
            .map_err(|err| SearchError::Transport(err.to_string()))?;

        yacy_debug!("search GET {}", url);
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|err| SearchError::Transport(map_reqwest_error(err).to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::HttpStatus {
                status: status.as_u16(),
                message: status.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| SearchError::Transport(map_reqwest_error(err).to_string()))?;
        let mut results = parse_search_response(&body)?;
        results.truncate(request.rows);
        Ok(results)
    }
}

#[derive(Debug, Deserialize)]
struct YJsonResponse {
    #[serde(default)]
    channels: Vec<YJsonChannel>,
}

#[derive(Debug, Deserialize)]
struct YJsonChannel {
    items: Option<Vec<YJsonItem>>,
}

#[derive(Debug, Deserialize)]
struct YJsonItem {
    link: Option<String>,
    title: Option<String>,
}

/// Maps the first channel's items of a `yjson` body to search results.
///
/// Items without a link are skipped; a missing or blank title becomes
/// [`TITLE_NOT_AVAILABLE`].
pub fn parse_search_response(body: &[u8]) -> Result<Vec<SearchResult>, SearchError> {
    let response: YJsonResponse = serde_json::from_slice(body)
        .map_err(|err| SearchError::MalformedResponse(err.to_string()))?;
    let channel = response
        .channels
        .into_iter()
        .next()
        .ok_or_else(|| SearchError::MalformedResponse("no channels in response".into()))?;
    let items = channel
        .items
        .ok_or_else(|| SearchError::MalformedResponse("channel has no items".into()))?;

    let results = items
        .into_iter()
        .filter_map(|item| {
            let Some(url) = item.link.filter(|link| !link.trim().is_empty()) else {
                yacy_warn!("skipping search item without link (title {:?})", item.title);
                return None;
            };
            let title = item
                .title
                .filter(|title| !title.trim().is_empty())
                .unwrap_or_else(|| TITLE_NOT_AVAILABLE.to_string());
            Some(SearchResult { url, title })
        })
        .collect();
    Ok(results)
}
