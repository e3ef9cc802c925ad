use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yacy_engine::{
    BlockingTool, ChannelSink, ConfigError, EventReporter, EventSink, FailureKind, FetchError,
    FetchMetadata, FetchOutput, Fetcher, HostEvent, ScraperTextExtractor, SearchClient,
    SearchError, SearchRequest, SearchResult, StatusAction, StatusEvent, ToolSettings, YacyTool,
    NO_RESULTS_MESSAGE, NO_URLS_MESSAGE,
};

#[derive(Default, Clone)]
struct RecordingSink {
    events: Arc<Mutex<Vec<HostEvent>>>,
}

impl RecordingSink {
    fn take(&self) -> Vec<HostEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: HostEvent) {
        self.events.lock().unwrap().push(event);
    }
}

struct FixedSearch(Result<Vec<SearchResult>, SearchError>);

#[async_trait::async_trait]
impl SearchClient for FixedSearch {
    async fn search(&self, _request: &SearchRequest) -> Result<Vec<SearchResult>, SearchError> {
        self.0.clone()
    }
}

/// Serves canned bodies by URL and counts calls.
#[derive(Default)]
struct FakeFetcher {
    pages: HashMap<String, String>,
    calls: AtomicUsize,
}

impl FakeFetcher {
    fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }
}

#[async_trait::async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let html = self
            .pages
            .get(url)
            .ok_or_else(|| FetchError::new(FailureKind::HttpStatus(404), "404 Not Found"))?;
        Ok(FetchOutput {
            bytes: html.as_bytes().to_vec(),
            metadata: FetchMetadata {
                original_url: url.to_string(),
                final_url: url.to_string(),
                status: 200,
                content_type: Some("text/html; charset=utf-8".into()),
                byte_len: html.len() as u64,
            },
        })
    }
}

fn tool_with(
    settings: ToolSettings,
    search: Result<Vec<SearchResult>, SearchError>,
    fetcher: Arc<FakeFetcher>,
) -> YacyTool {
    YacyTool::with_components(
        settings,
        Arc::new(FixedSearch(search)),
        fetcher,
        Arc::new(ScraperTextExtractor),
    )
}

fn reporter() -> (EventReporter, RecordingSink) {
    yacy_logging::initialize_for_tests();
    let sink = RecordingSink::default();
    (EventReporter::new(Arc::new(sink.clone())), sink)
}

fn statuses(events: &[HostEvent]) -> Vec<StatusEvent> {
    events
        .iter()
        .filter_map(|event| match event {
            HostEvent::Status(status) => Some(status.clone()),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn end_to_end_single_result() {
    let settings = ToolSettings {
        result_count: 1,
        word_budget: 10,
        ..ToolSettings::default()
    };
    let fetcher = Arc::new(
        FakeFetcher::default().with_page("http://a.test", "<html><body>Hello World</body></html>"),
    );
    let tool = tool_with(
        settings,
        Ok(vec![SearchResult {
            url: "http://a.test".into(),
            title: "A".into(),
        }]),
        fetcher,
    );
    let (reporter, sink) = reporter();

    let result = tool
        .yacy_search("test", "what is a test?", &reporter)
        .await
        .expect("configured");

    assert_eq!(
        result,
        "User query about: test\nOriginal request: what is a test?\n\nSearch results:\n\
         # Title: A # URL: http://a.test # Content: Hello World"
    );

    let events = sink.take();
    assert!(events.contains(&HostEvent::Citation(yacy_engine::CitationEvent {
        title: "A".into(),
        url: "http://a.test".into(),
        content: "Hello World".into(),
    })));
    let descriptions: Vec<(String, bool)> = statuses(&events)
        .into_iter()
        .map(|s| (s.description, s.done))
        .collect();
    assert_eq!(
        descriptions,
        vec![
            ("Searching YaCy for: test".to_string(), false),
            ("Search complete, processing 1 results".to_string(), false),
            ("Fetching content from 1 URLs".to_string(), false),
            ("Processed content from 1 URLs".to_string(), true),
            ("Processed 1 search results".to_string(), true),
        ]
    );
    assert_eq!(
        statuses(&events).last().unwrap(),
        &StatusEvent {
            done: true,
            action: StatusAction::WebSearch,
            description: "Processed 1 search results".into(),
            urls: vec!["http://a.test".into()],
        }
    );
}

#[tokio::test]
async fn empty_results_short_circuit_without_fetching() {
    let fetcher = Arc::new(FakeFetcher::default());
    let tool = tool_with(ToolSettings::default(), Ok(vec![]), fetcher.clone());
    let (reporter, sink) = reporter();

    let result = tool.yacy_search("nothing", "req", &reporter).await.unwrap();

    assert_eq!(result, NO_RESULTS_MESSAGE);
    assert_eq!(result, "Search returned no results");
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    let last = statuses(&sink.take()).pop().unwrap();
    assert!(last.done);
    assert!(last.urls.is_empty());
}

#[tokio::test]
async fn missing_endpoint_is_fatal_with_one_terminal_status() {
    let settings = ToolSettings {
        search_endpoint: String::new(),
        ..ToolSettings::default()
    };
    let fetcher = Arc::new(FakeFetcher::default());
    let tool = tool_with(settings, Ok(vec![]), fetcher.clone());
    let (reporter, sink) = reporter();

    let err = tool.yacy_search("q", "req", &reporter).await.unwrap_err();

    assert_eq!(err, ConfigError::MissingEndpoint);
    assert_eq!(
        sink.take(),
        vec![HostEvent::Status(StatusEvent {
            done: true,
            action: StatusAction::WebSearch,
            description: "Please set the YaCy search URL!".into(),
            urls: vec![],
        })]
    );
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn relative_endpoint_is_reported_as_search_error() {
    let tool = YacyTool::new(ToolSettings {
        search_endpoint: "solr/select".into(),
        ..ToolSettings::default()
    });
    let (reporter, sink) = reporter();

    let result = tool.yacy_search("q", "req", &reporter).await.unwrap();

    let expected = "Error during search: invalid search endpoint \"solr/select\": relative URL without a base";
    assert_eq!(result, expected);
    assert_eq!(
        statuses(&sink.take()),
        vec![
            StatusEvent {
                done: false,
                action: StatusAction::WebSearch,
                description: "Searching YaCy for: q".into(),
                urls: vec![],
            },
            StatusEvent {
                done: true,
                action: StatusAction::WebSearch,
                description: expected.into(),
                urls: vec![],
            },
        ]
    );
}

#[tokio::test]
async fn zero_result_count_yields_no_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/solr/select"))
        .and(query_param("rows", "0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"channels": [{"items": []}]})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let tool = YacyTool::new(ToolSettings {
        search_endpoint: format!("{}/solr/select", server.uri()),
        result_count: 0,
        ..ToolSettings::default()
    });
    let (reporter, _sink) = reporter();

    let result = tool.yacy_search("q", "req", &reporter).await.unwrap();

    assert_eq!(result, NO_RESULTS_MESSAGE);
}

#[tokio::test]
async fn search_failure_is_returned_as_text() {
    let fetcher = Arc::new(FakeFetcher::default());
    let tool = tool_with(
        ToolSettings::default(),
        Err(SearchError::Transport("connection refused".into())),
        fetcher,
    );
    let (reporter, sink) = reporter();

    let result = tool.yacy_search("q", "req", &reporter).await.unwrap();

    assert_eq!(result, "Error during search: connection refused");
    let last = statuses(&sink.take()).pop().unwrap();
    assert_eq!(
        last,
        StatusEvent {
            done: true,
            action: StatusAction::WebSearch,
            description: "Error during search: connection refused".into(),
            urls: vec![],
        }
    );
}

#[tokio::test]
async fn partial_failures_still_produce_a_bundle() {
    let fetcher = Arc::new(
        FakeFetcher::default()
            .with_page("http://a.test", "<p>alpha</p>")
            .with_page("http://c.test", "<p>gamma</p>"),
    );
    let results = ["a", "b", "c"]
        .iter()
        .map(|name| SearchResult {
            url: format!("http://{name}.test"),
            title: name.to_uppercase(),
        })
        .collect();
    let tool = tool_with(ToolSettings::default(), Ok(results), fetcher.clone());
    let (reporter, _sink) = reporter();

    let result = tool.yacy_search("q", "req", &reporter).await.unwrap();
    let (_, bundle) = result.split_once("Search results:\n").unwrap();
    let blocks: Vec<&str> = bundle.split('\n').collect();

    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 3);
    assert_eq!(blocks[0], "# Title: A # URL: http://a.test # Content: alpha");
    assert!(blocks[1].starts_with("# Fetch Failed! # URL: http://b.test"));
    assert_eq!(blocks[2], "# Title: C # URL: http://c.test # Content: gamma");
}

#[tokio::test]
async fn web_scrape_without_urls_returns_message() {
    let tool = tool_with(ToolSettings::default(), Ok(vec![]), Arc::new(FakeFetcher::default()));
    let (reporter, sink) = reporter();

    let result = tool.web_scrape(&[], &[], "req", &reporter).await;

    assert_eq!(result, NO_URLS_MESSAGE);
    let events = statuses(&sink.take());
    assert_eq!(events.len(), 1);
    assert!(events[0].done);
}

#[test]
fn blocking_tool_runs_against_mock_endpoint() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/solr/select"))
            .and(query_param("query", "test"))
            .and(query_param("rows", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "channels": [{"items": [
                    {"link": format!("{}/page", server.uri()), "title": "A"}
                ]}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                "<html><body>Hello World</body></html>",
                "text/html",
            ))
            .mount(&server)
            .await;
        server
    });

    let settings = ToolSettings {
        search_endpoint: format!("{}/solr/select", server.uri()),
        result_count: 1,
        word_budget: 10,
        ..ToolSettings::default()
    };
    let tool = BlockingTool::new(settings).unwrap();
    let (tx, rx) = mpsc::channel();

    let result = tool
        .yacy_search("test", "req", Some(Arc::new(ChannelSink::new(tx))))
        .unwrap();

    let page = format!("{}/page", server.uri());
    assert!(result.ends_with(&format!("# Title: A # URL: {page} # Content: Hello World")));
    let last_status = rx
        .try_iter()
        .filter_map(|event| match event {
            HostEvent::Status(status) => Some(status),
            _ => None,
        })
        .last()
        .unwrap();
    assert!(last_status.done);
    assert_eq!(last_status.urls, vec![page]);
}
