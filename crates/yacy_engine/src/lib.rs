//! YaCy search engine tool: search, concurrent page scraping and budgeted text assembly.
mod blocking;
mod budget;
mod config;
mod decode;
mod events;
mod extract;
mod fetch;
mod page;
mod scrape;
mod search;
mod tool;
mod types;

pub use blocking::BlockingTool;
pub use budget::{per_result_word_cap, truncate_words, word_count};
pub use config::{
    ConfigError, FetchSettings, ToolSettings, DEFAULT_RESULT_COUNT, DEFAULT_SEARCH_ENDPOINT,
    DEFAULT_WORD_BUDGET,
};
pub use decode::{decode_html, DecodedHtml};
pub use events::{ChannelSink, EventReporter, EventSink, FnSink, NullSink};
pub use extract::{normalize_whitespace, ExtractedText, ScraperTextExtractor, TextExtractor};
pub use fetch::{Fetcher, ReqwestFetcher};
pub use page::PageFetcher;
pub use scrape::{combine_outcomes, FetchOrchestrator};
pub use search::{parse_search_response, SearchClient, SearchError, SearchRequest, YacySearchClient};
pub use tool::{YacyTool, NO_RESULTS_MESSAGE, NO_URLS_MESSAGE};
pub use types::{
    CitationEvent, FailureKind, FetchError, FetchMetadata, FetchOutcome, FetchOutput, HostEvent,
    SearchResult, StatusAction, StatusEvent, TITLE_NOT_AVAILABLE,
};
