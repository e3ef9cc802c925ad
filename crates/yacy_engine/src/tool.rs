use std::sync::Arc;

use yacy_logging::{yacy_debug, yacy_error, yacy_info};

use crate::events::EventReporter;
use crate::extract::{ScraperTextExtractor, TextExtractor};
use crate::fetch::{Fetcher, ReqwestFetcher};
use crate::page::PageFetcher;
use crate::scrape::FetchOrchestrator;
use crate::search::{SearchClient, SearchRequest, YacySearchClient};
use crate::{ConfigError, StatusAction, ToolSettings};

pub const NO_RESULTS_MESSAGE: &str = "Search returned no results";
pub const NO_URLS_MESSAGE: &str = "No URLs provided to scrape";

/// Host-facing entry points: search then scrape, or scrape a given URL list.
#[derive(Clone)]
pub struct YacyTool {
    settings: ToolSettings,
    search: Arc<dyn SearchClient>,
    scraper: FetchOrchestrator,
}

impl YacyTool {
    pub fn new(settings: ToolSettings) -> Self {
        let search = Arc::new(YacySearchClient::new(settings.fetch.clone()));
        let fetcher = Arc::new(ReqwestFetcher::new(settings.fetch.clone()));
        Self::with_components(settings, search, fetcher, Arc::new(ScraperTextExtractor))
    }

    pub fn with_components(
        settings: ToolSettings,
        search: Arc<dyn SearchClient>,
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        let scraper = FetchOrchestrator::new(PageFetcher::new(fetcher, extractor));
        Self {
            settings,
            search,
            scraper,
        }
    }

    /// Searches YaCy for `query` and returns the scraped result pages as one string.
    ///
    /// Only a missing endpoint is returned as an error; search failures (including an
    /// unparsable endpoint) and empty result lists come back as the message text.
    pub async fn yacy_search(
        &self,
        query: &str,
        user_request: &str,
        reporter: &EventReporter,
    ) -> Result<String, ConfigError> {
        if let Err(err) = self.settings.validate() {
            yacy_error!("refusing to search: {}", err);
            reporter.report_status(err.to_string(), true, StatusAction::WebSearch, vec![]);
            return Err(err);
        }

        reporter.report_status(
            format!("Searching YaCy for: {query}"),
            false,
            StatusAction::WebSearch,
            vec![],
        );

        let request = SearchRequest {
            endpoint: self.settings.search_endpoint.clone(),
            query: query.to_string(),
            rows: self.settings.result_count,
        };
        let results = match self.search.search(&request).await {
            Ok(results) => results,
            Err(err) => {
                let error_message = format!("Error during search: {err}");
                yacy_error!("{}", error_message);
                reporter.report_status(
                    error_message.clone(),
                    true,
                    StatusAction::WebSearch,
                    vec![],
                );
                return Ok(error_message);
            }
        };

        if results.is_empty() {
            yacy_info!("no results for {:?}", query);
            reporter.report_status(NO_RESULTS_MESSAGE, true, StatusAction::WebSearch, vec![]);
            return Ok(NO_RESULTS_MESSAGE.to_string());
        }

        let (urls, titles): (Vec<String>, Vec<String>) = results
            .into_iter()
            .map(|result| (result.url, result.title))
            .unzip();
        reporter.report_status(
            format!("Search complete, processing {} results", urls.len()),
            false,
            StatusAction::WebSearch,
            urls.clone(),
        );

        let scraped = self
            .scraper
            .fetch_all(&urls, &titles, self.settings.word_budget, reporter)
            .await;

        reporter.report_status(
            format!("Processed {} search results", urls.len()),
            true,
            StatusAction::WebSearch,
            urls,
        );

        Ok(format!(
            "User query about: {query}\nOriginal request: {user_request}\n\nSearch results:\n{scraped}"
        ))
    }

    /// Scrapes the given URLs and returns the budgeted bundle.
    pub async fn web_scrape(
        &self,
        urls: &[String],
        titles: &[String],
        user_request: &str,
        reporter: &EventReporter,
    ) -> String {
        yacy_debug!("scrape requested for {:?}", user_request);
        if urls.is_empty() {
            reporter.report_status(NO_URLS_MESSAGE, true, StatusAction::WebScrape, vec![]);
            return NO_URLS_MESSAGE.to_string();
        }
        self.scraper
            .fetch_all(urls, titles, self.settings.word_budget, reporter)
            .await
    }
}
