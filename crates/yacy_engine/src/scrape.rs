use futures_util::future::join_all;
use yacy_logging::yacy_info;

use crate::budget::{per_result_word_cap, truncate_words};
use crate::events::EventReporter;
use crate::page::PageFetcher;
use crate::{FetchOutcome, StatusAction, TITLE_NOT_AVAILABLE};

/// Fans out one page fetch per URL and reduces the outcomes to one text bundle.
#[derive(Clone)]
pub struct FetchOrchestrator {
    pages: PageFetcher,
}

impl FetchOrchestrator {
    pub fn new(pages: PageFetcher) -> Self {
        Self { pages }
    }

    /// Fetches every URL concurrently and returns outcomes in input order.
    ///
    /// `titles` pairs with `urls` by position; missing titles fall back to
    /// [`TITLE_NOT_AVAILABLE`] and surplus titles are ignored.
    pub async fn fetch_outcomes(
        &self,
        urls: &[String],
        titles: &[String],
        reporter: &EventReporter,
    ) -> Vec<FetchOutcome> {
        let tasks = urls.iter().enumerate().map(|(idx, url)| {
            let title = titles
                .get(idx)
                .map(String::as_str)
                .unwrap_or(TITLE_NOT_AVAILABLE);
            self.pages.fetch_and_extract(url, title, reporter)
        });
        join_all(tasks).await
    }

    /// Runs the scrape phase: opening status, concurrent fetches, closing status,
    /// then the budgeted bundle.
    pub async fn fetch_all(
        &self,
        urls: &[String],
        titles: &[String],
        word_budget: usize,
        reporter: &EventReporter,
    ) -> String {
        reporter.report_status(
            format!("Fetching content from {} URLs", urls.len()),
            false,
            StatusAction::WebScrape,
            urls.to_vec(),
        );

        let outcomes = self.fetch_outcomes(urls, titles, reporter).await;
        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        yacy_info!(
            "scraped {} URLs ({} failed), word cap {} per result",
            urls.len(),
            failed,
            per_result_word_cap(word_budget, urls.len())
        );

        reporter.report_status(
            format!("Processed content from {} URLs", urls.len()),
            true,
            StatusAction::WebScrape,
            urls.to_vec(),
        );

        combine_outcomes(&outcomes, word_budget)
    }
}

/// Renders each outcome, truncates it to an even share of `word_budget` and joins
/// the blocks with newlines.
///
/// The share is `word_budget / outcomes.len()` for every block, failures included.
pub fn combine_outcomes(outcomes: &[FetchOutcome], word_budget: usize) -> String {
    let cap = per_result_word_cap(word_budget, outcomes.len());
    outcomes
        .iter()
        .map(|outcome| truncate_words(&outcome.render(), cap))
        .collect::<Vec<_>>()
        .join("\n")
}
