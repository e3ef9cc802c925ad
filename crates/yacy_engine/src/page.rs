use std::sync::Arc;

use yacy_logging::{yacy_debug, yacy_warn};

use crate::decode::decode_html;
use crate::events::EventReporter;
use crate::extract::TextExtractor;
use crate::fetch::Fetcher;
use crate::{FetchOutcome, StatusAction, TITLE_NOT_AVAILABLE};

/// Fetches one page and reduces it to plain text.
///
/// Failures never escape: they come back as [`FetchOutcome::Failure`] after a
/// non-terminal status naming the URL.
#[derive(Clone)]
pub struct PageFetcher {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn TextExtractor>,
}

impl PageFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher>, extractor: Arc<dyn TextExtractor>) -> Self {
        Self { fetcher, extractor }
    }

    pub async fn fetch_and_extract(
        &self,
        url: &str,
        fallback_title: &str,
        reporter: &EventReporter,
    ) -> FetchOutcome {
        let output = match self.fetcher.fetch(url).await {
            Ok(output) => output,
            Err(err) => {
                let error_message = format!("Error fetching URL {url}: {err}");
                yacy_warn!("{}", error_message);
                reporter.report_status(
                    error_message.clone(),
                    false,
                    StatusAction::WebScrape,
                    vec![url.to_string()],
                );
                return FetchOutcome::Failure {
                    url: url.to_string(),
                    error_message,
                };
            }
        };

        let decoded = decode_html(&output.bytes, output.metadata.content_type.as_deref());
        if decoded.had_errors {
            yacy_warn!(
                "lossy {} decode for {} ({} bytes)",
                decoded.encoding_label,
                url,
                output.metadata.byte_len
            );
        }

        let extracted = self.extractor.extract(&decoded.html);
        let title = if fallback_title == TITLE_NOT_AVAILABLE {
            extracted
                .title
                .unwrap_or_else(|| TITLE_NOT_AVAILABLE.to_string())
        } else {
            fallback_title.to_string()
        };

        yacy_debug!(
            "extracted {} chars from {} (HTTP {}, final url {})",
            extracted.text.len(),
            output.metadata.original_url,
            output.metadata.status,
            output.metadata.final_url
        );
        reporter.report_citation(&title, url, &extracted.text);

        FetchOutcome::Success {
            title,
            url: url.to_string(),
            text: extracted.text,
        }
    }
}
