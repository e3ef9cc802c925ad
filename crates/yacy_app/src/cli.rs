use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(
    name = "yacy_search",
    version,
    about = "Search a YaCy instance and scrape the result pages into one text bundle."
)]
pub struct Cli {
    /// RON settings file. Defaults to ./yacy_search.ron when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// YaCy select endpoint, e.g. https://host/solr/select.
    #[arg(long, global = true, env = "YACY_URL")]
    pub endpoint: Option<String>,

    /// Number of search results to retrieve.
    #[arg(long, global = true, env = "PAGES_NO")]
    pub results: Option<usize>,

    /// Total word budget shared evenly by the scraped pages.
    #[arg(long, global = true, env = "PAGE_CONTENT_WORDS_LIMIT")]
    pub word_budget: Option<usize>,

    /// Per-request timeout in seconds. Unset means no timeout.
    #[arg(long, global = true, env = "YACY_REQUEST_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Print host events as JSON lines on stderr.
    #[arg(long, global = true)]
    pub events: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogDestination::Terminal)]
    pub log: LogDestination,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search YaCy and scrape every result page.
    Search {
        query: String,
        /// The user's original request. Defaults to the query.
        #[arg(long)]
        request: Option<String>,
    },
    /// Scrape the given URLs without searching.
    Scrape {
        #[arg(required = true)]
        urls: Vec<String>,
        /// Title for the URL at the same position; repeat per URL.
        #[arg(long = "title")]
        titles: Vec<String>,
        #[arg(long)]
        request: Option<String>,
    },
}
