mod cli;
mod logging;
mod settings;
mod sink;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use yacy_engine::{BlockingTool, EventSink};
use yacy_logging::{yacy_error, yacy_info};

use cli::{Cli, Command};
use settings::{load_settings, Overrides};
use sink::JsonLinesSink;

const EXIT_CONFIG: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::initialize(cli.log);

    let settings = match load_settings(cli.config.as_deref(), &Overrides::from(&cli)) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let tool = match BlockingTool::new(settings) {
        Ok(tool) => tool,
        Err(err) => {
            yacy_error!("failed to start runtime: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let sink = cli
        .events
        .then(|| Arc::new(JsonLinesSink) as Arc<dyn EventSink>);

    match cli.command {
        Command::Search { query, request } => {
            let request = request.unwrap_or_else(|| query.clone());
            yacy_info!("search query={:?}", query);
            match tool.yacy_search(&query, &request, sink) {
                Ok(text) => {
                    println!("{text}");
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    eprintln!("{err}");
                    ExitCode::from(EXIT_CONFIG)
                }
            }
        }
        Command::Scrape {
            urls,
            titles,
            request,
        } => {
            yacy_info!("scrape urls={}", urls.len());
            let text = tool.web_scrape(&urls, &titles, request.as_deref().unwrap_or(""), sink);
            println!("{text}");
            ExitCode::SUCCESS
        }
    }
}
