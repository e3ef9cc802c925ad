use std::io;
use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};

use crate::events::{EventReporter, EventSink, NullSink};
use crate::tool::YacyTool;
use crate::{ConfigError, ToolSettings};

/// Synchronous front for [`YacyTool`].
///
/// Owns a current-thread runtime, so every fetch of a run is multiplexed on the
/// calling thread.
pub struct BlockingTool {
    runtime: Runtime,
    tool: YacyTool,
}

impl BlockingTool {
    pub fn new(settings: ToolSettings) -> io::Result<Self> {
        Self::from_tool(YacyTool::new(settings))
    }

    pub fn from_tool(tool: YacyTool) -> io::Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { runtime, tool })
    }

    pub fn yacy_search(
        &self,
        query: &str,
        user_request: &str,
        sink: Option<Arc<dyn EventSink>>,
    ) -> Result<String, ConfigError> {
        let reporter = reporter_for(sink);
        self.runtime
            .block_on(self.tool.yacy_search(query, user_request, &reporter))
    }

    pub fn web_scrape(
        &self,
        urls: &[String],
        titles: &[String],
        user_request: &str,
        sink: Option<Arc<dyn EventSink>>,
    ) -> String {
        let reporter = reporter_for(sink);
        self.runtime
            .block_on(self.tool.web_scrape(urls, titles, user_request, &reporter))
    }
}

fn reporter_for(sink: Option<Arc<dyn EventSink>>) -> EventReporter {
    EventReporter::new(sink.unwrap_or_else(|| Arc::new(NullSink)))
}
