use std::io::Write;

use yacy_engine::{EventSink, HostEvent};
use yacy_logging::yacy_warn;

/// Prints each host event as one JSON line on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonLinesSink;

impl EventSink for JsonLinesSink {
    fn emit(&self, event: HostEvent) {
        match serde_json::to_string(&event) {
            Ok(line) => {
                let _ = writeln!(std::io::stderr().lock(), "{line}");
            }
            Err(err) => yacy_warn!("could not serialize host event: {}", err),
        }
    }
}
