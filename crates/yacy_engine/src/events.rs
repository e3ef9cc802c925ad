use std::sync::{mpsc, Arc};

use yacy_logging::yacy_trace;

use crate::{CitationEvent, HostEvent, StatusAction, StatusEvent};

/// Destination for host events. Implementations must not block.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: HostEvent);
}

/// Sink used when the host registered no callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: HostEvent) {}
}

pub struct ChannelSink {
    tx: mpsc::Sender<HostEvent>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<HostEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: HostEvent) {
        // A dropped receiver means the host stopped listening.
        let _ = self.tx.send(event);
    }
}

/// Adapts a host callback into an [`EventSink`].
pub struct FnSink<F>(pub F);

impl<F> EventSink for FnSink<F>
where
    F: Fn(HostEvent) + Send + Sync,
{
    fn emit(&self, event: HostEvent) {
        (self.0)(event)
    }
}

/// Typed front for an [`EventSink`], shared by every stage of a run.
#[derive(Clone)]
pub struct EventReporter {
    sink: Arc<dyn EventSink>,
}

impl EventReporter {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }

    pub fn disabled() -> Self {
        Self::new(Arc::new(NullSink))
    }

    pub fn report(&self, event: HostEvent) {
        yacy_trace!("host event {:?}", event);
        self.sink.emit(event);
    }

    pub fn report_status(
        &self,
        description: impl Into<String>,
        done: bool,
        action: StatusAction,
        urls: Vec<String>,
    ) {
        self.report(HostEvent::Status(StatusEvent {
            done,
            action,
            description: description.into(),
            urls,
        }));
    }

    pub fn report_citation(&self, title: &str, url: &str, content: &str) {
        self.report(HostEvent::Citation(CitationEvent {
            title: title.to_string(),
            url: url.to_string(),
            content: content.to_string(),
        }));
    }
}

impl Default for EventReporter {
    fn default() -> Self {
        Self::disabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn channel_sink_forwards_status() {
        let (tx, rx) = mpsc::channel();
        let reporter = EventReporter::new(Arc::new(ChannelSink::new(tx)));
        reporter.report_status(
            "Searching YaCy for: rust",
            false,
            StatusAction::WebSearch,
            vec![],
        );

        let event = rx.try_recv().unwrap();
        assert_eq!(
            event,
            HostEvent::Status(StatusEvent {
                done: false,
                action: StatusAction::WebSearch,
                description: "Searching YaCy for: rust".into(),
                urls: vec![],
            })
        );
    }

    #[test]
    fn channel_sink_ignores_dropped_receiver() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let reporter = EventReporter::new(Arc::new(ChannelSink::new(tx)));
        reporter.report_citation("t", "http://a.test", "body");
    }

    #[test]
    fn fn_sink_receives_citation() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let captured = seen.clone();
        let reporter = EventReporter::new(Arc::new(FnSink(move |event: HostEvent| {
            captured.lock().unwrap().push(event);
        })));
        reporter.report_citation("A", "http://a.test", "Hello World");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(matches!(
            &seen[0],
            HostEvent::Citation(CitationEvent { title, .. }) if title == "A"
        ));
    }

    #[test]
    fn disabled_reporter_is_a_no_op() {
        let reporter = EventReporter::disabled();
        reporter.report_status("done", true, StatusAction::WebScrape, vec!["u".into()]);
    }
}
