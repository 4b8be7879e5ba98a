//! Event types and sinks for observing scatter runs.
//!
//! [`ScatterEvent`]s are emitted while a document is loaded and scanned by
//! [`crate::pipeline::TermScatterPipeline`] or [`crate::scatter::runner::run_all_with_events`].
//! Sinks can collect them, forward them to a closure, fan them out, or push them
//! across threads through a channel.
use crossbeam_channel::Sender;

use crate::scatter::runner::ScatterResult;
use crate::scatter::PlacementRequest;
use crate::terms::WatchTerm;

/// Describes events emitted by scatter operations.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum ScatterEvent {
    /// Emitted when a document has been stored and tokenized.
    DocumentLoaded {
        /// Document length in bytes.
        bytes: usize,
        /// Number of tokens, including empty ones.
        tokens: usize,
    },

    /// Emitted after all occurrences of a watch term were counted.
    TermScanned {
        /// Position of the term in the configuration.
        index: usize,
        term: WatchTerm,
        occurrences: usize,
    },

    /// Emitted for every placement request.
    RequestEmitted {
        /// Position of the producing term in the configuration.
        term_index: usize,
        request: PlacementRequest,
    },

    /// Emitted when every term has been scanned.
    RunFinished { result: ScatterResult },

    /// Non-fatal warning generated during scatter.
    Warning {
        /// Context string (e.g. term or document).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`ScatterEvent`] used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScatterEventKind {
    DocumentLoaded,
    TermScanned,
    RequestEmitted,
    RunFinished,
    Warning,
}

impl ScatterEvent {
    pub fn kind(&self) -> ScatterEventKind {
        match self {
            ScatterEvent::DocumentLoaded { .. } => ScatterEventKind::DocumentLoaded,
            ScatterEvent::TermScanned { .. } => ScatterEventKind::TermScanned,
            ScatterEvent::RequestEmitted { .. } => ScatterEventKind::RequestEmitted,
            ScatterEvent::RunFinished { .. } => ScatterEventKind::RunFinished,
            ScatterEvent::Warning { .. } => ScatterEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`ScatterEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: ScatterEvent);

    /// Whether events of `kind` should be built at all.
    #[inline]
    fn wants(&self, _kind: ScatterEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = ScatterEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: ScatterEvent) {}

    #[inline]
    fn wants(&self, _kind: ScatterEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(ScatterEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(ScatterEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(ScatterEvent),
{
    #[inline]
    fn send(&mut self, event: ScatterEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<ScatterEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<ScatterEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[ScatterEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: ScatterEvent) {
        self.events.push(event);
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn sinks(&self) -> &[S] {
        &self.sinks
    }

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self { sinks: Vec::new() }
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: ScatterEvent) {
        let Some((last, rest)) = self.sinks.split_last_mut() else {
            return;
        };
        for sink in rest {
            if sink.wants(event.kind()) {
                sink.send(event.clone());
            }
        }
        if last.wants(event.kind()) {
            last.send(event);
        }
    }

    fn wants(&self, kind: ScatterEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

/// Event sink that forwards events over a channel, e.g. from a loader thread
/// to the frame loop.
pub struct ChannelSink {
    tx: Sender<ScatterEvent>,
    filter: Option<Vec<ScatterEventKind>>,
}

impl ChannelSink {
    pub fn new(tx: Sender<ScatterEvent>) -> Self {
        Self { tx, filter: None }
    }

    /// Only forward events of the listed kinds.
    pub fn with_filter(mut self, kinds: impl IntoIterator<Item = ScatterEventKind>) -> Self {
        self.filter = Some(kinds.into_iter().collect());
        self
    }
}

impl EventSink for ChannelSink {
    #[inline]
    fn send(&mut self, event: ScatterEvent) {
        // A dropped receiver means nobody is listening anymore.
        let _ = self.tx.send(event);
    }

    fn wants(&self, kind: ScatterEventKind) -> bool {
        self.filter.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(context: &str) -> ScatterEvent {
        ScatterEvent::Warning {
            context: context.into(),
            message: "msg".into(),
        }
    }

    #[test]
    fn vec_sink_collects_events() {
        let mut sink = VecSink::new();
        assert!(sink.is_empty());
        sink.send(warning("a"));
        sink.send_many([warning("b"), warning("c")]);
        assert_eq!(sink.len(), 3);
        assert_eq!(sink.as_slice()[0].kind(), ScatterEventKind::Warning);
    }

    #[test]
    fn unit_sink_wants_nothing() {
        assert!(!().wants(ScatterEventKind::Warning));
    }

    #[test]
    fn multi_sink_fans_out_events() {
        let mut multi = MultiSink::with_sinks(vec![VecSink::new(), VecSink::new()]);
        multi.send(warning("ctx"));
        assert_eq!(multi.sinks().len(), 2);
        assert!(multi.sinks().iter().all(|s| s.len() == 1));
    }

    #[test]
    fn empty_multi_sink_drops_events() {
        let mut multi: MultiSink<VecSink> = MultiSink::default();
        assert!(!multi.wants(ScatterEventKind::Warning));
        multi.send(warning("ctx"));
        assert!(multi.into_inner().is_empty());
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event| {
            count += 1;
        });
        sink.send(warning("ctx"));
        assert_eq!(count, 1);
    }

    #[test]
    fn channel_sink_forwards_and_filters() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut sink = ChannelSink::new(tx).with_filter([ScatterEventKind::Warning]);
        assert!(sink.wants(ScatterEventKind::Warning));
        assert!(!sink.wants(ScatterEventKind::RequestEmitted));
        sink.send(warning("thread"));
        let received = rx.try_recv().expect("event forwarded");
        assert!(matches!(received, ScatterEvent::Warning { ref context, .. } if context == "thread"));
    }

    #[test]
    fn channel_sink_ignores_dropped_receiver() {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        let mut sink = ChannelSink::new(tx);
        sink.send(warning("late"));
    }
}
