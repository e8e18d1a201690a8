//! Event types and sinks for observing batch runs.
//!
//! Events are emitted on the calling thread after every worker has been joined, in index order,
//! so sinks need not be thread-safe.

/// Describes events emitted by [`crate::batch::generator::BatchGenerator`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    /// Emitted once before workers are spawned.
    BatchStarted {
        /// Number of environments requested.
        count: usize,
        /// Number of worker threads actually spawned.
        workers: usize,
        /// Environments per worker (the last worker may get fewer).
        chunk_size: usize,
        /// Base seed; environment `i` uses `base_seed + i`.
        base_seed: u64,
    },

    /// Emitted for every slot that holds an environment.
    EnvironmentGenerated {
        index: usize,
        seed: u64,
        /// Occupied cell count, if the raster was computed by the worker.
        occupied_cells: Option<usize>,
    },

    /// Emitted for every slot that holds an error.
    EnvironmentFailed { index: usize, message: String },

    /// Emitted once after all slots were reported.
    BatchFinished { succeeded: usize, failed: usize },
}

/// A generic event sink that accepts [`BatchEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: BatchEvent);
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: BatchEvent) {}
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(BatchEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(BatchEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(BatchEvent),
{
    #[inline]
    fn send(&mut self, event: BatchEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<BatchEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<BatchEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[BatchEvent] {
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
    fn send(&mut self, event: BatchEvent) {
        self.events.push(event);
    }
}
