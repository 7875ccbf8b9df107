//! Per-item progress notifications for the wiki fetch loop.

/// What happened to one listed page. `index` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchEvent<'a> {
    Skipped {
        title: Option<&'a str>,
        url: &'a str,
        index: usize,
        total: usize,
    },
    Done {
        title: &'a str,
        routes: usize,
        index: usize,
        total: usize,
    },
}

/// Receives progress from the fetch loop.
pub trait FetchObserver {
    fn on_event(&mut self, event: &FetchEvent<'_>);

    /// Called once after the last item.
    fn on_finish(&mut self) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl FetchObserver for NoopObserver {
    fn on_event(&mut self, _event: &FetchEvent<'_>) {}
}
