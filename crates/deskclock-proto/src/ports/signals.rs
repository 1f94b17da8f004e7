use std::pin::Pin;

use tokio_stream::Stream;

/// Stream type alias used for time signal subscriptions.
pub type TimeSignalStream = Pin<Box<dyn Stream<Item = TimeSignal> + Send + 'static>>;

/// Notification that the wall time observed by widgets may have changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimeSignal {
    /// Periodic minute boundary.
    Tick,
    /// The user or the network adjusted the clock.
    TimeChanged,
    /// The system zone changed to the carried zone id.
    TimeZoneChanged(String),
}

/// Environment capable of reporting time changes.
///
/// Every call to [`subscribe`](TimeSignalSource::subscribe) yields an
/// independent stream; dropping the stream unsubscribes.
pub trait TimeSignalSource: Send + Sync {
    fn subscribe(&self) -> TimeSignalStream;
}
