//! Time signal sources and the forwarder that feeds them into the event bus.

use std::time::Duration;

use chrono::{Local, Timelike};
use deskclock_proto::ports::signals::{TimeSignal, TimeSignalSource, TimeSignalStream};
use log::{debug, error, warn};
use tokio::{
    sync::broadcast,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};
use tokio_stream::{
    StreamExt,
    wrappers::{BroadcastStream, IntervalStream},
};

use crate::ModuleEventSender;

const MINUTE: Duration = Duration::from_secs(60);

/// Emits [`TimeSignal::Tick`] at every wall-clock minute boundary.
///
/// Streams must be created from within a tokio runtime.
#[derive(Debug, Default, Clone, Copy)]
pub struct MinuteTickSource;

impl MinuteTickSource {
    pub fn new() -> Self {
        Self
    }

    fn until_next_minute() -> Duration {
        let now = Local::now();
        // Leap seconds report nanoseconds past 1e9.
        let nanos = now.nanosecond() % 1_000_000_000;
        let into_minute = Duration::from_secs(u64::from(now.second()))
            + Duration::from_nanos(u64::from(nanos));

        MINUTE.saturating_sub(into_minute)
    }
}

impl TimeSignalSource for MinuteTickSource {
    fn subscribe(&self) -> TimeSignalStream {
        let mut ticker = interval_at(Instant::now() + Self::until_next_minute(), MINUTE);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Box::pin(IntervalStream::new(ticker).map(|_| TimeSignal::Tick))
    }
}

/// Signal source fed by the host, e.g. from platform notifications.
///
/// Every subscriber receives every signal published after it subscribed.
#[derive(Debug, Clone)]
pub struct ChannelSignalSource {
    sender: broadcast::Sender<TimeSignal>,
}

impl ChannelSignalSource {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish `signal` to all current subscribers.
    ///
    /// Returns the number of subscribers that will see the signal.
    pub fn publish(&self, signal: TimeSignal) -> usize {
        match self.sender.send(signal) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(signal)) => {
                debug!("No subscribers for time signal {signal:?}");
                0
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChannelSignalSource {
    fn default() -> Self {
        Self::new(16)
    }
}

impl TimeSignalSource for ChannelSignalSource {
    fn subscribe(&self) -> TimeSignalStream {
        let stream = BroadcastStream::new(self.sender.subscribe()).filter_map(|item| match item {
            Ok(signal) => Some(signal),
            Err(err) => {
                warn!("Dropped time signals: {err}");
                None
            }
        });

        Box::pin(stream)
    }
}

/// Spawn a task that forwards every signal from `stream` onto the bus.
///
/// Aborting the returned handle drops the stream, which unsubscribes from the
/// source.
pub fn forward_signals<T, F>(
    sender: ModuleEventSender<T>,
    mut stream: TimeSignalStream,
    convert: F,
) -> JoinHandle<()>
where
    T: Send + 'static,
    F: Fn(TimeSignal) -> T + Send + 'static,
{
    let handle = sender.context().runtime_handle().clone();

    handle.spawn(async move {
        while let Some(signal) = stream.next().await {
            debug!("Forwarding time signal {signal:?}");

            if let Err(err) = sender.try_send(convert(signal)) {
                error!("Failed to publish time signal: {err}");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use tokio::{task::yield_now, time::advance};

    use super::*;
    use crate::{
        ModuleContext, analog_clock,
        event_bus::{BusEvent, EventBus, ModuleEvent},
    };

    fn module_context() -> (ModuleContext, EventBus) {
        let bus = EventBus::new(NonZeroUsize::new(16).expect("capacity"));
        let ctx = ModuleContext::new(bus.sender(), tokio::runtime::Handle::current());

        (ctx, bus)
    }

    #[tokio::test]
    async fn channel_source_delivers_to_each_subscriber() {
        let source = ChannelSignalSource::default();
        let mut first = source.subscribe();
        let mut second = source.subscribe();

        assert_eq!(source.publish(TimeSignal::TimeChanged), 2);

        assert_eq!(first.next().await, Some(TimeSignal::TimeChanged));
        assert_eq!(second.next().await, Some(TimeSignal::TimeChanged));
    }

    #[tokio::test]
    async fn channel_source_without_subscribers_drops_signal() {
        let source = ChannelSignalSource::default();
        assert_eq!(source.publish(TimeSignal::Tick), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn minute_source_ticks_once_per_minute() {
        let mut stream = MinuteTickSource::new().subscribe();

        advance(MINUTE).await;
        assert_eq!(stream.next().await, Some(TimeSignal::Tick));

        advance(MINUTE).await;
        assert_eq!(stream.next().await, Some(TimeSignal::Tick));
    }

    #[tokio::test(start_paused = true)]
    async fn forwarder_publishes_signals_and_stops_on_abort() {
        let (ctx, bus) = module_context();
        let mut receiver = bus.receiver();
        let source = ChannelSignalSource::default();

        let sender = ctx.module_sender(ModuleEvent::AnalogClock);
        let task = forward_signals(sender, source.subscribe(), analog_clock::Message::Signal);
        yield_now().await;

        source.publish(TimeSignal::TimeZoneChanged("Europe/Paris".into()));
        yield_now().await;

        match receiver.try_recv().expect("queue") {
            Some(BusEvent::Module(ModuleEvent::AnalogClock(analog_clock::Message::Signal(
                TimeSignal::TimeZoneChanged(zone),
            )))) => assert_eq!(zone, "Europe/Paris"),
            other => panic!("unexpected event: {other:?}"),
        }

        task.abort();
        yield_now().await;

        assert_eq!(source.subscriber_count(), 0);
    }
}
