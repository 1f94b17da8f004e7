use std::time::Duration;

use log::error;
use tokio::{task::JoinHandle, time::sleep};

use super::Message;
use crate::ModuleEventSender;

/// Default delay between redraw ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// One-shot timer that publishes a single [`Message::Tick`].
///
/// The owner re-arms the timer after handling each tick. Arming again or
/// cancelling aborts a firing that has not happened yet.
#[derive(Debug, Default)]
pub struct TickTask {
    handle: Option<JoinHandle<()>>,
}

impl TickTask {
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// Whether a firing is scheduled and has not run yet.
    pub fn is_pending(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Abort the scheduled firing, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Schedule a tick tagged with `generation` after `delay`.
    pub fn arm(&mut self, sender: &ModuleEventSender<Message>, delay: Duration, generation: u64) {
        self.cancel();

        let sender = sender.clone();
        let runtime = sender.context().runtime_handle().clone();
        let handle = runtime.spawn(async move {
            sleep(delay).await;

            if let Err(err) = sender.try_send(Message::Tick { generation }) {
                error!("Failed to publish clock tick: {err}");
            }
        });

        self.handle = Some(handle);
    }
}

impl Drop for TickTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
