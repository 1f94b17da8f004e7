use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use masterror::{AppError, Error};

use crate::analog_clock;

#[derive(Debug, Clone)]
pub enum BusEvent {
    Redraw,
    Module(ModuleEvent),
}

impl BusEvent {
    fn is_coalescable_with(&self, other: &Self) -> bool {
        matches!((self, other), (BusEvent::Redraw, BusEvent::Redraw))
    }
}

#[derive(Debug, Clone)]
pub enum ModuleEvent {
    AnalogClock(analog_clock::Message),
}

#[derive(Debug)]
struct EventBusInner {
    queue:    Mutex<VecDeque<BusEvent>>,
    capacity: usize,
}

impl EventBusInner {
    fn new(capacity: NonZeroUsize) -> Self {
        Self {
            queue:    Mutex::new(VecDeque::with_capacity(capacity.get())),
            capacity: capacity.get(),
        }
    }

    fn push(&self, event: BusEvent) -> Result<(), EventBusError> {
        let mut queue = self.queue.lock().map_err(|_| EventBusError::Poisoned)?;

        if let Some(last) = queue.back()
            && event.is_coalescable_with(last)
        {
            return Ok(());
        }

        if queue.len() >= self.capacity {
            return Err(EventBusError::QueueFull {
                capacity: self.capacity,
            });
        }

        queue.push_back(event);
        Ok(())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventBusError {
    #[error("Event queue is full (capacity: {capacity})")]
    QueueFull { capacity: usize },
    #[error("Event queue state is poisoned")]
    Poisoned,
}

impl From<EventBusError> for AppError {
    fn from(err: EventBusError) -> Self {
        AppError::internal(err.to_string())
    }
}

/// Bounded queue carrying events from background tasks to the thread that owns
/// the widgets.
///
/// Consecutive [`BusEvent::Redraw`] requests are merged into one.
#[derive(Debug, Clone)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

impl EventBus {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Arc::new(EventBusInner::new(capacity)),
        }
    }

    pub fn sender(&self) -> EventSender {
        EventSender {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn publish(&self, event: BusEvent) -> Result<(), EventBusError> {
        self.inner.push(event)
    }

    pub fn drain(&self) -> Result<Vec<BusEvent>, EventBusError> {
        let mut queue = self
            .inner
            .queue
            .lock()
            .map_err(|_| EventBusError::Poisoned)?;

        Ok(queue.drain(..).collect())
    }
}

#[derive(Debug, Clone)]
pub struct EventSender {
    inner: Arc<EventBusInner>,
}

impl EventSender {
    pub fn try_send(&self, event: BusEvent) -> Result<(), EventBusError> {
        self.inner.push(event)
    }
}

#[derive(Debug)]
pub struct EventReceiver {
    inner: Arc<EventBusInner>,
}

impl EventReceiver {
    pub fn try_recv(&mut self) -> Result<Option<BusEvent>, EventBusError> {
        let mut queue = self
            .inner
            .queue
            .lock()
            .map_err(|_| EventBusError::Poisoned)?;

        Ok(queue.pop_front())
    }
}
