use std::{fmt, sync::Arc};

use tokio::runtime::Handle;

use crate::event_bus::{BusEvent, EventBusError, EventSender, ModuleEvent};

/// Shared utilities handed to widgets when they attach to the event loop.
///
/// The context owns an [`EventSender`] used to push [`BusEvent`] values into the
/// queue drained by the widget thread and a [`Handle`] tied to the runtime that
/// runs timers and signal forwarders. Tasks spawned through the handle only
/// publish events; they never touch widget state directly, so aborting one can
/// never leave a widget half-updated.
#[derive(Debug, Clone)]
pub struct ModuleContext {
    event_sender:   EventSender,
    runtime_handle: Handle,
}

impl ModuleContext {
    /// Create a new context bound to the provided event sender and runtime handle.
    ///
    /// # Examples
    ///
    /// ```
    /// # use deskclock_core::{event_bus::EventBus, module_context::ModuleContext};
    /// # use std::num::NonZeroUsize;
    /// # let runtime = tokio::runtime::Runtime::new().expect("runtime");
    /// let bus = EventBus::new(NonZeroUsize::new(4).expect("capacity"));
    /// let context = ModuleContext::new(bus.sender(), runtime.handle().clone());
    /// # drop(context);
    /// ```
    pub fn new(event_sender: EventSender, runtime_handle: Handle) -> Self {
        Self {
            event_sender,
            runtime_handle,
        }
    }

    /// Access the runtime handle used for spawning background tasks.
    pub fn runtime_handle(&self) -> &Handle {
        &self.runtime_handle
    }

    /// Request a redraw of the widget surface.
    ///
    /// # Postconditions
    ///
    /// - Enqueues a [`BusEvent::Redraw`] unless one is already at the back of
    ///   the queue; returns [`EventBusError::QueueFull`] when the bus is full.
    ///
    /// # Examples
    ///
    /// ```
    /// # use deskclock_core::{event_bus::EventBus, module_context::ModuleContext};
    /// # use std::num::NonZeroUsize;
    /// # let runtime = tokio::runtime::Runtime::new().expect("runtime");
    /// let bus = EventBus::new(NonZeroUsize::new(1).expect("capacity"));
    /// let context = ModuleContext::new(bus.sender(), runtime.handle().clone());
    /// context.request_redraw().expect("queued");
    /// ```
    pub fn request_redraw(&self) -> Result<(), EventBusError> {
        self.event_sender.try_send(BusEvent::Redraw)
    }

    fn publish_module_event(&self, event: ModuleEvent) -> Result<(), EventBusError> {
        self.event_sender.try_send(BusEvent::Module(event))
    }

    /// Build a type-safe module event sender from the provided conversion function.
    ///
    /// # Examples
    ///
    /// ```
    /// # use deskclock_core::{event_bus::EventBus, module_context::ModuleContext};
    /// # use deskclock_core::event_bus::ModuleEvent;
    /// # use deskclock_core::analog_clock;
    /// # use std::num::NonZeroUsize;
    /// # let runtime = tokio::runtime::Runtime::new().expect("runtime");
    /// let bus = EventBus::new(NonZeroUsize::new(2).expect("capacity"));
    /// let context = ModuleContext::new(bus.sender(), runtime.handle().clone());
    /// let sender = context.module_sender(ModuleEvent::AnalogClock);
    /// sender
    ///     .try_send(analog_clock::Message::Tick { generation: 0 })
    ///     .expect("queued");
    /// ```
    pub fn module_sender<T, F>(&self, convert: F) -> ModuleEventSender<T>
    where
        T: Send + 'static,
        F: Fn(T) -> ModuleEvent + Send + Sync + 'static,
    {
        ModuleEventSender {
            context: self.clone(),
            convert: Arc::new(convert),
        }
    }
}

/// Strongly-typed wrapper around [`ModuleContext::publish_module_event`].
#[derive(Clone)]
pub struct ModuleEventSender<T> {
    context: ModuleContext,
    convert: Arc<dyn Fn(T) -> ModuleEvent + Send + Sync>,
}

impl<T> fmt::Debug for ModuleEventSender<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleEventSender")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl<T> ModuleEventSender<T>
where
    T: Send + 'static,
{
    /// Convert the payload into a [`ModuleEvent`] and enqueue it on the bus.
    ///
    /// # Postconditions
    ///
    /// - Returns [`Ok`] if the event is successfully queued, otherwise propagates
    ///   [`EventBusError`] from the underlying [`EventSender`].
    pub fn try_send(&self, payload: T) -> Result<(), EventBusError> {
        let event = (self.convert)(payload);
        self.context.publish_module_event(event)
    }

    /// Context the sender publishes through.
    pub fn context(&self) -> &ModuleContext {
        &self.context
    }
}
