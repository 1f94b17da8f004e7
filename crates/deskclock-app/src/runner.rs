use std::future::Future;

use deskclock_core::{
    analog_clock::ClockFace,
    event_bus::{BusEvent, EventReceiver, ModuleEvent},
};
use deskclock_proto::{geometry::Size, ports::renderer::Renderer};
use log::{error, info};
use tokio::time::sleep;

use crate::{poll_ticker::PollTicker, trace_renderer::TraceRenderer};

/// Renderer that is told where frames begin and end.
pub trait Surface: Renderer {
    fn begin_frame(&mut self) {}

    fn end_frame(&mut self, _description: Option<&str>) {}
}

impl Surface for TraceRenderer {
    fn begin_frame(&mut self) {
        TraceRenderer::begin_frame(self);
    }

    fn end_frame(&mut self, description: Option<&str>) {
        TraceRenderer::end_frame(self, description);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushOutcome {
    pub events:    usize,
    pub frames:    usize,
    pub had_error: bool,
}

impl FlushOutcome {
    pub fn is_empty(&self) -> bool {
        self.events == 0
    }
}

/// Owns an attached [`ClockFace`] and applies bus events to it.
///
/// Bus messages are applied in order; a redraw requested anywhere in the
/// batch renders one frame after the batch.
pub struct Runner<S> {
    face:     ClockFace,
    receiver: EventReceiver,
    surface:  S,
    size:     Size,
    ticker:   PollTicker,
}

impl<S: Surface> Runner<S> {
    pub fn new(face: ClockFace, receiver: EventReceiver, surface: S, size: Size) -> Self {
        Self {
            face,
            receiver,
            surface,
            size,
            ticker: PollTicker::default(),
        }
    }

    pub fn face(&self) -> &ClockFace {
        &self.face
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn flush(&mut self) -> FlushOutcome {
        let mut outcome = FlushOutcome::default();
        let mut redraw = false;

        loop {
            match self.receiver.try_recv() {
                Ok(Some(event)) => {
                    outcome.events += 1;

                    match event {
                        BusEvent::Redraw => redraw = true,
                        BusEvent::Module(ModuleEvent::AnalogClock(message)) => {
                            self.face.update(message);
                        }
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    error!("failed to read event bus payload: {err}");
                    outcome.had_error = true;
                    break;
                }
            }
        }

        if redraw {
            self.draw();
            outcome.frames = 1;
        }

        outcome
    }

    fn draw(&mut self) {
        self.surface.begin_frame();
        self.face
            .render(&mut self.surface, self.size.width, self.size.height);
        self.surface
            .end_frame(self.face.content_description().as_deref());
    }

    /// Drain the bus until `shutdown` resolves, then detach the face.
    pub async fn run_until<F>(mut self, shutdown: F) -> Self
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => break,
                () = sleep(self.ticker.interval()) => {
                    let outcome = self.flush();

                    if outcome.had_error {
                        error!("failed to drain event bus, keeping fast cadence");
                        self.ticker.record_activity();
                    } else if outcome.is_empty() {
                        self.ticker.record_idle();
                    } else {
                        self.ticker.record_activity();
                    }
                }
            }
        }

        info!("Stopping clock");
        self.face.detach();

        self
    }
}
