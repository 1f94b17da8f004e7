mod angles;
mod layout;
mod tick;

#[cfg(test)]
mod tests;

use std::{sync::Arc, time::Duration};

use deskclock_proto::{
    config::{AnalogClockConfig, JewelConfig},
    geometry::{Bounds, Image, Point, Size},
    ports::{
        clock::{ClockSource, WallTime},
        renderer::Renderer,
        signals::{TimeSignal, TimeSignalSource},
    },
};
use hex_color::HexColor;
use log::{debug, error, info, warn};
use tokio::task::JoinHandle;

pub use angles::HandAngles;
pub use layout::{FaceBounds, MeasureSpec, downscale, measure};
pub use tick::{TICK_INTERVAL, TickTask};

use crate::{ModuleContext, ModuleEventSender, event_bus::ModuleEvent, signals::forward_signals};

const OPAQUE: u8 = u8::MAX;

/// Messages delivered to a [`ClockFace`] through the event bus.
#[derive(Debug, Clone)]
pub enum Message {
    /// A scheduled redraw tick armed while the face had `generation`.
    Tick { generation: u64 },
    /// A time change reported by the environment.
    Signal(TimeSignal),
}

/// Dial and hand images drawn by a [`ClockFace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceImages {
    pub dial:        Image,
    pub hour_hand:   Image,
    pub minute_hand: Image,
    pub second_hand: Option<Image>,
}

impl FaceImages {
    pub fn from_config(config: &AnalogClockConfig) -> Self {
        Self {
            dial:        config.dial.to_image(),
            hour_hand:   config.hour_hand.to_image(),
            minute_hand: config.minute_hand.to_image(),
            second_hand: config.second_hand.as_ref().map(|hand| hand.to_image()),
        }
    }
}

/// Dot drawn on the dial below twelve o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jewel {
    pub radius: f32,
    pub offset: f32,
    pub color:  HexColor,
}

impl Jewel {
    /// Jewel described by `config`, or `None` when it would be invisible.
    pub fn from_config(config: &JewelConfig) -> Option<Self> {
        (config.radius > 0.0 && config.color.a > 0).then_some(Self {
            radius: config.radius,
            offset: config.offset,
            color:  config.color,
        })
    }
}

struct Attachment {
    sender:  ModuleEventSender<Message>,
    tick:    TickTask,
    signals: JoinHandle<()>,
}

impl Drop for Attachment {
    fn drop(&mut self) {
        self.tick.cancel();
        self.signals.abort();
    }
}

/// Analog clock widget model.
///
/// Hand angles are always recomputed from the clock source, never advanced
/// incrementally. While attached the face re-arms a one-shot tick after every
/// firing and listens to environment time signals; both arrive as
/// [`Message`]s on the event bus and are applied through
/// [`update`](ClockFace::update) on the thread that renders.
pub struct ClockFace {
    clock:         Arc<dyn ClockSource>,
    images:        FaceImages,
    jewel:         Option<Jewel>,
    time_zone_id:  Option<String>,
    show_seconds:  bool,
    tick_interval: Duration,
    angles:        HandAngles,
    last_time:     Option<WallTime>,
    size:          Size,
    dirty:         bool,
    bounds:        Option<FaceBounds>,
    generation:    u64,
    attachment:    Option<Attachment>,
}

impl std::fmt::Debug for ClockFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClockFace")
            .field("time_zone_id", &self.time_zone_id)
            .field("show_seconds", &self.show_seconds)
            .field("angles", &self.angles)
            .field("size", &self.size)
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

impl ClockFace {
    pub fn new(clock: Arc<dyn ClockSource>, images: FaceImages) -> Self {
        Self {
            clock,
            images,
            jewel: None,
            time_zone_id: None,
            show_seconds: true,
            tick_interval: TICK_INTERVAL,
            angles: HandAngles::default(),
            last_time: None,
            size: Size::default(),
            dirty: true,
            bounds: None,
            generation: 0,
            attachment: None,
        }
    }

    /// Build a face from the `[analog_clock]` configuration section.
    pub fn from_config(clock: Arc<dyn ClockSource>, config: &AnalogClockConfig) -> Self {
        let mut face = Self::new(clock, FaceImages::from_config(config));
        face.jewel = Jewel::from_config(&config.jewel);
        face.show_seconds = config.show_seconds;
        face.tick_interval = Duration::from_millis(config.tick_interval_ms.max(1));

        if let Some(zone) = &config.time_zone {
            face.set_time_zone(zone);
        }

        face
    }

    pub fn with_jewel(mut self, jewel: Option<Jewel>) -> Self {
        self.jewel = jewel;
        self
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn angles(&self) -> HandAngles {
        self.angles
    }

    pub fn time_zone_id(&self) -> Option<&str> {
        self.time_zone_id.as_deref()
    }

    pub fn shows_seconds(&self) -> bool {
        self.show_seconds
    }

    /// Whether the tick schedule is running.
    pub fn is_active(&self) -> bool {
        self.attachment.is_some()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Bounds computed by the last render, if any.
    pub fn bounds(&self) -> Option<&FaceBounds> {
        self.bounds.as_ref()
    }

    /// Natural size of the dial.
    pub fn natural_size(&self) -> Size {
        self.images.dial.intrinsic()
    }

    /// Override the zone used for the hands.
    ///
    /// Unknown ids fall back to the system zone.
    pub fn set_time_zone(&mut self, id: &str) {
        self.time_zone_id = self.resolve_zone(id);
        self.on_time_changed();
    }

    /// Toggle the second hand.
    ///
    /// While disabled the second angle is neither recomputed nor drawn.
    pub fn enable_seconds(&mut self, enabled: bool) {
        self.show_seconds = enabled;
    }

    /// Apply a time change reported by the environment and request a redraw.
    pub fn on_external_time_signal(&mut self, signal: TimeSignal) {
        if let TimeSignal::TimeZoneChanged(id) = &signal {
            info!("Time zone changed to '{id}'");
            self.time_zone_id = self.resolve_zone(id);
        }

        debug!("Handling time signal {signal:?}");
        self.on_time_changed();
        self.request_redraw();
    }

    /// Record the laid-out size; bounds are repositioned on the next render
    /// when it changed.
    pub fn set_size(&mut self, size: Size) {
        if self.size != size {
            self.size = size;
            self.dirty = true;
        }
    }

    /// Size requested from the parent layout.
    pub fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> Size {
        measure(self.natural_size(), width, height)
    }

    /// Accessible description of the displayed time, e.g. `"15:04"`.
    pub fn content_description(&self) -> Option<String> {
        self.last_time
            .map(|time| format!("{:02}:{:02}", time.hour, time.minute))
    }

    /// Start the tick schedule and subscribe to `signals`.
    ///
    /// Attaching an already attached face only refreshes the time.
    pub fn attach(&mut self, ctx: &ModuleContext, signals: &dyn TimeSignalSource) {
        if self.attachment.is_none() {
            self.generation = self.generation.wrapping_add(1);

            let sender = ctx.module_sender(ModuleEvent::AnalogClock);
            let forwarder = forward_signals(sender.clone(), signals.subscribe(), Message::Signal);

            self.attachment = Some(Attachment {
                sender,
                tick: TickTask::new(),
                signals: forwarder,
            });
            info!("Analog clock attached (generation {})", self.generation);
        }

        self.on_time_changed();
        self.request_redraw();
        self.arm_tick();
    }

    /// Stop the tick schedule and drop the signal subscription.
    ///
    /// A tick or signal already queued on the bus is ignored once detached.
    pub fn detach(&mut self) {
        if let Some(attachment) = self.attachment.take() {
            drop(attachment);
            self.generation = self.generation.wrapping_add(1);
            info!("Analog clock detached");
        }
    }

    /// Apply a bus message.
    pub fn update(&mut self, message: Message) {
        if !self.is_active() {
            debug!("Ignoring {message:?} for detached clock");
            return;
        }

        match message {
            Message::Tick { generation } if generation == self.generation => {
                self.on_time_changed();
                self.request_redraw();
                self.arm_tick();
            }
            Message::Tick { generation } => {
                debug!(
                    "Ignoring stale clock tick (generation {generation}, current {})",
                    self.generation
                );
            }
            Message::Signal(signal) => self.on_external_time_signal(signal),
        }
    }

    /// Draw the face centred in a `width` x `height` surface.
    ///
    /// The dial and hands are scaled down uniformly when the surface is
    /// smaller than the dial, never up.
    pub fn render(&mut self, renderer: &mut dyn Renderer, width: u32, height: u32) {
        if self.last_time.is_none() {
            self.on_time_changed();
        }

        self.set_size(Size::new(width, height));

        let changed = std::mem::take(&mut self.dirty);
        let x = (width / 2) as i32;
        let y = (height / 2) as i32;
        let origin = Point::new(x as f32, y as f32);

        let scale = downscale(self.size, self.natural_size());
        if let Some(scale) = scale {
            renderer.save();
            renderer.scale(scale, scale, origin);
        }

        let images = &self.images;
        let bounds = match self.bounds {
            Some(bounds) if !changed => bounds,
            _ => {
                let bounds = FaceBounds::centered(
                    x,
                    y,
                    &images.dial,
                    &images.hour_hand,
                    &images.minute_hand,
                    images.second_hand.as_ref(),
                );
                self.bounds = Some(bounds);
                bounds
            }
        };

        renderer.draw_image(&images.dial, bounds.dial, OPAQUE);

        if let Some(jewel) = &self.jewel {
            let half_dial = (images.dial.intrinsic_height() / 2) as f32;
            let center = Point::new(origin.x, origin.y - half_dial + jewel.offset);
            renderer.draw_circle(center, jewel.radius, jewel.color);
        }

        draw_hand(renderer, &images.hour_hand, bounds.hour, self.angles.hour, origin);
        draw_hand(
            renderer,
            &images.minute_hand,
            bounds.minute,
            self.angles.minute,
            origin,
        );

        if self.show_seconds
            && let (Some(hand), Some(hand_bounds)) = (&images.second_hand, bounds.second)
        {
            draw_hand(renderer, hand, hand_bounds, self.angles.second, origin);
        }

        if scale.is_some() {
            renderer.restore();
        }
    }

    fn resolve_zone(&self, id: &str) -> Option<String> {
        let resolved = self.clock.resolve_zone(id);

        if resolved.is_none() {
            warn!("Unknown time zone '{id}', using the system zone");
        }

        resolved
    }

    fn on_time_changed(&mut self) {
        let now = self.clock.now(self.time_zone_id.as_deref());
        self.compute_angles(now);
    }

    fn compute_angles(&mut self, now: WallTime) {
        self.angles = self.angles.recompute(now, self.show_seconds);
        self.last_time = Some(now);
        self.dirty = true;
    }

    fn request_redraw(&self) {
        if let Some(attachment) = &self.attachment
            && let Err(err) = attachment.sender.context().request_redraw()
        {
            error!("Failed to request clock redraw: {err}");
        }
    }

    fn arm_tick(&mut self) {
        let interval = self.tick_interval;
        let generation = self.generation;

        if let Some(attachment) = &mut self.attachment {
            let Attachment { sender, tick, .. } = attachment;
            tick.arm(sender, interval, generation);
        }
    }
}

impl Drop for ClockFace {
    fn drop(&mut self) {
        self.detach();
    }
}

fn draw_hand(
    renderer: &mut dyn Renderer,
    hand: &Image,
    bounds: Bounds,
    angle: f32,
    origin: Point,
) {
    renderer.save();
    renderer.rotate(angle, origin);
    renderer.draw_image(hand, bounds, OPAQUE);
    renderer.restore();
}
