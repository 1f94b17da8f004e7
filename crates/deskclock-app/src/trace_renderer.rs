use deskclock_proto::{
    geometry::{Bounds, Image, Point},
    ports::renderer::Renderer,
};
use hex_color::HexColor;
use log::{debug, trace, warn};

/// Renderer for headless runs: every call is written to the log.
#[derive(Debug, Default)]
pub struct TraceRenderer {
    depth:  usize,
    images: usize,
    frames: usize,
}

impl TraceRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the start of a frame.
    pub fn begin_frame(&mut self) {
        self.frames += 1;
        self.images = 0;
    }

    /// Log a summary of the frame drawn since [`begin_frame`](Self::begin_frame).
    pub fn end_frame(&mut self, description: Option<&str>) {
        if self.depth != 0 {
            warn!("Frame {} ended with {} unbalanced saves", self.frames, self.depth);
            self.depth = 0;
        }

        debug!(
            "Frame {}: {} images, showing {}",
            self.frames,
            self.images,
            description.unwrap_or("--:--")
        );
    }

    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl Renderer for TraceRenderer {
    fn save(&mut self) {
        self.depth += 1;
        trace!("save (depth {})", self.depth);
    }

    fn restore(&mut self) {
        match self.depth.checked_sub(1) {
            Some(depth) => self.depth = depth,
            None => warn!("restore without matching save"),
        }
        trace!("restore (depth {})", self.depth);
    }

    fn scale(&mut self, sx: f32, sy: f32, pivot: Point) {
        trace!("scale {sx}x{sy} around ({}, {})", pivot.x, pivot.y);
    }

    fn rotate(&mut self, degrees: f32, pivot: Point) {
        trace!("rotate {degrees} around ({}, {})", pivot.x, pivot.y);
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        trace!("translate {dx}, {dy}");
    }

    fn draw_image(&mut self, image: &Image, bounds: Bounds, alpha: u8) {
        self.images += 1;
        trace!("image {} at {bounds:?} alpha {alpha}", image.name());
    }

    fn draw_circle(&mut self, center: Point, radius: f32, color: HexColor) {
        trace!("circle r={radius} at ({}, {}) {color:?}", center.x, center.y);
    }
}
