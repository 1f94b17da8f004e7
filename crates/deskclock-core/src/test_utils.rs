use deskclock_proto::{
    geometry::{Bounds, Image, Point},
    ports::renderer::Renderer,
};
use hex_color::HexColor;

/// Operation captured by [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Save,
    Restore,
    Scale { sx: f32, sy: f32, pivot: Point },
    Rotate { degrees: f32, pivot: Point },
    Translate { dx: f32, dy: f32 },
    Image { name: String, bounds: Bounds, alpha: u8 },
    Circle { center: Point, radius: f32, color: HexColor },
}

/// Renderer that records every call for later inspection.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub ops: Vec<DrawOp>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Names and bounds of every drawn image, in order.
    pub fn images(&self) -> Vec<(&str, Bounds)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Image { name, bounds, .. } => Some((name.as_str(), *bounds)),
                _ => None,
            })
            .collect()
    }

    pub fn rotations(&self) -> Vec<f32> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rotate { degrees, .. } => Some(*degrees),
                _ => None,
            })
            .collect()
    }

    pub fn scales(&self) -> Vec<(f32, f32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Scale { sx, sy, .. } => Some((*sx, *sy)),
                _ => None,
            })
            .collect()
    }

    /// Whether every `save` has a matching `restore`.
    pub fn is_balanced(&self) -> bool {
        let mut depth = 0_i32;

        for op in &self.ops {
            match op {
                DrawOp::Save => depth += 1,
                DrawOp::Restore => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            }
        }

        depth == 0
    }
}

impl Renderer for RecordingRenderer {
    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn scale(&mut self, sx: f32, sy: f32, pivot: Point) {
        self.ops.push(DrawOp::Scale { sx, sy, pivot });
    }

    fn rotate(&mut self, degrees: f32, pivot: Point) {
        self.ops.push(DrawOp::Rotate { degrees, pivot });
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.ops.push(DrawOp::Translate { dx, dy });
    }

    fn draw_image(&mut self, image: &Image, bounds: Bounds, alpha: u8) {
        self.ops.push(DrawOp::Image {
            name: image.name().to_owned(),
            bounds,
            alpha,
        });
    }

    fn draw_circle(&mut self, center: Point, radius: f32, color: HexColor) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            color,
        });
    }
}
