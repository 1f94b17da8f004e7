use hex_color::HexColor;

use crate::geometry::{Bounds, Image, Point};

/// Drawing surface provided by the host toolkit.
///
/// Transform calls (`scale`, `rotate`, `translate`) apply to every subsequent
/// draw call until the matching [`restore`](Renderer::restore). Rotation is in
/// degrees, clockwise, with zero pointing at twelve o'clock for an upright
/// image.
pub trait Renderer {
    /// Push the current transform onto the stack.
    fn save(&mut self);

    /// Pop the transform pushed by the last [`save`](Renderer::save).
    fn restore(&mut self);

    fn scale(&mut self, sx: f32, sy: f32, pivot: Point);

    fn rotate(&mut self, degrees: f32, pivot: Point);

    fn translate(&mut self, dx: f32, dy: f32);

    /// Draw `image` stretched to `bounds` with the given opacity (0-255).
    fn draw_image(&mut self, image: &Image, bounds: Bounds, alpha: u8);

    fn draw_circle(&mut self, center: Point, radius: f32, color: HexColor);
}
