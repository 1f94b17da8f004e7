use std::sync::Arc;

/// Point in surface coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width and height in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width:  u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Component-wise maximum of two sizes.
    pub fn union(self, other: Self) -> Self {
        Self {
            width:  self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

/// Integer rectangle expressed by its edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub left:   i32,
    pub top:    i32,
    pub right:  i32,
    pub bottom: i32,
}

impl Bounds {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle anchored at the origin with the provided size.
    pub fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width as i32, size.height as i32)
    }

    /// Rectangle of `size` centred on `(x, y)`.
    ///
    /// Half extents use integer division, so odd sizes lose one pixel on the
    /// right and bottom edges.
    pub fn centered(x: i32, y: i32, size: Size) -> Self {
        let half_w = size.width as i32 / 2;
        let half_h = size.height as i32 / 2;

        Self::new(x - half_w, y - half_h, x + half_w, y + half_h)
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Immutable handle to an image supplied by the host toolkit.
///
/// The handle carries no per-draw state: opacity and transforms are passed to
/// the [`Renderer`](crate::ports::renderer::Renderer) on every call, so clones
/// can be shared between widgets without interfering with each other.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Image {
    name:      Arc<str>,
    intrinsic: Size,
}

impl Image {
    pub fn new(name: impl Into<Arc<str>>, intrinsic: Size) -> Self {
        Self {
            name: name.into(),
            intrinsic,
        }
    }

    /// Resource name used by the host to look up pixels.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Natural size of the image.
    pub fn intrinsic(&self) -> Size {
        self.intrinsic
    }

    pub fn intrinsic_width(&self) -> u32 {
        self.intrinsic.width
    }

    pub fn intrinsic_height(&self) -> u32 {
        self.intrinsic.height
    }
}
