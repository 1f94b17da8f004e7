use deskclock_proto::geometry::{Bounds, Image, Size};

/// Constraint imposed by the parent layout on one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeasureSpec {
    /// The parent imposes no constraint.
    Unspecified,
    /// The child may be as large as it wants up to the given size.
    AtMost(u32),
    /// The child must be exactly the given size.
    Exactly(u32),
}

impl MeasureSpec {
    fn limit(self) -> Option<u32> {
        match self {
            Self::Unspecified => None,
            Self::AtMost(size) | Self::Exactly(size) => Some(size),
        }
    }

    /// Reconcile the desired size with this constraint.
    pub fn resolve(self, desired: u32) -> u32 {
        match self {
            Self::Unspecified => desired,
            Self::AtMost(size) => desired.min(size),
            Self::Exactly(size) => size,
        }
    }
}

/// Uniform factor that fits `natural` into `available`.
///
/// Returns `None` when `available` is at least as large as `natural` on both
/// axes: the dial is never upscaled.
pub fn downscale(available: Size, natural: Size) -> Option<f32> {
    if natural.width == 0 || natural.height == 0 {
        return None;
    }

    if available.width >= natural.width && available.height >= natural.height {
        return None;
    }

    let horizontal = available.width as f32 / natural.width as f32;
    let vertical = available.height as f32 / natural.height as f32;

    Some(horizontal.min(vertical).min(1.0))
}

/// Size the clock asks for given its dial and the parent's constraints.
pub fn measure(natural: Size, width: MeasureSpec, height: MeasureSpec) -> Size {
    let mut horizontal = 1.0_f32;
    let mut vertical = 1.0_f32;

    if let Some(limit) = width.limit()
        && limit < natural.width
    {
        horizontal = limit as f32 / natural.width as f32;
    }

    if let Some(limit) = height.limit()
        && limit < natural.height
    {
        vertical = limit as f32 / natural.height as f32;
    }

    let scale = horizontal.min(vertical);

    Size::new(
        width.resolve((natural.width as f32 * scale) as u32),
        height.resolve((natural.height as f32 * scale) as u32),
    )
}

/// Bounds of the dial and hands, each centred on the clock origin at its
/// intrinsic size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceBounds {
    pub dial:   Bounds,
    pub hour:   Bounds,
    pub minute: Bounds,
    pub second: Option<Bounds>,
}

impl FaceBounds {
    pub(super) fn centered(
        x: i32,
        y: i32,
        dial: &Image,
        hour: &Image,
        minute: &Image,
        second: Option<&Image>,
    ) -> Self {
        Self {
            dial:   Bounds::centered(x, y, dial.intrinsic()),
            hour:   Bounds::centered(x, y, hour.intrinsic()),
            minute: Bounds::centered(x, y, minute.intrinsic()),
            second: second.map(|image| Bounds::centered(x, y, image.intrinsic())),
        }
    }
}
