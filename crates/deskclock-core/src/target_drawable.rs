//! Touch target images for the wave unlock widget.

use deskclock_proto::{
    geometry::{Bounds, Image, Point, Size},
    ports::renderer::Renderer,
};
use log::trace;

/// Widget state used to pick an entry of a [`StateListImage`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DrawableState {
    pub enabled: bool,
    pub active:  bool,
    pub focused: bool,
}

pub const STATE_ACTIVE: DrawableState = DrawableState {
    enabled: true,
    active:  true,
    focused: false,
};

pub const STATE_INACTIVE: DrawableState = DrawableState {
    enabled: true,
    active:  false,
    focused: false,
};

pub const STATE_FOCUSED: DrawableState = DrawableState {
    enabled: true,
    active:  false,
    focused: true,
};

/// Condition on a [`DrawableState`]; `None` accepts either value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StateMatcher {
    pub enabled: Option<bool>,
    pub active:  Option<bool>,
    pub focused: Option<bool>,
}

impl StateMatcher {
    pub const ANY: Self = Self {
        enabled: None,
        active:  None,
        focused: None,
    };

    pub fn matches(&self, state: DrawableState) -> bool {
        let accepts = |want: Option<bool>, have: bool| want.is_none_or(|want| want == have);

        accepts(self.enabled, state.enabled)
            && accepts(self.active, state.active)
            && accepts(self.focused, state.focused)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct StateEntry {
    matcher: StateMatcher,
    image:   Image,
    bounds:  Bounds,
}

/// Image set whose visible entry depends on the widget state.
///
/// The first entry whose matcher accepts the current state is shown; nothing
/// is shown when no entry matches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateListImage {
    entries: Vec<StateEntry>,
    state:   DrawableState,
    current: Option<usize>,
}

impl StateListImage {
    pub fn new(entries: impl IntoIterator<Item = (StateMatcher, Image)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(matcher, image)| StateEntry {
                matcher,
                bounds: Bounds::from_size(image.intrinsic()),
                image,
            })
            .collect();

        let mut list = Self {
            entries,
            state: DrawableState::default(),
            current: None,
        };
        list.select();
        list
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn state(&self) -> DrawableState {
        self.state
    }

    pub fn set_state(&mut self, state: DrawableState) {
        self.state = state;
        self.select();
    }

    /// Entry shown for the current state with its bounds.
    pub fn current(&self) -> Option<(&Image, Bounds)> {
        self.current
            .and_then(|index| self.entries.get(index))
            .map(|entry| (&entry.image, entry.bounds))
    }

    /// Bounds of the entry at `index`.
    pub fn entry_bounds(&self, index: usize) -> Option<Bounds> {
        self.entries.get(index).map(|entry| entry.bounds)
    }

    /// Give the first `count` entries a common size equal to the union of
    /// their intrinsic sizes.
    fn unify_bounds(&mut self, count: usize) -> Size {
        let count = count.min(self.entries.len());
        let union = self.entries[..count]
            .iter()
            .fold(Size::default(), |acc, entry| acc.union(entry.image.intrinsic()));

        trace!("union of {count} state images: {}x{}", union.width, union.height);

        for entry in &mut self.entries[..count] {
            entry.bounds = Bounds::from_size(union);
        }

        union
    }

    fn select(&mut self) {
        self.current = self
            .entries
            .iter()
            .position(|entry| entry.matcher.matches(self.state));
    }
}

/// Image held by a [`TargetDrawable`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetImage {
    Single(Image),
    StateList(StateListImage),
}

/// Positioned, scaled and faded image of one unlock target.
///
/// Transform and opacity belong to the instance, so two targets built from the
/// same [`Image`] never affect each other.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetDrawable {
    resource_id: u32,
    image:       Option<TargetImage>,
    count:       usize,
    bounds:      Bounds,
    translation: Point,
    position:    Point,
    scale_x:     f32,
    scale_y:     f32,
    alpha:       f32,
    enabled:     bool,
}

impl TargetDrawable {
    /// Target for `image`, where `count` is the number of state list entries
    /// taken into account when sizing.
    pub fn new(resource_id: u32, image: Option<TargetImage>, count: usize) -> Self {
        let mut target = Self {
            resource_id,
            image: None,
            count,
            bounds: Bounds::default(),
            translation: Point::default(),
            position: Point::default(),
            scale_x: 1.0,
            scale_y: 1.0,
            alpha: 1.0,
            enabled: true,
        };
        target.set_image(image);
        target
    }

    /// Fresh target sharing `other`'s resource id and image but none of its
    /// transform or opacity.
    pub fn copy_of(other: &Self) -> Self {
        Self::new(other.resource_id, other.image.clone(), other.count)
    }

    /// Swap the image, keeping the resource id used for identification.
    pub fn set_image(&mut self, image: Option<TargetImage>) {
        self.image = image;
        self.resize();
        self.set_state(STATE_INACTIVE);
    }

    pub fn resource_id(&self) -> u32 {
        self.resource_id
    }

    pub fn set_state(&mut self, state: DrawableState) {
        if let Some(TargetImage::StateList(list)) = &mut self.image {
            list.set_state(state);
        }
    }

    /// Whether a state list image is in the focused state.
    pub fn is_active(&self) -> bool {
        matches!(&self.image, Some(TargetImage::StateList(list)) if list.state().focused)
    }

    /// Whether the target has an image and has not been disabled.
    pub fn is_enabled(&self) -> bool {
        self.image.is_some() && self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Size every state image to their common union, or a single image to
    /// its intrinsic size.
    pub fn resize(&mut self) {
        self.bounds = match &mut self.image {
            Some(TargetImage::StateList(list)) => Bounds::from_size(list.unify_bounds(self.count)),
            Some(TargetImage::Single(image)) => Bounds::from_size(image.intrinsic()),
            None => Bounds::default(),
        };
    }

    /// Bounds of the whole target after [`resize`](Self::resize).
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn x(&self) -> f32 {
        self.translation.x
    }

    pub fn set_x(&mut self, x: f32) {
        self.translation.x = x;
    }

    pub fn y(&self) -> f32 {
        self.translation.y
    }

    pub fn set_y(&mut self, y: f32) {
        self.translation.y = y;
    }

    pub fn position_x(&self) -> f32 {
        self.position.x
    }

    pub fn set_position_x(&mut self, x: f32) {
        self.position.x = x;
    }

    pub fn position_y(&self) -> f32 {
        self.position.y
    }

    pub fn set_position_y(&mut self, y: f32) {
        self.position.y = y;
    }

    pub fn scale_x(&self) -> f32 {
        self.scale_x
    }

    pub fn set_scale_x(&mut self, scale: f32) {
        self.scale_x = scale;
    }

    pub fn scale_y(&self) -> f32 {
        self.scale_y
    }

    pub fn set_scale_y(&mut self, scale: f32) {
        self.scale_y = scale;
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    /// Intrinsic width of the shown image, 0 without one.
    pub fn width(&self) -> u32 {
        self.shown().map_or(0, |(image, _)| image.intrinsic_width())
    }

    /// Intrinsic height of the shown image, 0 without one.
    pub fn height(&self) -> u32 {
        self.shown().map_or(0, |(image, _)| image.intrinsic_height())
    }

    /// Draw the target centred on its position.
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        if !self.enabled {
            return;
        }

        let Some((image, bounds)) = self.shown() else {
            return;
        };

        renderer.save();
        renderer.scale(self.scale_x, self.scale_y, self.position);
        renderer.translate(
            self.translation.x + self.position.x,
            self.translation.y + self.position.y,
        );
        renderer.translate(
            -0.5 * image.intrinsic_width() as f32,
            -0.5 * image.intrinsic_height() as f32,
        );
        renderer.draw_image(image, bounds, alpha_byte(self.alpha));
        renderer.restore();
    }

    fn shown(&self) -> Option<(&Image, Bounds)> {
        match self.image.as_ref()? {
            TargetImage::Single(image) => Some((image, self.bounds)),
            TargetImage::StateList(list) => list.current(),
        }
    }
}

fn alpha_byte(alpha: f32) -> u8 {
    (alpha * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{DrawOp, RecordingRenderer};

    fn image(name: &str, width: u32, height: u32) -> Image {
        Image::new(name, Size::new(width, height))
    }

    fn focus_list() -> StateListImage {
        StateListImage::new([
            (
                StateMatcher {
                    focused: Some(true),
                    ..StateMatcher::ANY
                },
                image("focused", 60, 40),
            ),
            (
                StateMatcher {
                    active: Some(true),
                    ..StateMatcher::ANY
                },
                image("active", 30, 80),
            ),
            (StateMatcher::ANY, image("idle", 20, 20)),
        ])
    }

    #[test]
    fn matcher_accepts_unconstrained_flags() {
        let matcher = StateMatcher {
            enabled: Some(true),
            ..StateMatcher::ANY
        };

        assert!(matcher.matches(STATE_ACTIVE));
        assert!(matcher.matches(STATE_FOCUSED));
        assert!(!matcher.matches(DrawableState::default()));
    }

    #[test]
    fn state_list_selects_first_matching_entry() {
        let mut list = focus_list();

        list.set_state(STATE_FOCUSED);
        assert_eq!(list.current().map(|(image, _)| image.name()), Some("focused"));

        list.set_state(STATE_ACTIVE);
        assert_eq!(list.current().map(|(image, _)| image.name()), Some("active"));

        list.set_state(STATE_INACTIVE);
        assert_eq!(list.current().map(|(image, _)| image.name()), Some("idle"));
    }

    #[test]
    fn resize_unions_state_list_entries() {
        let target = TargetDrawable::new(7, Some(TargetImage::StateList(focus_list())), 3);

        assert_eq!(target.bounds(), Bounds::new(0, 0, 60, 80));

        let Some(TargetImage::StateList(list)) = &target.image else {
            panic!("state list image");
        };
        for index in 0..3 {
            assert_eq!(list.entry_bounds(index), Some(Bounds::new(0, 0, 60, 80)));
        }
    }

    #[test]
    fn resize_only_considers_counted_entries() {
        let target = TargetDrawable::new(7, Some(TargetImage::StateList(focus_list())), 1);

        assert_eq!(target.bounds(), Bounds::new(0, 0, 60, 40));

        let Some(TargetImage::StateList(list)) = &target.image else {
            panic!("state list image");
        };
        assert_eq!(list.entry_bounds(1), Some(Bounds::new(0, 0, 30, 80)));
    }

    #[test]
    fn single_image_uses_intrinsic_bounds() {
        let target = TargetDrawable::new(1, Some(TargetImage::Single(image("dot", 12, 14))), 1);

        assert_eq!(target.bounds(), Bounds::new(0, 0, 12, 14));
        assert_eq!((target.width(), target.height()), (12, 14));
        assert!(!target.is_active());
    }

    #[test]
    fn new_targets_start_inactive() {
        let mut target = TargetDrawable::new(2, Some(TargetImage::StateList(focus_list())), 3);
        assert!(!target.is_active());
        assert_eq!(target.width(), 20);

        target.set_state(STATE_FOCUSED);
        assert!(target.is_active());
        assert_eq!(target.width(), 60);
    }

    #[test]
    fn target_without_image_is_disabled_and_sizeless() {
        let mut target = TargetDrawable::new(3, None, 1);
        let mut renderer = RecordingRenderer::new();

        target.draw(&mut renderer);

        assert!(!target.is_enabled());
        assert_eq!((target.width(), target.height()), (0, 0));
        assert!(renderer.ops.is_empty());

        target.set_enabled(true);
        assert!(!target.is_enabled());
    }

    #[test]
    fn disabled_target_is_not_drawn() {
        let mut target = TargetDrawable::new(4, Some(TargetImage::Single(image("dot", 10, 10))), 1);
        let mut renderer = RecordingRenderer::new();
        target.set_enabled(false);

        target.draw(&mut renderer);

        assert!(renderer.ops.is_empty());
    }

    #[test]
    fn draw_applies_transform_and_alpha() {
        let mut target = TargetDrawable::new(5, Some(TargetImage::Single(image("dot", 10, 20))), 1);
        target.set_position_x(100.0);
        target.set_position_y(50.0);
        target.set_x(5.0);
        target.set_y(-5.0);
        target.set_scale_x(2.0);
        target.set_scale_y(0.5);
        target.set_alpha(0.5);
        let mut renderer = RecordingRenderer::new();

        target.draw(&mut renderer);

        assert_eq!(
            renderer.ops,
            vec![
                DrawOp::Save,
                DrawOp::Scale {
                    sx:    2.0,
                    sy:    0.5,
                    pivot: Point::new(100.0, 50.0),
                },
                DrawOp::Translate { dx: 105.0, dy: 45.0 },
                DrawOp::Translate { dx: -5.0, dy: -10.0 },
                DrawOp::Image {
                    name:   "dot".to_owned(),
                    bounds: Bounds::new(0, 0, 10, 20),
                    alpha:  128,
                },
                DrawOp::Restore,
            ]
        );
    }

    #[test]
    fn copies_do_not_share_transforms() {
        let mut original = TargetDrawable::new(6, Some(TargetImage::Single(image("dot", 8, 8))), 1);
        original.set_alpha(0.25);
        original.set_x(40.0);

        let mut copy = TargetDrawable::copy_of(&original);
        copy.set_alpha(1.0);

        assert_eq!(copy.resource_id(), 6);
        assert_eq!(copy.x(), 0.0);
        assert_eq!(original.alpha(), 0.25);
        assert_eq!(copy.alpha(), 1.0);
    }

    #[test]
    fn swapping_image_keeps_resource_id() {
        let mut target = TargetDrawable::new(9, Some(TargetImage::Single(image("a", 8, 8))), 1);

        target.set_image(Some(TargetImage::Single(image("b", 16, 4))));

        assert_eq!(target.resource_id(), 9);
        assert_eq!(target.bounds(), Bounds::new(0, 0, 16, 4));
    }
}
