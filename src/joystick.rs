//! Stick configuration, drag-session tracking, and the knob position sink

use bevy::prelude::{Bundle, Component, Entity, Event, Rect, Reflect, Vec2};

use crate::axislike::{round4, AxisMode, StickValue};
use crate::deadzone::RadialDeadzone;
use crate::errors::StickConfigError;
use crate::pointer::PointerId;

/// The default duration, in seconds, of the eased return to center.
pub const DEFAULT_RETURN_TIME: f32 = 0.2;

/// An on-screen analog stick.
///
/// Dragging a pointer from anywhere inside the stick's activation region
/// produces a normalized [`StickValue`]: the raw pixel displacement from the
/// drag origin is clamped to `max_distance`, passed through a
/// [`RadialDeadzone`], optionally restricted to one axis, and scaled to
/// `[-1.0, 1.0]` per component.
///
/// The configuration is immutable once spawned; all per-drag state lives in
/// the accompanying [`TrackedPointer`] component.
///
/// ```rust
/// use bevy::math::Rect;
/// use virtual_joystick::prelude::*;
///
/// let stick = VirtualStick::new(Rect::new(0.0, 400.0, 200.0, 600.0), 100.0, 20.0)
///     .expect("valid stick configuration")
///     .with_axis_mode(AxisMode::Horizontal);
///
/// assert_eq!(stick.max_distance(), 100.0);
/// assert_eq!(stick.axis_mode(), AxisMode::Horizontal);
/// ```
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[must_use]
pub struct VirtualStick {
    /// The activation region, in window coordinates.
    region: Rect,

    /// The radius beyond which displacement is clamped.
    max_distance: f32,

    /// The deadzone applied to displacement magnitudes.
    deadzone: RadialDeadzone,

    /// Which output axes are reported.
    axis_mode: AxisMode,

    /// Seconds for the knob's eased return to center after release.
    return_time: f32,
}

impl VirtualStick {
    /// Creates a stick covering `region`, with displacement clamped at
    /// `max_distance` and magnitudes below `deadzone` ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`StickConfigError`] unless `max_distance > 0` and
    /// `0 <= deadzone < max_distance`.
    pub fn new(region: Rect, max_distance: f32, deadzone: f32) -> Result<Self, StickConfigError> {
        if !(max_distance > 0.0) {
            return Err(StickConfigError::NonPositiveMaxDistance(max_distance));
        }
        if !(0.0..max_distance).contains(&deadzone) {
            return Err(StickConfigError::DeadzoneOutOfRange {
                deadzone,
                max_distance,
            });
        }

        Ok(Self {
            region,
            max_distance,
            deadzone: RadialDeadzone::new(deadzone, max_distance),
            axis_mode: AxisMode::default(),
            return_time: DEFAULT_RETURN_TIME,
        })
    }

    /// Restricts the reported output to the given [`AxisMode`].
    #[inline]
    pub fn with_axis_mode(mut self, axis_mode: AxisMode) -> Self {
        self.axis_mode = axis_mode;
        self
    }

    /// Sets the duration, in seconds, of the knob's eased return to center.
    ///
    /// Non-positive durations snap the knob back instantly.
    #[inline]
    pub fn with_return_time(mut self, seconds: f32) -> Self {
        self.return_time = seconds;
        self
    }

    /// Returns the activation region, in window coordinates.
    #[must_use]
    #[inline]
    pub fn region(&self) -> Rect {
        self.region
    }

    /// Returns the clamping radius.
    #[must_use]
    #[inline]
    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Returns the deadzone processor.
    #[must_use]
    #[inline]
    pub fn deadzone(&self) -> RadialDeadzone {
        self.deadzone
    }

    /// Returns the configured [`AxisMode`].
    #[must_use]
    #[inline]
    pub fn axis_mode(&self) -> AxisMode {
        self.axis_mode
    }

    /// Returns the eased-return duration in seconds.
    #[must_use]
    #[inline]
    pub fn return_time(&self) -> f32 {
        self.return_time
    }

    /// Is `point` inside the activation region?
    #[must_use]
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        self.region.contains(point)
    }

    /// Maps a raw displacement from the drag origin onto the pair of outputs.
    ///
    /// Returns `(knob_offset, value)`:
    ///
    /// - `knob_offset` is the displacement clamped to `max_distance`, with
    ///   restricted axes zeroed. It is **not** deadzone-adjusted, so the knob
    ///   follows the pointer even while the value is still pinned at zero.
    /// - `value` is the deadzone-remapped displacement scaled to
    ///   `[-1.0, 1.0]` per component, restricted axes zeroed, and each
    ///   component rounded to 4 decimal places.
    #[must_use]
    pub fn map_displacement(&self, delta: Vec2) -> (Vec2, Vec2) {
        let distance = delta.length().min(self.max_distance);
        let direction = delta.normalize_or_zero();

        let knob_offset = self.axis_mode.mask(direction * distance);

        let remapped = self.deadzone.remap(distance);
        let value = self.axis_mode.mask(direction * remapped / self.max_distance);
        let value = Vec2::new(round4(value.x), round4(value.y));

        (knob_offset, value)
    }
}

/// One drag in progress on a stick.
///
/// Created when an unclaimed contact goes down inside the activation region,
/// destroyed when the matching contact goes up or is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct DragSession {
    /// The contact owning this drag; move/end notifications from any other
    /// identity are ignored.
    pub pointer: PointerId,

    /// The window-coordinate position where the drag began.
    pub origin: Vec2,
}

/// Tracks whether a stick is idle or mid-drag.
///
/// At most one [`DragSession`] exists per stick at any time: a start
/// notification is accepted only while idle, and further starts are ignored
/// until the active session ends.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Reflect)]
pub struct TrackedPointer(Option<DragSession>);

impl TrackedPointer {
    /// Returns the active session, if a drag is in progress.
    #[must_use]
    #[inline]
    pub fn session(&self) -> Option<&DragSession> {
        self.0.as_ref()
    }

    /// Is a drag in progress?
    #[must_use]
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.0.is_some()
    }

    /// Begins a drag owned by `pointer`, anchored at `origin`.
    #[inline]
    pub(crate) fn begin(&mut self, pointer: PointerId, origin: Vec2) {
        self.0 = Some(DragSession { pointer, origin });
    }

    /// Ends the drag, returning the stick to idle.
    #[inline]
    pub(crate) fn clear(&mut self) {
        self.0 = None;
    }
}

/// How the knob should travel toward its current offset.
#[derive(Default, Debug, Clone, Copy, PartialEq, Reflect)]
pub enum KnobMotion {
    /// Track the pointer with no smoothing; used for every movement during a
    /// drag.
    #[default]
    Instant,

    /// Glide back to center at a fixed speed in pixels per second; used for
    /// the return animation after release.
    Eased {
        /// Pixels per second toward center.
        speed: f32,
    },
}

/// The visual position sink of a stick: where the knob should sit, relative
/// to the stick's center.
///
/// Written on every processed move; [`sync_knob_transform`] mirrors it onto
/// the [`Transform`] of a [`StickKnob`] child, and [`return_knob_to_center`]
/// animates it back to zero after release. Sticks without a knob child are
/// valid: the offset is simply never observed.
///
/// [`sync_knob_transform`]: crate::systems::sync_knob_transform
/// [`return_knob_to_center`]: crate::systems::return_knob_to_center
/// [`Transform`]: bevy::transform::components::Transform
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Reflect)]
pub struct KnobOffset {
    /// The knob's displacement from center, in pixels.
    pub offset: Vec2,

    /// How the knob travels.
    pub motion: KnobMotion,
}

/// Marker for the child entity rendering the stick's knob.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct StickKnob;

/// Emitted synchronously whenever a stick's value changes.
///
/// Delivered with a zero value at the instant a drag starts and again at the
/// instant it ends, and with the computed value on every processed move.
/// Consumers that prefer polling can read the [`StickValue`] component
/// instead; the two always agree.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct StickEvent {
    /// The stick entity this value belongs to.
    pub stick: Entity,

    /// The normalized value, components in `[-1.0, 1.0]`.
    pub value: Vec2,
}

/// Everything a stick entity needs.
///
/// Spawn a [`StickKnob`] child (with a transform) to have the knob follow
/// the drag visually.
#[derive(Bundle, Debug, Clone)]
pub struct VirtualStickBundle {
    /// The immutable stick configuration.
    pub stick: VirtualStick,

    /// The idle/dragging state machine.
    pub tracked: TrackedPointer,

    /// The normalized output value.
    pub value: StickValue,

    /// The knob position sink.
    pub knob: KnobOffset,
}

impl VirtualStickBundle {
    /// Creates the bundle for a validated stick, idle and centered.
    pub fn new(stick: VirtualStick) -> Self {
        Self {
            stick,
            tracked: TrackedPointer::default(),
            value: StickValue::ZERO,
            knob: KnobOffset::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stick() -> VirtualStick {
        VirtualStick::new(Rect::new(0.0, 0.0, 200.0, 200.0), 100.0, 20.0).unwrap()
    }

    #[test]
    fn construction_rejects_bad_configurations() {
        let region = Rect::new(0.0, 0.0, 100.0, 100.0);

        assert_eq!(
            VirtualStick::new(region, 0.0, 0.0),
            Err(StickConfigError::NonPositiveMaxDistance(0.0))
        );
        assert_eq!(
            VirtualStick::new(region, -5.0, 0.0),
            Err(StickConfigError::NonPositiveMaxDistance(-5.0))
        );
        assert_eq!(
            VirtualStick::new(region, 100.0, 100.0),
            Err(StickConfigError::DeadzoneOutOfRange {
                deadzone: 100.0,
                max_distance: 100.0,
            })
        );
        assert_eq!(
            VirtualStick::new(region, 100.0, -1.0),
            Err(StickConfigError::DeadzoneOutOfRange {
                deadzone: -1.0,
                max_distance: 100.0,
            })
        );
    }

    #[test]
    fn construction_accepts_zero_deadzone() {
        let region = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(VirtualStick::new(region, 100.0, 0.0).is_ok());
    }

    #[test]
    fn displacement_saturates_at_max_distance() {
        let stick = stick();

        for delta in [
            Vec2::new(100.0, 0.0),
            Vec2::new(0.0, -250.0),
            Vec2::new(300.0, 400.0),
            Vec2::new(-100.0, -100.0),
        ] {
            let (_, value) = stick.map_displacement(delta);
            let magnitude = value.length();
            assert!(
                (magnitude - 1.0).abs() < 1e-3,
                "expected unit magnitude for {delta}, got {magnitude}"
            );
        }
    }

    #[test]
    fn displacement_inside_deadzone_is_zero_but_moves_the_knob() {
        let stick = stick();

        let (knob_offset, value) = stick.map_displacement(Vec2::new(15.0, 0.0));
        assert_eq!(value, Vec2::ZERO);
        assert_eq!(knob_offset, Vec2::new(15.0, 0.0));
    }

    #[test]
    fn displacement_reference_values() {
        let stick = stick();

        // Clamped to the boundary: full scale.
        let (knob_offset, value) = stick.map_displacement(Vec2::new(100.0, 0.0));
        assert_eq!(knob_offset, Vec2::new(100.0, 0.0));
        assert_eq!(value, Vec2::new(1.0, 0.0));

        // Halfway through the live zone after remapping.
        let (knob_offset, value) = stick.map_displacement(Vec2::new(60.0, 0.0));
        assert_eq!(knob_offset, Vec2::new(60.0, 0.0));
        assert_eq!(value, Vec2::new(0.5, 0.0));
    }

    #[test]
    fn zero_displacement_maps_to_zero() {
        let (knob_offset, value) = stick().map_displacement(Vec2::ZERO);
        assert_eq!(knob_offset, Vec2::ZERO);
        assert_eq!(value, Vec2::ZERO);
    }

    #[test]
    fn value_magnitude_grows_monotonically_across_the_live_zone() {
        let stick = stick();

        let mut previous = 0.0;
        for step in 0..=80 {
            let distance = 20.0 + step as f32;
            let (_, value) = stick.map_displacement(Vec2::new(0.0, distance));
            let magnitude = value.length();
            assert!(
                magnitude >= previous,
                "magnitude regressed at distance {distance}"
            );
            previous = magnitude;
        }
        assert_eq!(previous, 1.0);
    }

    #[test]
    fn axis_restriction_projects_instead_of_rotating() {
        let stick = stick().with_axis_mode(AxisMode::Horizontal);

        // A pure vertical drag reports nothing at all.
        let (knob_offset, value) = stick.map_displacement(Vec2::new(0.0, 80.0));
        assert_eq!(knob_offset, Vec2::ZERO);
        assert_eq!(value, Vec2::ZERO);

        // A diagonal drag reports only its horizontal projection.
        let (_, value) = stick.map_displacement(Vec2::new(60.0, 60.0));
        assert_eq!(value.y, 0.0);
        assert_eq!(value.x, 0.5732);
    }

    #[test]
    fn tracked_pointer_round_trips() {
        let mut tracked = TrackedPointer::default();
        assert!(!tracked.is_dragging());

        tracked.begin(PointerId::Touch(4), Vec2::new(10.0, 20.0));
        assert!(tracked.is_dragging());
        assert_eq!(tracked.session().unwrap().pointer, PointerId::Touch(4));

        tracked.clear();
        assert!(tracked.session().is_none());
    }
}
