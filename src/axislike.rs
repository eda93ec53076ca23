//! Axis gating and the normalized dual-axis output of a stick

use bevy::prelude::{Component, Reflect, Vec2};
use serde::{Deserialize, Serialize};

/// Restricts which Cartesian axes of a stick report non-zero values.
///
/// Restriction is applied at the output stage: a restricted axis is always
/// exactly `0.0`, never a near-zero residual. The unrestricted axis still
/// receives its projection of the full 2-D displacement, so a diagonal drag
/// under [`AxisMode::Horizontal`] reports only the horizontal component of
/// that drag, not its whole magnitude.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
#[must_use]
pub enum AxisMode {
    /// Both axes are reported.
    #[default]
    Both,

    /// Only the X-axis is reported; Y is forced to `0.0`.
    Horizontal,

    /// Only the Y-axis is reported; X is forced to `0.0`.
    Vertical,
}

impl AxisMode {
    /// Does this mode report the X-axis?
    #[must_use]
    #[inline]
    pub fn allows_x(&self) -> bool {
        matches!(self, Self::Both | Self::Horizontal)
    }

    /// Does this mode report the Y-axis?
    #[must_use]
    #[inline]
    pub fn allows_y(&self) -> bool {
        matches!(self, Self::Both | Self::Vertical)
    }

    /// Zeroes the restricted components of `value`, leaving the rest untouched.
    ///
    /// ```rust
    /// use bevy::prelude::Vec2;
    /// use virtual_joystick::axislike::AxisMode;
    ///
    /// let diagonal = Vec2::new(0.6, -0.8);
    /// assert_eq!(AxisMode::Both.mask(diagonal), diagonal);
    /// assert_eq!(AxisMode::Horizontal.mask(diagonal), Vec2::new(0.6, 0.0));
    /// assert_eq!(AxisMode::Vertical.mask(diagonal), Vec2::new(0.0, -0.8));
    /// ```
    #[must_use]
    #[inline]
    pub fn mask(&self, value: Vec2) -> Vec2 {
        Vec2::new(
            if self.allows_x() { value.x } else { 0.0 },
            if self.allows_y() { value.y } else { 0.0 },
        )
    }
}

/// The current normalized value of a stick.
///
/// Both components always lie in `[-1.0, 1.0]` and are rounded to 4 decimal
/// places. The value is [`StickValue::ZERO`] whenever no drag is in progress,
/// at the instant a drag starts, and at the instant a drag ends.
///
/// Coordinates follow the window convention: positive X is rightward,
/// positive Y is downward.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[must_use]
pub struct StickValue(pub(crate) Vec2);

impl StickValue {
    /// The centered, at-rest value.
    pub const ZERO: Self = Self(Vec2::ZERO);

    /// Returns the value as a [`Vec2`].
    #[must_use]
    #[inline]
    pub fn xy(&self) -> Vec2 {
        self.0
    }

    /// Returns the horizontal component, in `[-1.0, 1.0]`.
    #[must_use]
    #[inline]
    pub fn x(&self) -> f32 {
        self.0.x
    }

    /// Returns the vertical component, in `[-1.0, 1.0]`.
    #[must_use]
    #[inline]
    pub fn y(&self) -> f32 {
        self.0.y
    }
}

/// Rounds `value` to 4 decimal places.
///
/// ```rust
/// use virtual_joystick::axislike::round4;
///
/// assert_eq!(round4(0.123_456), 0.1235);
/// assert_eq!(round4(-0.999_99), -1.0);
/// assert_eq!(round4(0.0), 0.0);
/// ```
#[must_use]
#[inline]
pub fn round4(value: f32) -> f32 {
    (value * 1e4).round() / 1e4
}
