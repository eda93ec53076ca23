//! Radial deadzone remapping in pointer-space units

use bevy::prelude::Reflect;
use serde::{Deserialize, Serialize};

/// A circular deadzone that rescales the live range back to full scale.
///
/// Displacement magnitudes below `radius` collapse to `0.0`; magnitudes in
/// `[radius, max_distance]` are linearly rescaled onto `[0.0, max_distance]`,
/// so the output reaches full scale exactly at `max_distance` instead of
/// saturating early:
///
/// ```text
/// remap(d) = max_distance / (max_distance - radius) * (d - radius)
/// ```
///
/// The live-zone scale is precomputed at construction, which is also where
/// the `radius < max_distance` requirement is enforced (see
/// [`VirtualStick::new`](crate::joystick::VirtualStick::new)).
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[must_use]
pub struct RadialDeadzone {
    /// Magnitudes below this radius are treated as input noise.
    radius: f32,

    /// Precomputed `max_distance / (max_distance - radius)`.
    livezone_scale: f32,
}

impl RadialDeadzone {
    /// Creates a deadzone of the given `radius` inside a reachable range of
    /// `max_distance`.
    ///
    /// Callers must ensure `0.0 <= radius < max_distance`.
    #[inline]
    pub(crate) fn new(radius: f32, max_distance: f32) -> Self {
        Self {
            radius,
            livezone_scale: max_distance / (max_distance - radius),
        }
    }

    /// Returns the deadzone radius, in the same unit as pointer coordinates.
    #[must_use]
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Remaps a displacement magnitude into the live zone.
    ///
    /// Returns `0.0` for magnitudes below the radius, and the linearly
    /// rescaled magnitude otherwise. For `distance <= max_distance` the
    /// result never exceeds `max_distance`.
    #[must_use]
    #[inline]
    pub fn remap(&self, distance: f32) -> f32 {
        if distance < self.radius {
            0.0
        } else {
            (distance - self.radius) * self.livezone_scale
        }
    }
}
