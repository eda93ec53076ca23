//! Errors produced when configuring a stick

use derive_more::{Display, Error};

/// The stick configuration was rejected at construction.
///
/// A [`VirtualStick`](crate::joystick::VirtualStick) is only ever built from
/// a valid configuration; once constructed, no operation on it can fail.
#[derive(Debug, Clone, Copy, Error, Display, PartialEq)]
pub enum StickConfigError {
    /// `max_distance` must be strictly positive.
    #[display(fmt = "max_distance must be strictly positive (got {})", _0)]
    NonPositiveMaxDistance(#[error(not(source))] f32),

    /// `deadzone` must lie in `[0, max_distance)`.
    #[display(
        fmt = "deadzone {} must lie in [0, max_distance) with max_distance {}",
        deadzone,
        max_distance
    )]
    DeadzoneOutOfRange {
        /// The rejected deadzone radius.
        deadzone: f32,
        /// The configured clamping radius.
        max_distance: f32,
    },
}
