#![forbid(missing_docs)]
#![forbid(unsafe_code)]
#![warn(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

pub mod axislike;
pub mod deadzone;
pub mod errors;
pub mod joystick;
pub mod plugin;
pub mod pointer;
pub mod systems;

/// Everything you need to get started
pub mod prelude {
    pub use crate::axislike::{AxisMode, StickValue};
    pub use crate::deadzone::RadialDeadzone;
    pub use crate::errors::StickConfigError;
    pub use crate::joystick::{
        DragSession, KnobMotion, KnobOffset, StickEvent, StickKnob, TrackedPointer, VirtualStick,
        VirtualStickBundle,
    };
    pub use crate::plugin::{StickSystem, VirtualStickPlugin};
    pub use crate::pointer::{GesturePhase, PointerCandidate, PointerId, PointerNotification};
}
