//! Contains the main plugin exported by this crate.

use bevy::app::{App, Plugin, PreUpdate};
use bevy::ecs::prelude::*;
use bevy::input::InputSystem;
use bevy::window::CursorMoved;

use crate::joystick::StickEvent;
use crate::systems;

/// A [`Plugin`] that turns pointer drags over
/// [`VirtualStick`](crate::joystick::VirtualStick) regions into normalized
/// dual-axis values.
///
/// Spawn stick entities with a
/// [`VirtualStickBundle`](crate::joystick::VirtualStickBundle); the plugin
/// does the rest:
///
/// - [`track_pointers`](systems::track_pointers) folds touch and mouse input
///   into one delivery-ordered stream and advances each stick's state
///   machine, updating [`StickValue`](crate::axislike::StickValue) and
///   emitting [`StickEvent`]s.
/// - [`return_knob_to_center`](systems::return_knob_to_center) animates
///   released knobs back to rest.
/// - [`sync_knob_transform`](systems::sync_knob_transform) mirrors each
///   stick's knob offset onto its
///   [`StickKnob`](crate::joystick::StickKnob) children.
///
/// All three run during [`PreUpdate`], after Bevy's [`InputSystem`], in the
/// order listed; by the time `Update` systems run, every stick reflects this
/// frame's input.
#[derive(Default)]
pub struct VirtualStickPlugin;

impl Plugin for VirtualStickPlugin {
    fn build(&self, app: &mut App) {
        // CursorMoved is normally registered by WindowPlugin; headless apps
        // built on MinimalPlugins + InputPlugin lack it. add_event is a
        // no-op when the event already exists.
        app.add_event::<CursorMoved>()
            .add_event::<StickEvent>()
            .add_systems(
                PreUpdate,
                (
                    systems::track_pointers
                        .in_set(StickSystem::Track)
                        .after(InputSystem),
                    systems::return_knob_to_center
                        .in_set(StickSystem::Animate)
                        .after(StickSystem::Track),
                    systems::sync_knob_transform
                        .in_set(StickSystem::Sync)
                        .after(StickSystem::Animate),
                ),
            );
    }
}

/// [`SystemSet`]s for the systems added by [`VirtualStickPlugin`].
///
/// `Track` must run before `Animate`, and `Animate` before `Sync`.
#[derive(SystemSet, Clone, Copy, Hash, Debug, PartialEq, Eq)]
pub enum StickSystem {
    /// Advances the idle/dragging state machines from this frame's pointer
    /// notifications.
    Track,

    /// Eases released knobs back toward center.
    Animate,

    /// Copies knob offsets onto knob child transforms.
    Sync,
}
