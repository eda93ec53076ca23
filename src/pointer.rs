//! Unified pointer identities and phase-tagged notification streams
//!
//! Bevy reports the mouse through [`ButtonInput`](bevy::input::ButtonInput)
//! plus [`CursorMoved`](bevy::window::CursorMoved) events and touches through
//! [`TouchInput`](bevy::input::touch::TouchInput) events. Sticks do not care
//! which is which: both sources are folded into one stream of identified,
//! phase-tagged notifications in delivery order, and a stick only ever
//! reacts to the notification whose identity matches its active drag.

use bevy::prelude::{Reflect, Vec2};

/// The identity of one contact on the screen.
///
/// Distinguishes simultaneous contacts (the mouse cursor and any number of
/// fingers) so that each stick tracks exactly one of them for the lifetime
/// of a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[must_use]
pub enum PointerId {
    /// The mouse cursor, dragged with the primary button held.
    Mouse,

    /// A single touch contact, identified by the device-assigned id.
    Touch(u64),
}

/// One identified contact position within a frame's notifications.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerCandidate {
    /// Which contact this is.
    pub id: PointerId,

    /// Its position in window coordinates.
    pub position: Vec2,
}

/// The lifecycle phase of a pointer notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// The contact went down.
    Start,

    /// The contact moved while down.
    Move,

    /// The contact went up or was cancelled.
    ///
    /// Loss of a contact without an orderly release (a window-level cancel)
    /// lands here as well, so a terminal notification of any kind drives the
    /// owning stick back to idle.
    End,
}

/// One pointer notification: a phase change of one contact.
///
/// Notifications are processed strictly in delivery order, with no
/// reordering or buffering, so an end followed by a new start within the
/// same frame hands a stick over cleanly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerNotification {
    /// What happened.
    pub phase: GesturePhase,

    /// Which contact it happened to, and where.
    pub candidate: PointerCandidate,
}
