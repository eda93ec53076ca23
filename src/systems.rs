//! The systems that drive sticks each frame

use bevy::ecs::prelude::*;
use bevy::input::mouse::MouseButton;
use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::input::ButtonInput;
use bevy::log::warn;
use bevy::prelude::{Children, Local, Time, Transform, Vec2};
use bevy::utils::HashSet;
use bevy::window::CursorMoved;

use crate::axislike::StickValue;
use crate::joystick::{KnobMotion, KnobOffset, StickEvent, StickKnob, TrackedPointer, VirtualStick};
use crate::pointer::{GesturePhase, PointerCandidate, PointerId, PointerNotification};

/// Folds this frame's touch and mouse notifications into one ordered stream
/// and advances every stick's idle/dragging state machine through it.
///
/// Notifications are applied strictly in delivery order, so a contact that
/// lifts and a new one that lands within the same frame hand the stick over
/// rather than orphaning the newcomer.
///
/// Runs in [`PreUpdate`](bevy::app::PreUpdate) after Bevy's
/// [`InputSystem`](bevy::input::InputSystem), so sticks observe the same
/// frame's input state the rest of the app does.
pub fn track_pointers(
    mut touch_events: EventReader<TouchInput>,
    mut cursor_moved_events: EventReader<CursorMoved>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut cursor_position: Local<Option<Vec2>>,
    mut sticks: Query<(
        Entity,
        &VirtualStick,
        &mut TrackedPointer,
        &mut StickValue,
        &mut KnobOffset,
    )>,
    mut stick_events: EventWriter<StickEvent>,
) {
    let notifications = collect_notifications(
        &mut touch_events,
        &mut cursor_moved_events,
        &mouse_buttons,
        &mut cursor_position,
    );
    if notifications.is_empty() {
        return;
    }

    // Contacts claimed by a stick this frame; overlapping regions must not
    // share a pointer.
    let mut claimed: HashSet<PointerId> = HashSet::default();

    for (entity, stick, mut tracked, mut value, mut knob) in sticks.iter_mut() {
        for notification in &notifications {
            let candidate = notification.candidate;
            match notification.phase {
                GesturePhase::Start => {
                    if claimed.contains(&candidate.id) || !stick.contains(candidate.position) {
                        continue;
                    }
                    if tracked.is_dragging() {
                        warn!(
                            "stick {entity:?} ignored start from {:?} while already dragging",
                            candidate.id
                        );
                        continue;
                    }
                    claimed.insert(candidate.id);
                    tracked.begin(candidate.id, candidate.position);
                    *value = StickValue::ZERO;
                    knob.offset = Vec2::ZERO;
                    knob.motion = KnobMotion::Instant;
                    stick_events.send(StickEvent {
                        stick: entity,
                        value: Vec2::ZERO,
                    });
                }
                GesturePhase::Move => {
                    let Some(session) = tracked.session().copied() else {
                        continue;
                    };
                    if candidate.id != session.pointer {
                        continue;
                    }
                    let (knob_offset, mapped) =
                        stick.map_displacement(candidate.position - session.origin);
                    knob.offset = knob_offset;
                    knob.motion = KnobMotion::Instant;
                    value.0 = mapped;
                    stick_events.send(StickEvent {
                        stick: entity,
                        value: mapped,
                    });
                }
                GesturePhase::End => {
                    let Some(session) = tracked.session() else {
                        continue;
                    };
                    if candidate.id != session.pointer {
                        continue;
                    }
                    let release_distance = knob.offset.length();
                    knob.motion = if stick.return_time() > 0.0 {
                        KnobMotion::Eased {
                            speed: release_distance / stick.return_time(),
                        }
                    } else {
                        KnobMotion::Instant
                    };
                    if let KnobMotion::Instant = knob.motion {
                        knob.offset = Vec2::ZERO;
                    }
                    *value = StickValue::ZERO;
                    stick_events.send(StickEvent {
                        stick: entity,
                        value: Vec2::ZERO,
                    });
                    tracked.clear();
                }
            }
        }
    }
}

/// Glides released knobs back to center.
///
/// A knob left in [`KnobMotion::Eased`] state travels toward zero at its
/// recorded speed; once centered it flips back to [`KnobMotion::Instant`],
/// ready for the next drag.
pub fn return_knob_to_center(
    time: Res<Time>,
    mut knobs: Query<&mut KnobOffset, With<VirtualStick>>,
) {
    for mut knob in knobs.iter_mut() {
        let KnobMotion::Eased { speed } = knob.motion else {
            continue;
        };

        let distance = knob.offset.length();
        let step = speed * time.delta_seconds();
        if distance <= step || distance == 0.0 {
            knob.offset = Vec2::ZERO;
            knob.motion = KnobMotion::Instant;
        } else {
            knob.offset = knob.offset / distance * (distance - step);
        }
    }
}

/// Mirrors each stick's [`KnobOffset`] onto the [`Transform`] of its
/// [`StickKnob`] children.
///
/// Sticks without a knob child, and knobs without a [`Transform`], are
/// silently skipped.
pub fn sync_knob_transform(
    sticks: Query<(&KnobOffset, &Children), With<VirtualStick>>,
    mut knobs: Query<&mut Transform, With<StickKnob>>,
) {
    for (knob, children) in sticks.iter() {
        for &child in children.iter() {
            if let Ok(mut transform) = knobs.get_mut(child) {
                transform.translation.x = knob.offset.x;
                transform.translation.y = knob.offset.y;
            }
        }
    }
}

/// Normalizes both of Bevy's pointer sources into one delivery-ordered
/// stream of identified, phase-tagged notifications.
///
/// Touches map directly: each [`TouchInput`] carries an id, a position, and
/// a phase, with [`TouchPhase::Canceled`] folded into [`GesturePhase::End`].
/// The mouse becomes the [`PointerId::Mouse`] contact: pressing the primary
/// button starts it at the last known cursor position, cursor movement while
/// held moves it, and releasing the button ends it. Until the cursor has
/// reported a position at least once, button presses produce no contact.
fn collect_notifications(
    touch_events: &mut EventReader<TouchInput>,
    cursor_moved_events: &mut EventReader<CursorMoved>,
    mouse_buttons: &ButtonInput<MouseButton>,
    cursor_position: &mut Option<Vec2>,
) -> Vec<PointerNotification> {
    let mut notifications = Vec::new();

    for touch in touch_events.read() {
        let phase = match touch.phase {
            TouchPhase::Started => GesturePhase::Start,
            TouchPhase::Moved => GesturePhase::Move,
            TouchPhase::Ended | TouchPhase::Canceled => GesturePhase::End,
        };
        notifications.push(PointerNotification {
            phase,
            candidate: PointerCandidate {
                id: PointerId::Touch(touch.id),
                position: touch.position,
            },
        });
    }

    let pressed = mouse_buttons.pressed(MouseButton::Left);
    let just_pressed = mouse_buttons.just_pressed(MouseButton::Left);
    for moved in cursor_moved_events.read() {
        *cursor_position = Some(moved.position);
        // Movement on the press frame is folded into the starting position.
        if pressed && !just_pressed {
            notifications.push(PointerNotification {
                phase: GesturePhase::Move,
                candidate: PointerCandidate {
                    id: PointerId::Mouse,
                    position: moved.position,
                },
            });
        }
    }

    if let Some(position) = *cursor_position {
        if just_pressed {
            notifications.push(PointerNotification {
                phase: GesturePhase::Start,
                candidate: PointerCandidate {
                    id: PointerId::Mouse,
                    position,
                },
            });
        }
        if mouse_buttons.just_released(MouseButton::Left) {
            notifications.push(PointerNotification {
                phase: GesturePhase::End,
                candidate: PointerCandidate {
                    id: PointerId::Mouse,
                    position,
                },
            });
        }
    }

    notifications
}
