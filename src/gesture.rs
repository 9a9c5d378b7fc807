//! Gesture interpretation.
//!
//! A small state machine over discrete pointer events: `Idle` while nothing
//! touches the screen, `Tracking` from first contact until every pointer is
//! released or the sequence is cancelled. Deltas are always cumulative since
//! the start of the current gesture segment, so applying them against a
//! snapshot of the transform taken at segment start cannot drift no matter
//! how many move events arrive.
//!
//! Changing the number of active fingers ends the current segment and begins
//! a new one; a new segment always measures from the model's current
//! transform, never from a stale snapshot.

use cgmath::Deg;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, TouchPhase, WindowEvent},
};

/// A platform-neutral pointer event. Touch and mouse input both reduce to
/// this; see [`WinitPointerAdapter`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down { id: u64, x: f32, y: f32 },
    Move { id: u64, x: f32, y: f32 },
    Up { id: u64 },
    Cancel,
}

/// Updates emitted by the interpreter.
///
/// `Rotate` and `Scale` carry cumulative values measured from the start of
/// the current gesture segment; the consumer applies them against whatever
/// snapshot it took on `Began`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureUpdate {
    Began,
    Rotate { yaw: Deg<f32>, pitch: Deg<f32> },
    Scale { ratio: f32 },
    Ended,
}

#[derive(Clone, Copy, Debug)]
struct Pointer {
    id: u64,
    x: f32,
    y: f32,
}

#[derive(Clone, Copy, Debug)]
enum Anchor {
    /// One-finger drag: screen position at segment start.
    Drag { x: f32, y: f32 },
    /// Two-finger pinch: finger distance at segment start.
    Pinch { distance: f32 },
    /// Three or more fingers: tracked but interpreted as nothing.
    Overflow,
}

pub struct GestureInterpreter {
    sensitivity: Deg<f32>,
    rotation_enabled: bool,
    scale_enabled: bool,
    pointers: Vec<Pointer>,
    anchor: Option<Anchor>,
}

impl GestureInterpreter {
    pub fn new(sensitivity: Deg<f32>, rotation_enabled: bool, scale_enabled: bool) -> Self {
        Self {
            sensitivity,
            rotation_enabled,
            scale_enabled,
            pointers: Vec::new(),
            anchor: None,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.anchor.is_some()
    }

    /// Feed one pointer event through the state machine and collect the
    /// resulting updates.
    pub fn handle(&mut self, event: PointerEvent) -> Vec<GestureUpdate> {
        let mut out = Vec::new();
        match event {
            PointerEvent::Down { id, x, y } => {
                if self.pointers.iter().any(|p| p.id == id) {
                    log::warn!("pointer {id} went down twice without going up");
                    return out;
                }
                self.pointers.push(Pointer { id, x, y });
                self.rebase(&mut out);
            }
            PointerEvent::Move { id, x, y } => {
                let Some(pointer) = self.pointers.iter_mut().find(|p| p.id == id) else {
                    // Hover movement of an unpressed pointer.
                    return out;
                };
                pointer.x = x;
                pointer.y = y;
                self.emit_delta(&mut out);
            }
            PointerEvent::Up { id } => {
                self.pointers.retain(|p| p.id != id);
                self.rebase(&mut out);
            }
            PointerEvent::Cancel => {
                self.pointers.clear();
                self.rebase(&mut out);
            }
        }
        out
    }

    /// End the current segment (if any) and start a new one matching the
    /// current finger count.
    fn rebase(&mut self, out: &mut Vec<GestureUpdate>) {
        if self.anchor.take().is_some() {
            out.push(GestureUpdate::Ended);
        }
        self.anchor = match self.pointers.as_slice() {
            [] => None,
            [p] => Some(Anchor::Drag { x: p.x, y: p.y }),
            [a, b] => Some(Anchor::Pinch {
                distance: distance(a, b).max(f32::EPSILON),
            }),
            _ => Some(Anchor::Overflow),
        };
        if self.anchor.is_some() {
            out.push(GestureUpdate::Began);
        }
    }

    fn emit_delta(&self, out: &mut Vec<GestureUpdate>) {
        match (self.anchor, self.pointers.as_slice()) {
            (Some(Anchor::Drag { x, y }), [p]) => {
                if self.rotation_enabled {
                    // Horizontal drag maps to yaw, vertical to pitch.
                    out.push(GestureUpdate::Rotate {
                        yaw: self.sensitivity * (p.x - x),
                        pitch: self.sensitivity * (p.y - y),
                    });
                }
            }
            (Some(Anchor::Pinch { distance: start }), [a, b]) => {
                if self.scale_enabled {
                    out.push(GestureUpdate::Scale {
                        ratio: distance(a, b) / start,
                    });
                }
            }
            _ => {}
        }
    }
}

fn distance(a: &Pointer, b: &Pointer) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Translates winit window events into [`PointerEvent`]s.
///
/// Touch input carries its own finger ids; mouse input is folded into a
/// single synthetic pointer whose position has to be remembered across
/// events because `MouseInput` carries none.
#[derive(Default)]
pub struct WinitPointerAdapter {
    cursor: Option<PhysicalPosition<f64>>,
    mouse_down: bool,
}

/// Synthetic pointer id used for the mouse.
const MOUSE_POINTER_ID: u64 = u64::MAX;

impl WinitPointerAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(&mut self, event: &WindowEvent) -> Option<PointerEvent> {
        match event {
            WindowEvent::Touch(touch) => Some(match touch.phase {
                TouchPhase::Started => PointerEvent::Down {
                    id: touch.id,
                    x: touch.location.x as f32,
                    y: touch.location.y as f32,
                },
                TouchPhase::Moved => PointerEvent::Move {
                    id: touch.id,
                    x: touch.location.x as f32,
                    y: touch.location.y as f32,
                },
                TouchPhase::Ended => PointerEvent::Up { id: touch.id },
                TouchPhase::Cancelled => PointerEvent::Cancel,
            }),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some(*position);
                self.mouse_down.then(|| PointerEvent::Move {
                    id: MOUSE_POINTER_ID,
                    x: position.x as f32,
                    y: position.y as f32,
                })
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match (state, self.cursor) {
                (ElementState::Pressed, Some(position)) => {
                    self.mouse_down = true;
                    Some(PointerEvent::Down {
                        id: MOUSE_POINTER_ID,
                        x: position.x as f32,
                        y: position.y as f32,
                    })
                }
                (ElementState::Released, _) => {
                    self.mouse_down = false;
                    Some(PointerEvent::Up {
                        id: MOUSE_POINTER_ID,
                    })
                }
                _ => None,
            },
            _ => None,
        }
    }
}
