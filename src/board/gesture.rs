use crate::board::coords::PixelPoint;
use crate::board::model::EntityRef;
use crate::board::timer::DelayToken;

/// Second tap on the same target inside this window upgrades to a double-tap.
pub const DOUBLE_TAP_WINDOW_MS: u64 = 300;
/// Press held this long without significant movement fires a long-press.
pub const LONG_PRESS_MS: u64 = 750;
/// Press/release longer than this can no longer count as a tap.
pub const TAP_MAX_MS: u64 = 350;
/// Touch movement past this distance commits a drag/draw or, when the motion
/// is horizontal-dominant on empty ground, hands the gesture to native scroll.
pub const MOVE_SLOP_PX: f32 = 10.0;
/// Movement tolerated before a pending tap/long-press is considered moved.
pub const JITTER_SLOP_PX: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// What the hit test found under the initial press.
#[derive(Debug, Clone, PartialEq)]
pub enum PressTarget {
    Entity(EntityRef),
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Tap { target: PressTarget, at: PixelPoint },
    DoubleTap { target: PressTarget, at: PixelPoint },
    LongPress { target: PressTarget, at: PixelPoint },
    DragStart { entity: EntityRef },
    DragMove { px: PixelPoint },
    DragEnd { px: PixelPoint },
    ScrollPassthrough,
    DrawStart { px: PixelPoint },
    DrawPoint { px: PixelPoint },
    DrawEnd { px: PixelPoint },
}

#[derive(Debug, Clone, PartialEq)]
enum PressState {
    Idle,
    /// Finger/button is down but the gesture has not committed yet; it may
    /// still become a tap, long-press, drag, draw, or scroll.
    Pending {
        origin: PixelPoint,
        down_ms: u64,
        target: PressTarget,
        draw_eligible: bool,
        kind: PointerKind,
    },
    Dragging { last: PixelPoint },
    Drawing { last: PixelPoint },
    /// Gesture handed off to native scrolling; ignore everything until up.
    Scrolling,
    /// Press already produced its one result (long-press); swallow the rest.
    Consumed,
}

#[derive(Debug, Clone, PartialEq)]
struct DeferredTap {
    target: PressTarget,
    at: PixelPoint,
}

/// Turns a raw down/move/up/cancel event sequence into classified gestures.
///
/// All timing comes in as caller-supplied millisecond stamps and both timers
/// are [`DelayToken`]s, so exactly one classification branch fires per press
/// and the whole machine is deterministic under test. `poll` must be called
/// periodically (each frame is fine) for deferred taps and long-presses.
#[derive(Debug)]
pub struct GestureClassifier {
    state: PressState,
    long_press: DelayToken,
    tap_window: DelayToken,
    deferred_tap: Option<DeferredTap>,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self {
            state: PressState::Idle,
            long_press: DelayToken::default(),
            tap_window: DelayToken::default(),
            deferred_tap: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, PressState::Idle)
    }

    pub fn on_down(
        &mut self,
        px: PixelPoint,
        at_ms: u64,
        target: PressTarget,
        draw_eligible: bool,
        kind: PointerKind,
    ) -> Vec<Gesture> {
        let mut out = Vec::new();

        // A second press while a gesture is still live is ignored outright.
        if !matches!(self.state, PressState::Idle) {
            return out;
        }

        // A deferred tap on a different target is independent of this press,
        // release it now so the new press starts clean.
        if self
            .deferred_tap
            .as_ref()
            .map_or(false, |d| d.target != target)
        {
            if let Some(deferred) = self.deferred_tap.take() {
                self.tap_window.cancel();
                out.push(Gesture::Tap {
                    target: deferred.target,
                    at: deferred.at,
                });
            }
        }

        // Mouse presses on empty ground begin the stroke immediately; touch
        // presses stay pending until movement rules out a scroll.
        if kind == PointerKind::Mouse && target == PressTarget::Empty && draw_eligible {
            self.state = PressState::Drawing { last: px };
            out.push(Gesture::DrawStart { px });
            return out;
        }

        self.long_press.arm(at_ms, LONG_PRESS_MS);
        self.state = PressState::Pending {
            origin: px,
            down_ms: at_ms,
            target,
            draw_eligible,
            kind,
        };
        out
    }

    pub fn on_move(&mut self, px: PixelPoint, _at_ms: u64) -> Vec<Gesture> {
        let mut out = Vec::new();
        match &mut self.state {
            PressState::Pending {
                origin,
                target,
                draw_eligible,
                kind,
                ..
            } => {
                let dx = px.x - origin.x;
                let dy = px.y - origin.y;
                let dist_sq = dx * dx + dy * dy;

                if dist_sq > JITTER_SLOP_PX * JITTER_SLOP_PX {
                    self.long_press.cancel();
                }

                match target {
                    PressTarget::Entity(entity) => {
                        if dist_sq > JITTER_SLOP_PX * JITTER_SLOP_PX {
                            let entity = entity.clone();
                            self.state = PressState::Dragging { last: px };
                            out.push(Gesture::DragStart { entity });
                            out.push(Gesture::DragMove { px });
                        }
                    }
                    PressTarget::Empty => {
                        if dist_sq > MOVE_SLOP_PX * MOVE_SLOP_PX {
                            let horizontal = dx.abs() > dy.abs();
                            if *kind == PointerKind::Touch && horizontal {
                                self.state = PressState::Scrolling;
                                out.push(Gesture::ScrollPassthrough);
                            } else if *draw_eligible {
                                let start = *origin;
                                self.state = PressState::Drawing { last: px };
                                out.push(Gesture::DrawStart { px: start });
                                out.push(Gesture::DrawPoint { px });
                            } else if *kind == PointerKind::Touch {
                                self.state = PressState::Scrolling;
                                out.push(Gesture::ScrollPassthrough);
                            }
                        }
                    }
                }
            }
            PressState::Dragging { last } => {
                *last = px;
                out.push(Gesture::DragMove { px });
            }
            PressState::Drawing { last } => {
                *last = px;
                out.push(Gesture::DrawPoint { px });
            }
            PressState::Idle | PressState::Scrolling | PressState::Consumed => {}
        }
        out
    }

    pub fn on_up(&mut self, px: PixelPoint, at_ms: u64) -> Vec<Gesture> {
        let mut out = Vec::new();
        let state = std::mem::replace(&mut self.state, PressState::Idle);
        self.long_press.cancel();

        match state {
            PressState::Pending {
                origin,
                down_ms,
                target,
                ..
            } => {
                let dx = px.x - origin.x;
                let dy = px.y - origin.y;
                let moved = dx * dx + dy * dy > JITTER_SLOP_PX * JITTER_SLOP_PX;
                let quick = at_ms.saturating_sub(down_ms) < TAP_MAX_MS;
                if moved || !quick {
                    return out;
                }

                match self.deferred_tap.take() {
                    Some(deferred) if deferred.target == target && self.tap_window.is_live(at_ms) => {
                        // Second qualifying tap inside the window: the first
                        // tap never fires on its own.
                        self.tap_window.cancel();
                        out.push(Gesture::DoubleTap { target, at: px });
                    }
                    stale => {
                        if let Some(stale) = stale {
                            // Window already lapsed but poll hasn't run yet.
                            self.tap_window.cancel();
                            out.push(Gesture::Tap {
                                target: stale.target,
                                at: stale.at,
                            });
                        }
                        self.tap_window.arm(at_ms, DOUBLE_TAP_WINDOW_MS);
                        self.deferred_tap = Some(DeferredTap { target, at: px });
                    }
                }
            }
            PressState::Dragging { .. } => out.push(Gesture::DragEnd { px }),
            PressState::Drawing { .. } => out.push(Gesture::DrawEnd { px }),
            PressState::Idle | PressState::Scrolling | PressState::Consumed => {}
        }
        out
    }

    /// Host-cancelled pointer (`pointercancel`/`touchcancel`). Committed
    /// drags and draws end exactly as a release would; a pending press is
    /// discarded without firing anything.
    pub fn on_cancel(&mut self) -> Vec<Gesture> {
        let mut out = Vec::new();
        let state = std::mem::replace(&mut self.state, PressState::Idle);
        self.long_press.cancel();

        match state {
            PressState::Dragging { last } => out.push(Gesture::DragEnd { px: last }),
            PressState::Drawing { last } => out.push(Gesture::DrawEnd { px: last }),
            _ => {}
        }
        out
    }

    /// Drives the two deferred branches: the tap whose double-tap window
    /// lapsed, and the long-press deadline.
    pub fn poll(&mut self, at_ms: u64) -> Vec<Gesture> {
        let mut out = Vec::new();

        if self.tap_window.fire(at_ms) {
            if let Some(deferred) = self.deferred_tap.take() {
                out.push(Gesture::Tap {
                    target: deferred.target,
                    at: deferred.at,
                });
            }
        }

        if self.long_press.fire(at_ms) {
            if let PressState::Pending { origin, target, .. } = &self.state {
                out.push(Gesture::LongPress {
                    target: target.clone(),
                    at: *origin,
                });
                self.state = PressState::Consumed;
            }
        }

        out
    }
}
