use crate::board::coords::{to_relative, PixelPoint, SurfaceSize};
use crate::board::gesture::{Gesture, PressTarget};
use crate::board::intents::BoardIntent;
use crate::board::model::{BoardSnapshot, EntityClass, EntityRef, PlacedPlayer, RelPoint};
use tracing::{debug, trace};

/// Everything the state machine needs to know about the world at the moment a
/// gesture arrives. Built fresh per event; mode flags are never cached across
/// events, so an external mode flip applies to the very next gesture.
#[derive(Debug, Clone, Copy)]
pub struct BoardCtx<'a> {
    pub snapshot: &'a BoardSnapshot,
    pub size: SurfaceSize,
    pub tactics_view: bool,
    /// Policy flag: allow freehand drawing while the tactics view is active.
    pub draw_in_tactics: bool,
}

impl BoardCtx<'_> {
    pub fn draw_eligible(&self) -> bool {
        !self.tactics_view || self.draw_in_tactics
    }

    fn class_interactive(&self, class: EntityClass) -> bool {
        match class {
            EntityClass::Ball | EntityClass::Disc => self.tactics_view,
            EntityClass::Player | EntityClass::Opponent => !self.tactics_view,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum EngineState {
    Idle,
    DraggingPlayer { id: crate::board::model::PlayerId, moved: bool },
    DraggingOpponent { id: crate::board::model::OpponentId, moved: bool },
    DraggingTacticalDisc { id: crate::board::model::DiscId, moved: bool },
    DraggingBall { moved: bool },
    Drawing,
    /// Touch drag that started on the external roster bar; resolves on drop.
    PendingBarDrag { player: PlacedPlayer },
}

/// Central controller: consumes classified gestures plus the current board
/// context and emits [`BoardIntent`]s. Holds no authoritative state — only
/// the identity of the in-flight drag and its optimistic position.
#[derive(Debug)]
pub struct InteractionEngine {
    state: EngineState,
    optimistic: Option<(EntityRef, RelPoint)>,
    last_interacted: Option<EntityClass>,
}

impl Default for InteractionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionEngine {
    pub fn new() -> Self {
        Self {
            state: EngineState::Idle,
            optimistic: None,
            last_interacted: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, EngineState::Idle)
    }

    /// Optimistic position of the entity currently under drag, if any. The
    /// renderer substitutes this for the store's (possibly lagging) value;
    /// it is discarded the moment the drag resolves.
    pub fn optimistic(&self) -> Option<(&EntityRef, RelPoint)> {
        self.optimistic.as_ref().map(|(e, p)| (e, *p))
    }

    /// Class of the entity the user touched most recently; feeds hit-test
    /// tie-breaking so repeated pickups on a crowded board stay predictable.
    pub fn last_interacted(&self) -> Option<EntityClass> {
        self.last_interacted
    }

    pub fn handle(&mut self, gesture: Gesture, ctx: &BoardCtx<'_>) -> Vec<BoardIntent> {
        match gesture {
            Gesture::DragStart { entity } => self.drag_start(entity, ctx),
            Gesture::DragMove { px } => self.drag_move(px, ctx),
            Gesture::DragEnd { px } => self.drag_end(px, ctx),
            Gesture::DrawStart { px } => self.draw_start(px, ctx),
            Gesture::DrawPoint { px } => self.draw_point(px, ctx),
            Gesture::DrawEnd { px } => self.draw_end(px, ctx),
            Gesture::Tap { target, .. } => self.tap(target, ctx),
            Gesture::DoubleTap { target, .. } => self.double_tap(target, ctx),
            Gesture::LongPress { target, .. } => self.long_press(target, ctx),
            Gesture::ScrollPassthrough => {
                trace!("gesture handed to native scroll");
                Vec::new()
            }
        }
    }

    /// Registers a drag that originated on the external roster bar. Ignored
    /// while any on-surface gesture is live.
    pub fn begin_bar_drag(&mut self, player: PlacedPlayer) {
        if matches!(self.state, EngineState::Idle) {
            debug!(player = %player.id.0, "bar drag pending");
            self.state = EngineState::PendingBarDrag { player };
        }
    }

    pub fn drop_bar_drag(&mut self, px: PixelPoint, ctx: &BoardCtx<'_>) -> Vec<BoardIntent> {
        let state = std::mem::replace(&mut self.state, EngineState::Idle);
        match state {
            EngineState::PendingBarDrag { player } => {
                let at = to_relative(px, ctx.size);
                self.last_interacted = Some(EntityClass::Player);
                vec![BoardIntent::PlayerDrop { player, at }]
            }
            other => {
                self.state = other;
                Vec::new()
            }
        }
    }

    pub fn cancel_bar_drag(&mut self) {
        if matches!(self.state, EngineState::PendingBarDrag { .. }) {
            self.state = EngineState::Idle;
        }
    }

    fn drag_start(&mut self, entity: EntityRef, ctx: &BoardCtx<'_>) -> Vec<BoardIntent> {
        if !matches!(self.state, EngineState::Idle) {
            return Vec::new();
        }
        if !ctx.class_interactive(entity.class()) {
            return Vec::new();
        }

        // Entity gone between hit test and gesture delivery: stay idle.
        let current = match &entity {
            EntityRef::Player(id) => ctx.snapshot.player(id).map(|p| p.pos),
            EntityRef::Opponent(id) => ctx.snapshot.opponent(id).map(|o| o.pos),
            EntityRef::Disc(id) => ctx.snapshot.disc(id).map(|d| d.pos),
            EntityRef::Ball => ctx.snapshot.ball,
        };
        let Some(current) = current else {
            return Vec::new();
        };

        debug!(?entity, "drag start");
        self.last_interacted = Some(entity.class());
        self.optimistic = Some((entity.clone(), current));
        self.state = match entity {
            EntityRef::Player(id) => EngineState::DraggingPlayer { id, moved: false },
            EntityRef::Opponent(id) => EngineState::DraggingOpponent { id, moved: false },
            EntityRef::Disc(id) => EngineState::DraggingTacticalDisc { id, moved: false },
            EntityRef::Ball => EngineState::DraggingBall { moved: false },
        };
        Vec::new()
    }

    fn drag_move(&mut self, px: PixelPoint, ctx: &BoardCtx<'_>) -> Vec<BoardIntent> {
        let to = to_relative(px, ctx.size);
        match &mut self.state {
            EngineState::DraggingPlayer { id, moved } => {
                if ctx.snapshot.player(id).is_none() {
                    return self.abandon_drag();
                }
                *moved = true;
                let id = id.clone();
                self.optimistic = Some((EntityRef::Player(id.clone()), to));
                vec![BoardIntent::PlayerMove { id, to }]
            }
            EngineState::DraggingOpponent { id, moved } => {
                if ctx.snapshot.opponent(id).is_none() {
                    return self.abandon_drag();
                }
                *moved = true;
                let id = id.clone();
                self.optimistic = Some((EntityRef::Opponent(id.clone()), to));
                vec![BoardIntent::OpponentMove { id, to }]
            }
            EngineState::DraggingTacticalDisc { id, moved } => {
                if ctx.snapshot.disc(id).is_none() {
                    return self.abandon_drag();
                }
                *moved = true;
                let id = id.clone();
                self.optimistic = Some((EntityRef::Disc(id.clone()), to));
                vec![BoardIntent::DiscMove { id, to }]
            }
            EngineState::DraggingBall { moved } => {
                if ctx.snapshot.ball.is_none() {
                    return self.abandon_drag();
                }
                *moved = true;
                self.optimistic = Some((EntityRef::Ball, to));
                vec![BoardIntent::BallMove { to }]
            }
            // Late or out-of-order move: absorb silently.
            _ => Vec::new(),
        }
    }

    fn drag_end(&mut self, px: PixelPoint, ctx: &BoardCtx<'_>) -> Vec<BoardIntent> {
        let to = to_relative(px, ctx.size);
        let state = std::mem::replace(&mut self.state, EngineState::Idle);
        self.optimistic = None;

        // A drag that never produced a move ends silently; move-end only
        // closes out an actual movement stream.
        match state {
            EngineState::DraggingPlayer { id, moved } => {
                if moved && ctx.snapshot.player(&id).is_some() {
                    debug!(player = %id.0, "drag end");
                    return vec![BoardIntent::PlayerMoveEnd { id, to }];
                }
            }
            EngineState::DraggingOpponent { id, moved } => {
                if moved && ctx.snapshot.opponent(&id).is_some() {
                    return vec![BoardIntent::OpponentMoveEnd { id, to }];
                }
            }
            // Discs and the ball have no end-of-move action in the outbound
            // contract; their last move intent already carries the final spot.
            EngineState::DraggingTacticalDisc { .. } | EngineState::DraggingBall { .. } => {}
            EngineState::Drawing | EngineState::PendingBarDrag { .. } | EngineState::Idle => {}
        }
        Vec::new()
    }

    fn draw_start(&mut self, px: PixelPoint, ctx: &BoardCtx<'_>) -> Vec<BoardIntent> {
        if !matches!(self.state, EngineState::Idle) {
            return Vec::new();
        }
        // Re-checked here, not just in the classifier: the flag is read at
        // gesture arrival time.
        if !ctx.draw_eligible() {
            return Vec::new();
        }
        debug!("draw start");
        self.state = EngineState::Drawing;
        vec![BoardIntent::DrawingStart {
            at: to_relative(px, ctx.size),
        }]
    }

    fn draw_point(&mut self, px: PixelPoint, ctx: &BoardCtx<'_>) -> Vec<BoardIntent> {
        if !matches!(self.state, EngineState::Drawing) {
            return Vec::new();
        }
        vec![BoardIntent::DrawingAddPoint {
            at: to_relative(px, ctx.size),
        }]
    }

    fn draw_end(&mut self, _px: PixelPoint, _ctx: &BoardCtx<'_>) -> Vec<BoardIntent> {
        if !matches!(self.state, EngineState::Drawing) {
            return Vec::new();
        }
        self.state = EngineState::Idle;
        vec![BoardIntent::DrawingEnd]
    }

    fn tap(&mut self, target: PressTarget, ctx: &BoardCtx<'_>) -> Vec<BoardIntent> {
        if !matches!(self.state, EngineState::Idle) {
            return Vec::new();
        }
        match target {
            PressTarget::Entity(EntityRef::Disc(id)) if ctx.tactics_view => {
                if ctx.snapshot.disc(&id).is_none() {
                    return Vec::new();
                }
                self.last_interacted = Some(EntityClass::Disc);
                vec![BoardIntent::DiscToggle { id }]
            }
            // Taps elsewhere are selection-only; selection lives in the host.
            _ => Vec::new(),
        }
    }

    fn double_tap(&mut self, target: PressTarget, ctx: &BoardCtx<'_>) -> Vec<BoardIntent> {
        if !matches!(self.state, EngineState::Idle) {
            return Vec::new();
        }
        match target {
            PressTarget::Entity(EntityRef::Player(id))
                if !ctx.tactics_view && ctx.snapshot.player(&id).is_some() =>
            {
                debug!(player = %id.0, "double tap remove");
                vec![BoardIntent::PlayerRemove { id }]
            }
            PressTarget::Entity(EntityRef::Opponent(id))
                if !ctx.tactics_view && ctx.snapshot.opponent(&id).is_some() =>
            {
                vec![BoardIntent::OpponentRemove { id }]
            }
            _ => Vec::new(),
        }
    }

    // Touch-path removal: long-press mirrors double-tap for players and
    // opponents and additionally removes discs in the tactics view. The ball
    // is never removed by gesture.
    fn long_press(&mut self, target: PressTarget, ctx: &BoardCtx<'_>) -> Vec<BoardIntent> {
        if !matches!(self.state, EngineState::Idle) {
            return Vec::new();
        }
        match target {
            PressTarget::Entity(EntityRef::Player(id))
                if !ctx.tactics_view && ctx.snapshot.player(&id).is_some() =>
            {
                vec![BoardIntent::PlayerRemove { id }]
            }
            PressTarget::Entity(EntityRef::Opponent(id))
                if !ctx.tactics_view && ctx.snapshot.opponent(&id).is_some() =>
            {
                vec![BoardIntent::OpponentRemove { id }]
            }
            PressTarget::Entity(EntityRef::Disc(id))
                if ctx.tactics_view && ctx.snapshot.disc(&id).is_some() =>
            {
                vec![BoardIntent::DiscRemove { id }]
            }
            _ => Vec::new(),
        }
    }

    fn abandon_drag(&mut self) -> Vec<BoardIntent> {
        debug!("dragged entity vanished, abandoning drag");
        self.state = EngineState::Idle;
        self.optimistic = None;
        Vec::new()
    }
}
