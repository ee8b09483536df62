use crate::board::intents::BoardIntent;
use crate::board::model::{
    BoardSnapshot, DiscId, DiscKind, Drawing, Opponent, OpponentId, PlacedPlayer, RelPoint,
    TacticalDisc,
};
use tracing::warn;

/// Authoritative board state plus the reducer that applies intents. This is
/// the "external store" side of the contract: the interaction engine only
/// ever sees `snapshot()` and emits [`BoardIntent`]s back at it.
#[derive(Debug, Default)]
pub struct BoardStore {
    snapshot: BoardSnapshot,
    live_stroke: Option<Drawing>,
    next_id: u64,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &BoardSnapshot {
        &self.snapshot
    }

    pub fn snapshot_mut(&mut self) -> &mut BoardSnapshot {
        &mut self.snapshot
    }

    /// The stroke currently being drawn, if any. Rendered on top of the
    /// finalized drawings; moved into the snapshot on `DrawingEnd`.
    pub fn live_stroke(&self) -> Option<&Drawing> {
        self.live_stroke.as_ref()
    }

    pub fn apply(&mut self, intent: BoardIntent) {
        match intent {
            BoardIntent::PlayerMove { id, to } | BoardIntent::PlayerMoveEnd { id, to } => {
                match self.snapshot.players.iter_mut().find(|p| p.id == id) {
                    Some(player) => player.pos = to.clamped(),
                    None => warn!(player = %id.0, "move for unknown player ignored"),
                }
            }
            BoardIntent::PlayerDrop { mut player, at } => {
                player.pos = at.clamped();
                // Re-dropping an already placed player relocates it.
                self.snapshot.players.retain(|p| p.id != player.id);
                self.snapshot.players.push(player);
            }
            BoardIntent::PlayerRemove { id } => {
                self.snapshot.players.retain(|p| p.id != id);
            }
            BoardIntent::OpponentMove { id, to } | BoardIntent::OpponentMoveEnd { id, to } => {
                match self.snapshot.opponents.iter_mut().find(|o| o.id == id) {
                    Some(opponent) => opponent.pos = to.clamped(),
                    None => warn!(opponent = %id.0, "move for unknown opponent ignored"),
                }
            }
            BoardIntent::OpponentRemove { id } => {
                self.snapshot.opponents.retain(|o| o.id != id);
            }
            BoardIntent::DiscMove { id, to } => {
                if let Some(disc) = self.snapshot.discs.iter_mut().find(|d| d.id == id) {
                    disc.pos = to.clamped();
                }
            }
            BoardIntent::DiscRemove { id } => {
                self.snapshot.discs.retain(|d| d.id != id);
            }
            BoardIntent::DiscToggle { id } => {
                if let Some(disc) = self.snapshot.discs.iter_mut().find(|d| d.id == id) {
                    disc.kind = disc.kind.toggled();
                }
            }
            BoardIntent::BallMove { to } => {
                self.snapshot.ball = Some(to.clamped());
            }
            BoardIntent::DrawingStart { at } => {
                self.live_stroke = Some(Drawing {
                    points: vec![at.clamped()],
                });
            }
            BoardIntent::DrawingAddPoint { at } => {
                match self.live_stroke.as_mut() {
                    Some(stroke) => stroke.points.push(at.clamped()),
                    None => warn!("drawing point with no stroke in progress ignored"),
                }
            }
            BoardIntent::DrawingEnd => {
                if let Some(stroke) = self.live_stroke.take() {
                    self.snapshot.drawings.push(stroke);
                }
            }
        }
    }

    pub fn apply_all(&mut self, intents: impl IntoIterator<Item = BoardIntent>) {
        for intent in intents {
            self.apply(intent);
        }
    }

    // Roster-side helpers used by the host shell.

    pub fn add_opponent(&mut self, at: RelPoint) -> OpponentId {
        let id = OpponentId(format!("opp-{}", self.bump_id()));
        self.snapshot.opponents.push(Opponent {
            id: id.clone(),
            pos: at.clamped(),
        });
        id
    }

    pub fn add_disc(&mut self, at: RelPoint, kind: DiscKind) -> DiscId {
        let id = DiscId(format!("disc-{}", self.bump_id()));
        self.snapshot.discs.push(TacticalDisc {
            id: id.clone(),
            pos: at.clamped(),
            kind,
        });
        id
    }

    pub fn place_ball(&mut self, at: RelPoint) {
        self.snapshot.ball = Some(at.clamped());
    }

    pub fn remove_ball(&mut self) {
        self.snapshot.ball = None;
    }

    pub fn place_player(&mut self, player: PlacedPlayer) {
        self.apply(BoardIntent::PlayerDrop {
            at: player.pos,
            player,
        });
    }

    pub fn clear_drawings(&mut self) {
        self.live_stroke = None;
        self.snapshot.drawings.clear();
    }

    fn bump_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}
