use crate::board::model::{DiscId, OpponentId, PlacedPlayer, PlayerId, RelPoint};

/// Outbound mutation requests. The interaction engine never writes board
/// state itself; it emits these and the owning store applies them. One intent
/// per semantic action, none for no-op transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardIntent {
    PlayerMove { id: PlayerId, to: RelPoint },
    PlayerMoveEnd { id: PlayerId, to: RelPoint },
    /// Drop of a roster-bar drag onto the surface.
    PlayerDrop { player: PlacedPlayer, at: RelPoint },
    PlayerRemove { id: PlayerId },

    OpponentMove { id: OpponentId, to: RelPoint },
    OpponentMoveEnd { id: OpponentId, to: RelPoint },
    OpponentRemove { id: OpponentId },

    DiscMove { id: DiscId, to: RelPoint },
    DiscRemove { id: DiscId },
    DiscToggle { id: DiscId },

    BallMove { to: RelPoint },

    DrawingStart { at: RelPoint },
    DrawingAddPoint { at: RelPoint },
    DrawingEnd,
}
