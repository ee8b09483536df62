use serde::{Deserialize, Serialize};

/// Normalized board position. Both axes live in `[0, 1]` relative to the
/// interactive surface, so entity data survives any resize unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelPoint {
    pub x: f32,
    pub y: f32,
}

impl RelPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, 1.0),
            y: self.y.clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpponentId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiscId(pub String);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedPlayer {
    pub id: PlayerId,
    pub pos: RelPoint,
    pub name: String,
    pub color: [u8; 3],
    pub is_goalie: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opponent {
    pub id: OpponentId,
    pub pos: RelPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscKind {
    Home,
    Opponent,
}

impl DiscKind {
    pub fn toggled(self) -> Self {
        match self {
            DiscKind::Home => DiscKind::Opponent,
            DiscKind::Opponent => DiscKind::Home,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TacticalDisc {
    pub id: DiscId,
    pub pos: RelPoint,
    pub kind: DiscKind,
}

/// A finalized freehand stroke. Points are append-only while the stroke is in
/// progress and never reordered or edited after `DrawingEnd`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Drawing {
    pub points: Vec<RelPoint>,
}

/// One render/interaction pass worth of board state. Supplied by the external
/// store; the interaction engine reads it and reports mutations back as
/// intents, it never owns it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub players: Vec<PlacedPlayer>,
    pub opponents: Vec<Opponent>,
    pub discs: Vec<TacticalDisc>,
    pub ball: Option<RelPoint>,
    pub drawings: Vec<Drawing>,
    #[serde(default)]
    pub show_names: bool,
}

impl BoardSnapshot {
    pub fn player(&self, id: &PlayerId) -> Option<&PlacedPlayer> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn opponent(&self, id: &OpponentId) -> Option<&Opponent> {
        self.opponents.iter().find(|o| &o.id == id)
    }

    pub fn disc(&self, id: &DiscId) -> Option<&TacticalDisc> {
        self.discs.iter().find(|d| &d.id == id)
    }
}

/// Tagged reference to a single entity on the board. Ids are unique within
/// their own class only; the tag keeps the namespaces apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Player(PlayerId),
    Opponent(OpponentId),
    Disc(DiscId),
    Ball,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityClass {
    Ball,
    Disc,
    Player,
    Opponent,
}

impl EntityRef {
    pub fn class(&self) -> EntityClass {
        match self {
            EntityRef::Player(_) => EntityClass::Player,
            EntityRef::Opponent(_) => EntityClass::Opponent,
            EntityRef::Disc(_) => EntityClass::Disc,
            EntityRef::Ball => EntityClass::Ball,
        }
    }
}
