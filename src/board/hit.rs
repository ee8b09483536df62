use crate::board::coords::{to_pixel, PixelPoint, SurfaceSize};
use crate::board::model::{BoardSnapshot, EntityClass, EntityRef};

// Hit radii as fractions of the shorter surface dimension, so pickup
// tolerance scales with resize instead of staying a fixed pixel count.
const BALL_RADIUS_FRAC: f32 = 0.025;
const DISC_RADIUS_FRAC: f32 = 0.04;
const PLAYER_RADIUS_FRAC: f32 = 0.05;
const OPPONENT_RADIUS_FRAC: f32 = 0.05;

fn class_radius(class: EntityClass, size: SurfaceSize) -> f32 {
    let base = size.width.min(size.height);
    let frac = match class {
        EntityClass::Ball => BALL_RADIUS_FRAC,
        EntityClass::Disc => DISC_RADIUS_FRAC,
        EntityClass::Player => PLAYER_RADIUS_FRAC,
        EntityClass::Opponent => OPPONENT_RADIUS_FRAC,
    };
    base * frac
}

// Lower rank wins when no class was recently interacted with.
fn class_rank(class: EntityClass) -> u8 {
    match class {
        EntityClass::Ball => 0,
        EntityClass::Disc => 1,
        EntityClass::Player => 2,
        EntityClass::Opponent => 3,
    }
}

#[derive(Debug, Clone)]
struct Candidate {
    entity: EntityRef,
    dist_sq: f32,
}

/// Returns the topmost entity under `px`, or `None` when nothing's radius
/// contains the point. When entities overlap, the most-recently-interacted
/// class wins first, then the fixed class order ball > disc > player >
/// opponent, then nearest center. The order is deterministic across repeated
/// calls for identical input.
pub fn hit_test(
    px: PixelPoint,
    snapshot: &BoardSnapshot,
    size: SurfaceSize,
    last_interacted: Option<EntityClass>,
) -> Option<EntityRef> {
    if size.is_degenerate() {
        return None;
    }

    let mut candidates: Vec<Candidate> = Vec::new();

    let mut consider = |entity: EntityRef, center: PixelPoint| {
        let radius = class_radius(entity.class(), size);
        let dx = px.x - center.x;
        let dy = px.y - center.y;
        let dist_sq = dx * dx + dy * dy;
        if dist_sq <= radius * radius {
            candidates.push(Candidate { entity, dist_sq });
        }
    };

    if let Some(ball) = snapshot.ball {
        consider(EntityRef::Ball, to_pixel(ball, size));
    }
    for disc in &snapshot.discs {
        consider(EntityRef::Disc(disc.id.clone()), to_pixel(disc.pos, size));
    }
    for player in &snapshot.players {
        consider(EntityRef::Player(player.id.clone()), to_pixel(player.pos, size));
    }
    for opponent in &snapshot.opponents {
        consider(
            EntityRef::Opponent(opponent.id.clone()),
            to_pixel(opponent.pos, size),
        );
    }

    candidates
        .into_iter()
        .min_by(|a, b| {
            let key_a = candidate_key(a, last_interacted);
            let key_b = candidate_key(b, last_interacted);
            key_a.partial_cmp(&key_b).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|c| c.entity)
}

fn candidate_key(c: &Candidate, last_interacted: Option<EntityClass>) -> (u8, u8, f32) {
    let recent = match last_interacted {
        Some(class) if class == c.entity.class() => 0,
        _ => 1,
    };
    (recent, class_rank(c.entity.class()), c.dist_sq)
}
