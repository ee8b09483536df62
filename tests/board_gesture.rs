//! Pipeline-level gesture properties: raw pointer sequences in, intents out.

use touchline::board::coords::{PixelPoint, SurfaceSize};
use touchline::board::gesture::{GestureClassifier, PointerKind, PressTarget};
use touchline::board::hit::hit_test;
use touchline::board::intents::BoardIntent;
use touchline::board::interaction::{BoardCtx, InteractionEngine};
use touchline::board::model::{BoardSnapshot, PlacedPlayer, PlayerId, RelPoint};

const SIZE: SurfaceSize = SurfaceSize::new(800.0, 600.0);

struct Rig {
    classifier: GestureClassifier,
    engine: InteractionEngine,
    snapshot: BoardSnapshot,
    tactics_view: bool,
    intents: Vec<BoardIntent>,
}

impl Rig {
    fn new(snapshot: BoardSnapshot) -> Self {
        Self {
            classifier: GestureClassifier::new(),
            engine: InteractionEngine::new(),
            snapshot,
            tactics_view: false,
            intents: Vec::new(),
        }
    }

    fn dispatch(&mut self, gestures: Vec<touchline::board::gesture::Gesture>) {
        let ctx = BoardCtx {
            snapshot: &self.snapshot,
            size: SIZE,
            tactics_view: self.tactics_view,
            draw_in_tactics: false,
        };
        for gesture in gestures {
            self.intents.extend(self.engine.handle(gesture, &ctx));
        }
    }

    fn down(&mut self, x: f32, y: f32, at_ms: u64, kind: PointerKind) {
        let px = PixelPoint::new(x, y);
        let target = match hit_test(px, &self.snapshot, SIZE, self.engine.last_interacted()) {
            Some(entity) => PressTarget::Entity(entity),
            None => PressTarget::Empty,
        };
        let draw_eligible = !self.tactics_view;
        let gestures = self.classifier.on_down(px, at_ms, target, draw_eligible, kind);
        self.dispatch(gestures);
    }

    fn mv(&mut self, x: f32, y: f32, at_ms: u64) {
        let gestures = self.classifier.on_move(PixelPoint::new(x, y), at_ms);
        self.dispatch(gestures);
    }

    fn up(&mut self, x: f32, y: f32, at_ms: u64) {
        let gestures = self.classifier.on_up(PixelPoint::new(x, y), at_ms);
        self.dispatch(gestures);
    }

    fn poll(&mut self, at_ms: u64) {
        let gestures = self.classifier.poll(at_ms);
        self.dispatch(gestures);
    }

    fn removals(&self) -> usize {
        self.intents
            .iter()
            .filter(|i| matches!(i, BoardIntent::PlayerRemove { .. }))
            .count()
    }
}

fn one_player_board() -> BoardSnapshot {
    BoardSnapshot {
        players: vec![PlacedPlayer {
            id: PlayerId("p1".into()),
            pos: RelPoint::new(0.3, 0.4),
            name: "Alex".into(),
            color: [0x7e, 0x22, 0xce],
            is_goalie: false,
        }],
        ..Default::default()
    }
}

#[test]
fn horizontal_touch_scroll_produces_zero_intents() {
    let mut rig = Rig::new(one_player_board());
    // Empty-area touch moving 20 px right, 4 px down: scroll passthrough.
    rig.down(500.0, 400.0, 0, PointerKind::Touch);
    rig.mv(512.0, 402.0, 20);
    rig.mv(520.0, 404.0, 40);
    rig.mv(560.0, 404.0, 60);
    rig.up(560.0, 404.0, 80);
    rig.poll(2_000);
    assert!(rig.intents.is_empty(), "scroll leaked {:?}", rig.intents);
}

#[test]
fn two_quick_taps_remove_exactly_once() {
    let mut rig = Rig::new(one_player_board());
    rig.down(240.0, 240.0, 0, PointerKind::Touch);
    rig.up(240.0, 240.0, 60);
    rig.down(240.0, 240.0, 180, PointerKind::Touch);
    rig.up(240.0, 240.0, 240);
    rig.poll(2_000);
    assert_eq!(rig.removals(), 1);
    assert!(!rig
        .intents
        .iter()
        .any(|i| matches!(i, BoardIntent::PlayerMove { .. })));
}

#[test]
fn slow_taps_never_remove() {
    let mut rig = Rig::new(one_player_board());
    rig.down(240.0, 240.0, 0, PointerKind::Touch);
    rig.up(240.0, 240.0, 60);
    rig.poll(500);
    rig.down(240.0, 240.0, 700, PointerKind::Touch);
    rig.up(240.0, 240.0, 760);
    rig.poll(2_000);
    assert_eq!(rig.removals(), 0);
}

#[test]
fn long_press_on_player_removes_once() {
    let mut rig = Rig::new(one_player_board());
    rig.down(240.0, 240.0, 0, PointerKind::Touch);
    rig.poll(740);
    assert_eq!(rig.removals(), 0);
    rig.poll(760);
    assert_eq!(rig.removals(), 1);
    rig.up(240.0, 240.0, 800);
    rig.poll(2_000);
    assert_eq!(rig.removals(), 1);
}

#[test]
fn jittery_long_press_is_cancelled() {
    let mut rig = Rig::new(one_player_board());
    rig.down(240.0, 240.0, 0, PointerKind::Touch);
    // 12 px of movement is past the jitter slop; no long-press may fire, the
    // press becomes a drag instead.
    rig.mv(252.0, 240.0, 100);
    rig.poll(1_000);
    assert_eq!(rig.removals(), 0);
    assert!(rig
        .intents
        .iter()
        .any(|i| matches!(i, BoardIntent::PlayerMove { .. })));
}

#[test]
fn cancel_mid_draw_finalizes_like_release() {
    let mut rig = Rig::new(BoardSnapshot::default());
    rig.down(100.0, 100.0, 0, PointerKind::Mouse);
    rig.mv(120.0, 130.0, 20);
    let gestures = rig.classifier.on_cancel();
    rig.dispatch(gestures);
    let kinds: Vec<_> = rig.intents.iter().collect();
    assert!(
        matches!(kinds.last(), Some(BoardIntent::DrawingEnd)),
        "expected DrawingEnd last, got {kinds:?}"
    );
    assert!(rig.engine.is_idle());
    assert!(rig.classifier.is_idle());
}

#[test]
fn drag_then_tap_sequence_keeps_classes_independent() {
    let mut rig = Rig::new(one_player_board());
    // Drag the player somewhere.
    rig.down(240.0, 240.0, 0, PointerKind::Mouse);
    rig.mv(400.0, 300.0, 30);
    rig.up(400.0, 300.0, 60);
    let moves = rig
        .intents
        .iter()
        .filter(|i| matches!(i, BoardIntent::PlayerMove { .. }))
        .count();
    assert!(moves >= 1);
    assert_eq!(rig.removals(), 0);

    // A later single tap selects but never removes.
    rig.down(240.0, 240.0, 1_000, PointerKind::Mouse);
    rig.up(240.0, 240.0, 1_050);
    rig.poll(3_000);
    assert_eq!(rig.removals(), 0);
}
