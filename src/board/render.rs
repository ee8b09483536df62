use crate::board::coords::{to_pixel, PixelPoint, SurfaceSize};
use crate::board::model::{BoardSnapshot, DiscKind, Drawing, EntityRef, RelPoint};
use eframe::egui;

// Entity footprint as a fraction of the shorter surface dimension. Slightly
// inside the hit radii so the visual never looks bigger than the grab zone.
const PLAYER_DRAW_FRAC: f32 = 0.04;
const OPPONENT_DRAW_FRAC: f32 = 0.04;
const DISC_DRAW_FRAC: f32 = 0.032;
const BALL_DRAW_FRAC: f32 = 0.018;

/// Minimal drawing surface. Pixel-space in, pixels out; every decision about
/// what to draw and where stays on the caller's side, so the interaction core
/// has no dependency on any particular graphics API.
pub trait Renderer {
    fn clear(&mut self);
    fn draw_player(&mut self, at: PixelPoint, radius: f32, color: [u8; 3], is_goalie: bool, name: Option<&str>);
    fn draw_opponent(&mut self, at: PixelPoint, radius: f32);
    fn draw_disc(&mut self, at: PixelPoint, radius: f32, kind: DiscKind);
    fn draw_ball(&mut self, at: PixelPoint, radius: f32);
    fn draw_stroke(&mut self, points: &[PixelPoint]);
}

/// Paints one full pass: finalized drawings first, then entities, then the
/// live stroke on top. `optimistic` overrides the snapshot position of the
/// entity currently under drag.
pub fn render_board(
    renderer: &mut dyn Renderer,
    snapshot: &BoardSnapshot,
    optimistic: Option<(&EntityRef, RelPoint)>,
    live_stroke: Option<&Drawing>,
    size: SurfaceSize,
) {
    if size.is_degenerate() {
        return;
    }
    renderer.clear();

    let base = size.width.min(size.height);
    let resolve = |entity: EntityRef, rest: RelPoint| -> PixelPoint {
        let pos = match optimistic {
            Some((dragged, pos)) if *dragged == entity => pos,
            _ => rest,
        };
        to_pixel(pos, size)
    };

    for drawing in &snapshot.drawings {
        draw_stroke_px(renderer, drawing, size);
    }

    for disc in &snapshot.discs {
        let at = resolve(EntityRef::Disc(disc.id.clone()), disc.pos);
        renderer.draw_disc(at, base * DISC_DRAW_FRAC, disc.kind);
    }
    for opponent in &snapshot.opponents {
        let at = resolve(EntityRef::Opponent(opponent.id.clone()), opponent.pos);
        renderer.draw_opponent(at, base * OPPONENT_DRAW_FRAC);
    }
    for player in &snapshot.players {
        let at = resolve(EntityRef::Player(player.id.clone()), player.pos);
        let name = snapshot.show_names.then_some(player.name.as_str());
        renderer.draw_player(at, base * PLAYER_DRAW_FRAC, player.color, player.is_goalie, name);
    }
    if let Some(ball) = snapshot.ball {
        let at = resolve(EntityRef::Ball, ball);
        renderer.draw_ball(at, base * BALL_DRAW_FRAC);
    }

    if let Some(stroke) = live_stroke {
        draw_stroke_px(renderer, stroke, size);
    }
}

fn draw_stroke_px(renderer: &mut dyn Renderer, drawing: &Drawing, size: SurfaceSize) {
    let points: Vec<PixelPoint> = drawing.points.iter().map(|p| to_pixel(*p, size)).collect();
    renderer.draw_stroke(&points);
}

/// [`Renderer`] backed by an `egui::Painter`, used by the eframe shell.
pub struct EguiRenderer<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
}

impl<'a> EguiRenderer<'a> {
    pub fn new(painter: &'a egui::Painter, origin: egui::Pos2) -> Self {
        Self { painter, origin }
    }

    fn pos(&self, at: PixelPoint) -> egui::Pos2 {
        egui::pos2(self.origin.x + at.x, self.origin.y + at.y)
    }
}

impl Renderer for EguiRenderer<'_> {
    fn clear(&mut self) {
        // The host clears by repainting the pitch background each frame.
    }

    fn draw_player(
        &mut self,
        at: PixelPoint,
        radius: f32,
        color: [u8; 3],
        is_goalie: bool,
        name: Option<&str>,
    ) {
        let center = self.pos(at);
        let fill = if is_goalie {
            egui::Color32::from_rgb(0xf5, 0x9e, 0x0b)
        } else {
            egui::Color32::from_rgb(color[0], color[1], color[2])
        };
        self.painter.circle_filled(center, radius, fill);
        self.painter
            .circle_stroke(center, radius, egui::Stroke::new(1.5, egui::Color32::WHITE));
        if let Some(name) = name {
            self.painter.text(
                egui::pos2(center.x, center.y + radius + 4.0),
                egui::Align2::CENTER_TOP,
                name,
                egui::FontId::proportional(radius * 0.8),
                egui::Color32::WHITE,
            );
        }
    }

    fn draw_opponent(&mut self, at: PixelPoint, radius: f32) {
        self.painter.circle_filled(
            self.pos(at),
            radius,
            egui::Color32::from_rgb(0xdc, 0x26, 0x26),
        );
    }

    fn draw_disc(&mut self, at: PixelPoint, radius: f32, kind: DiscKind) {
        let color = match kind {
            DiscKind::Home => egui::Color32::from_rgb(0x7e, 0x22, 0xce),
            DiscKind::Opponent => egui::Color32::from_rgb(0xdc, 0x26, 0x26),
        };
        let center = self.pos(at);
        self.painter.circle_filled(center, radius, color);
        self.painter.circle_stroke(
            center,
            radius,
            egui::Stroke::new(1.0, egui::Color32::from_gray(230)),
        );
    }

    fn draw_ball(&mut self, at: PixelPoint, radius: f32) {
        let center = self.pos(at);
        self.painter.circle_filled(center, radius, egui::Color32::WHITE);
        self.painter
            .circle_stroke(center, radius, egui::Stroke::new(1.0, egui::Color32::BLACK));
    }

    fn draw_stroke(&mut self, points: &[PixelPoint]) {
        for pair in points.windows(2) {
            self.painter.line_segment(
                [self.pos(pair[0]), self.pos(pair[1])],
                egui::Stroke::new(2.0, egui::Color32::from_rgb(0xfa, 0xcc, 0x15)),
            );
        }
        // A dot for strokes that never grew past their first point.
        if points.len() == 1 {
            self.painter.circle_filled(
                self.pos(points[0]),
                2.0,
                egui::Color32::from_rgb(0xfa, 0xcc, 0x15),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::model::{PlacedPlayer, PlayerId};

    #[derive(Default)]
    struct RecordingRenderer {
        players: Vec<(PixelPoint, Option<String>)>,
        strokes: Vec<usize>,
        cleared: bool,
    }

    impl Renderer for RecordingRenderer {
        fn clear(&mut self) {
            self.cleared = true;
        }
        fn draw_player(
            &mut self,
            at: PixelPoint,
            _radius: f32,
            _color: [u8; 3],
            _is_goalie: bool,
            name: Option<&str>,
        ) {
            self.players.push((at, name.map(str::to_owned)));
        }
        fn draw_opponent(&mut self, _at: PixelPoint, _radius: f32) {}
        fn draw_disc(&mut self, _at: PixelPoint, _radius: f32, _kind: DiscKind) {}
        fn draw_ball(&mut self, _at: PixelPoint, _radius: f32) {}
        fn draw_stroke(&mut self, points: &[PixelPoint]) {
            self.strokes.push(points.len());
        }
    }

    fn snapshot_with_player() -> BoardSnapshot {
        BoardSnapshot {
            players: vec![PlacedPlayer {
                id: PlayerId("p1".into()),
                pos: RelPoint::new(0.25, 0.5),
                name: "Alex".into(),
                color: [0x7e, 0x22, 0xce],
                is_goalie: false,
            }],
            show_names: true,
            ..Default::default()
        }
    }

    #[test]
    fn optimistic_position_overrides_snapshot() {
        let snapshot = snapshot_with_player();
        let mut renderer = RecordingRenderer::default();
        let dragged = EntityRef::Player(PlayerId("p1".into()));
        render_board(
            &mut renderer,
            &snapshot,
            Some((&dragged, RelPoint::new(0.5, 0.5))),
            None,
            SurfaceSize::new(800.0, 600.0),
        );
        assert!(renderer.cleared);
        assert_eq!(renderer.players.len(), 1);
        assert_eq!(renderer.players[0].0, PixelPoint::new(400.0, 300.0));
    }

    #[test]
    fn show_names_flag_controls_labels() {
        let mut snapshot = snapshot_with_player();
        let mut renderer = RecordingRenderer::default();
        render_board(&mut renderer, &snapshot, None, None, SurfaceSize::new(800.0, 600.0));
        assert_eq!(renderer.players[0].1.as_deref(), Some("Alex"));

        snapshot.show_names = false;
        let mut renderer = RecordingRenderer::default();
        render_board(&mut renderer, &snapshot, None, None, SurfaceSize::new(800.0, 600.0));
        assert_eq!(renderer.players[0].1, None);
    }

    #[test]
    fn live_stroke_renders_after_finalized_drawings() {
        let snapshot = BoardSnapshot {
            drawings: vec![Drawing {
                points: vec![RelPoint::new(0.1, 0.1), RelPoint::new(0.2, 0.2)],
            }],
            ..Default::default()
        };
        let live = Drawing {
            points: vec![RelPoint::new(0.3, 0.3)],
        };
        let mut renderer = RecordingRenderer::default();
        render_board(
            &mut renderer,
            &snapshot,
            None,
            Some(&live),
            SurfaceSize::new(800.0, 600.0),
        );
        assert_eq!(renderer.strokes, vec![2, 1]);
    }

    #[test]
    fn degenerate_surface_renders_nothing() {
        let snapshot = snapshot_with_player();
        let mut renderer = RecordingRenderer::default();
        render_board(&mut renderer, &snapshot, None, None, SurfaceSize::new(0.0, 600.0));
        assert!(!renderer.cleared);
        assert!(renderer.players.is_empty());
    }
}
