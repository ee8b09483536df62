use crate::board::coords::{PixelPoint, SurfaceSize};
use crate::board::gesture::{GestureClassifier, PointerKind, PressTarget};
use crate::board::hit::hit_test;
use crate::board::interaction::{BoardCtx, InteractionEngine};
use crate::board::model::{DiscKind, PlacedPlayer, PlayerId, RelPoint};
use crate::board::render::{render_board, EguiRenderer};
use crate::board::store::BoardStore;
use crate::settings::Settings;
use eframe::egui;

const SETTINGS_FILE: &str = "touchline.json";
const PITCH_GREEN: egui::Color32 = egui::Color32::from_rgb(0x1a, 0x7a, 0x3a);

fn demo_roster() -> Vec<PlacedPlayer> {
    let entries: &[(&str, &str, [u8; 3], bool)] = &[
        ("p1", "Alex", [0x7e, 0x22, 0xce], false),
        ("p2", "Noa", [0x7e, 0x22, 0xce], false),
        ("p3", "Sam", [0x7e, 0x22, 0xce], false),
        ("p4", "Kim", [0x7e, 0x22, 0xce], false),
        ("p5", "Riley", [0x7e, 0x22, 0xce], false),
        ("p6", "Charlie", [0x7e, 0x22, 0xce], true),
    ];
    entries
        .iter()
        .map(|(id, name, color, is_goalie)| PlacedPlayer {
            id: PlayerId((*id).into()),
            pos: RelPoint::new(0.5, 0.5),
            name: (*name).into(),
            color: *color,
            is_goalie: *is_goalie,
        })
        .collect()
}

/// The hosting shell: owns the store, adapts egui pointer input into the
/// gesture classifier, and paints the board. All board decisions live in
/// `board::`; this file is glue.
pub struct BoardApp {
    settings: Settings,
    store: BoardStore,
    classifier: GestureClassifier,
    engine: InteractionEngine,
    roster: Vec<PlacedPlayer>,
    tactics_view: bool,
    /// True while a press that started on the board surface is still down.
    surface_pressed: bool,
    /// Board rect from the previous frame, used to resolve roster-bar drops.
    board_rect: egui::Rect,
    bar_dragging: bool,
}

impl BoardApp {
    pub fn new(settings: Settings) -> Self {
        let tactics_view = settings.start_in_tactics_view;
        Self {
            settings,
            store: BoardStore::new(),
            classifier: GestureClassifier::new(),
            engine: InteractionEngine::new(),
            roster: demo_roster(),
            tactics_view,
            surface_pressed: false,
            board_rect: egui::Rect::NOTHING,
            bar_dragging: false,
        }
    }

    fn bench(&self) -> Vec<PlacedPlayer> {
        self.roster
            .iter()
            .filter(|p| self.store.snapshot().player(&p.id).is_none())
            .cloned()
            .collect()
    }

    fn board_size(&self) -> SurfaceSize {
        SurfaceSize::new(self.board_rect.width(), self.board_rect.height())
    }

    fn to_surface(&self, pos: egui::Pos2) -> PixelPoint {
        PixelPoint::new(pos.x - self.board_rect.left(), pos.y - self.board_rect.top())
    }

    fn controls_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.toggle_value(&mut self.tactics_view, "Tactics view");
            ui.checkbox(&mut self.settings.show_names, "Names");
            ui.separator();
            if self.tactics_view {
                if ui.button("Add disc").clicked() {
                    self.store.add_disc(RelPoint::new(0.5, 0.3), DiscKind::Home);
                }
                if ui.button("Place ball").clicked() {
                    self.store.place_ball(RelPoint::new(0.5, 0.5));
                }
                if ui.button("Remove ball").clicked() {
                    self.store.remove_ball();
                }
            } else if ui.button("Add opponent").clicked() {
                self.store.add_opponent(RelPoint::new(0.5, 0.25));
            }
            ui.separator();
            if ui.button("Clear drawings").clicked() {
                self.store.clear_drawings();
            }
        });
    }

    fn roster_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Roster");
        ui.label("Drag onto the pitch");
        ui.separator();
        for player in self.bench() {
            let response = ui.add(
                egui::Label::new(egui::RichText::new(&player.name).strong())
                    .sense(egui::Sense::drag()),
            );
            if response.drag_started() {
                self.engine.begin_bar_drag(player.clone());
                self.bar_dragging = true;
            }
            if response.dragged() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
            }
            if response.drag_stopped() && self.bar_dragging {
                self.bar_dragging = false;
                let dropped_at = response.interact_pointer_pos();
                match dropped_at {
                    Some(pos) if self.board_rect.contains(pos) => {
                        let px = self.to_surface(pos);
                        let intents = {
                            let ctx = BoardCtx {
                                snapshot: self.store.snapshot(),
                                size: self.board_size(),
                                tactics_view: self.tactics_view,
                                draw_in_tactics: self.settings.draw_in_tactics,
                            };
                            self.engine.drop_bar_drag(px, &ctx)
                        };
                        self.store.apply_all(intents);
                    }
                    _ => self.engine.cancel_bar_drag(),
                }
            }
        }
    }

    fn board_ui(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        self.board_rect = response.rect;
        painter.rect_filled(response.rect, 4.0, PITCH_GREEN);

        let size = self.board_size();
        let now_ms = ctx.input(|i| (i.time * 1000.0) as u64);
        let kind = if ctx.input(|i| i.any_touches()) {
            PointerKind::Touch
        } else {
            PointerKind::Mouse
        };
        let (pressed, down, released, pos) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
            )
        });

        let draw_eligible = !self.tactics_view || self.settings.draw_in_tactics;
        let mut gestures = Vec::new();

        if pressed && !self.bar_dragging {
            if let Some(pos) = pos {
                if response.rect.contains(pos) {
                    let px = self.to_surface(pos);
                    let target = match hit_test(
                        px,
                        self.store.snapshot(),
                        size,
                        self.engine.last_interacted(),
                    ) {
                        Some(entity) => PressTarget::Entity(entity),
                        None => PressTarget::Empty,
                    };
                    gestures.extend(self.classifier.on_down(px, now_ms, target, draw_eligible, kind));
                    self.surface_pressed = true;
                }
            }
        } else if self.surface_pressed && down {
            if let Some(pos) = pos {
                gestures.extend(self.classifier.on_move(self.to_surface(pos), now_ms));
            }
        } else if self.surface_pressed && released {
            self.surface_pressed = false;
            if let Some(pos) = pos {
                gestures.extend(self.classifier.on_up(self.to_surface(pos), now_ms));
            } else {
                gestures.extend(self.classifier.on_cancel());
            }
        } else if self.surface_pressed {
            // Pointer vanished without a release event (focus loss etc.).
            self.surface_pressed = false;
            gestures.extend(self.classifier.on_cancel());
        }

        gestures.extend(self.classifier.poll(now_ms));

        let intents = {
            let board_ctx = BoardCtx {
                snapshot: self.store.snapshot(),
                size,
                tactics_view: self.tactics_view,
                draw_in_tactics: self.settings.draw_in_tactics,
            };
            let mut intents = Vec::new();
            for gesture in gestures {
                intents.extend(self.engine.handle(gesture, &board_ctx));
            }
            intents
        };
        self.store.apply_all(intents);

        self.store.snapshot_mut().show_names = self.settings.show_names;
        let mut renderer = EguiRenderer::new(&painter, response.rect.min);
        render_board(
            &mut renderer,
            self.store.snapshot(),
            self.engine.optimistic(),
            self.store.live_stroke(),
            size,
        );
    }
}

impl eframe::App for BoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| self.controls_ui(ui));
        egui::SidePanel::left("roster")
            .resizable(false)
            .default_width(140.0)
            .show(ctx, |ui| self.roster_ui(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.board_ui(ui, ctx));

        let rect = ctx.screen_rect();
        self.settings.window_size = Some((rect.width(), rect.height()));

        // Deferred taps and long presses need the clock to keep moving even
        // while the pointer is still.
        ctx.request_repaint_after(std::time::Duration::from_millis(50));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(error) = self.settings.save(SETTINGS_FILE) {
            tracing::warn!(%error, "failed to save settings");
        }
    }
}
