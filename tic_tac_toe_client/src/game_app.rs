use crate::controller::BoardController;
use crate::dispatch::{Dispatcher, Notify};
use crate::game_service::model::GameMode;
use crate::game_service::service::GameBackend;
use crate::view::{BoardView, CellStyle, CellView};

use eframe::egui;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Keys for the nine cells, row by row.
pub const CELL_KEYS: [[egui::Key; 3]; 3] = [
    [egui::Key::Q, egui::Key::W, egui::Key::E],
    [egui::Key::A, egui::Key::S, egui::Key::D],
    [egui::Key::Z, egui::Key::X, egui::Key::C],
];

pub fn cell_for_key(key: egui::Key) -> Option<(usize, usize)> {
    CELL_KEYS.iter().enumerate().find_map(|(row, keys)| {
        keys.iter()
            .position(|&k| k == key)
            .map(|col| (row, col))
    })
}

pub struct GameApp {
    dispatcher: Dispatcher,
    controller: Arc<Mutex<BoardController>>,
    last_view: BoardView,
}

impl GameApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        backend: Arc<dyn GameBackend>,
        check_model: bool,
    ) -> Self {
        let ctx = cc.egui_ctx.clone();
        let notify: Notify = Arc::new(move || ctx.request_repaint());
        let dispatcher = Dispatcher::new(backend, notify);

        if check_model {
            let startup = dispatcher.clone();
            tokio::spawn(async move { startup.check_model().await });
        }

        Self {
            controller: dispatcher.controller(),
            dispatcher,
            last_view: BoardView::default(),
        }
    }

    fn spawn_move(&self, row: usize, col: usize) {
        let dispatcher = self.dispatcher.clone();
        tokio::spawn(async move {
            dispatcher.make_move(row, col).await;
        });
    }

    fn spawn_new_game(&self, mode: GameMode) {
        let dispatcher = self.dispatcher.clone();
        tokio::spawn(async move { dispatcher.new_game(mode).await });
    }

    fn spawn_restart(&self) {
        let dispatcher = self.dispatcher.clone();
        tokio::spawn(async move { dispatcher.restart().await });
    }

    fn spawn_training(&self) {
        let dispatcher = self.dispatcher.clone();
        tokio::spawn(async move { dispatcher.train_model().await });
    }

    // Paints the last view we could read if a request currently holds the lock.
    fn refresh_view(&mut self, ctx: &egui::Context) {
        match self.controller.try_lock() {
            Ok(mut controller) => {
                let now = Instant::now();
                controller.expire_highlight(now);
                if let Some(remaining) = controller.highlight_remaining(now) {
                    ctx.request_repaint_after(remaining);
                }
                self.last_view = controller.view().clone();
            }
            Err(_) => {
                debug!("Board busy, repainting previous view");
                ctx.request_repaint_after(Duration::from_millis(50));
            }
        }
    }

    fn handle_keys(&self, ctx: &egui::Context) {
        let pressed: Vec<(usize, usize)> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => cell_for_key(*key),
                    _ => None,
                })
                .collect()
        });

        for (row, col) in pressed {
            if self.clickable(row, col) {
                self.spawn_move(row, col);
            }
        }
    }

    fn clickable(&self, row: usize, col: usize) -> bool {
        self.last_view
            .cell(row, col)
            .map(|cell| !cell.disabled)
            .unwrap_or(false)
    }

    fn render_controls(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .add(egui::Button::new("🤖 Play vs AI").min_size(egui::vec2(120.0, 30.0)))
                .clicked()
            {
                self.spawn_new_game(GameMode::human_vs_ai());
            }
            if ui
                .add(egui::Button::new("👥 Play vs Human").min_size(egui::vec2(120.0, 30.0)))
                .clicked()
            {
                self.spawn_new_game(GameMode::human_vs_human());
            }
        });

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            if self.last_view.new_game_visible
                && ui
                    .add(egui::Button::new(
                        egui::RichText::new("🔄 New Game")
                            .size(20.0)
                            .color(egui::Color32::from_rgb(240, 148, 0)),
                    ))
                    .clicked()
            {
                self.spawn_restart();
            }

            if self.last_view.train_visible
                && ui
                    .add_enabled(
                        self.last_view.train_enabled,
                        egui::Button::new(egui::RichText::new("🏋 Train AI").size(20.0)),
                    )
                    .clicked()
            {
                self.spawn_training();
            }
        });
    }

    fn render_board(&self, ui: &mut egui::Ui) {
        let button_size = 100.0;

        ui.vertical_centered(|ui| {
            for (row, cells) in self.last_view.cells.iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.add_space(40.0);
                    for (col, cell) in cells.iter().enumerate() {
                        let button = ui.add_enabled(
                            !cell.disabled,
                            egui::Button::new(cell_text(cell))
                                .fill(cell_fill(cell))
                                .min_size(egui::vec2(button_size, button_size)),
                        );

                        if button.clicked() {
                            self.spawn_move(row, col);
                        }
                    }
                });
            }
        });
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        ui.label(
            egui::RichText::new(&self.last_view.status)
                .size(24.0)
                .color(egui::Color32::from_rgb(0, 191, 255)),
        );
    }
}

fn cell_text(cell: &CellView) -> egui::RichText {
    let text = if cell.symbol.is_empty() { " " } else { cell.symbol };
    let color = match cell.style {
        CellStyle::X => egui::Color32::from_rgb(255, 99, 71),
        CellStyle::O => egui::Color32::from_rgb(34, 139, 34),
        CellStyle::Plain => egui::Color32::from_rgb(180, 180, 180),
    };
    egui::RichText::new(text).size(50.0).color(color)
}

fn cell_fill(cell: &CellView) -> egui::Color32 {
    if cell.ai_move {
        egui::Color32::from_rgb(255, 215, 0)
    } else {
        egui::Color32::from_gray(40)
    }
}

impl eframe::App for GameApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.refresh_view(ctx);
        self.handle_keys(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.group(|ui| {
                    ui.set_width(400.0);
                    ui.set_height(500.0);

                    self.render_controls(ui);
                    ui.add_space(10.0);
                    self.render_status(ui);
                    ui.add_space(10.0);
                    self.render_board(ui);
                    ui.add_space(5.0);
                    ui.label("Keys: Q W E / A S D / Z X C");
                });
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_row_major() {
        assert_eq!(cell_for_key(egui::Key::Q), Some((0, 0)));
        assert_eq!(cell_for_key(egui::Key::E), Some((0, 2)));
        assert_eq!(cell_for_key(egui::Key::S), Some((1, 1)));
        assert_eq!(cell_for_key(egui::Key::Z), Some((2, 0)));
        assert_eq!(cell_for_key(egui::Key::C), Some((2, 2)));
        assert_eq!(cell_for_key(egui::Key::P), None);
    }

    #[test]
    fn highlighted_cell_gets_distinct_fill() {
        let plain = CellView::default();
        let highlighted = CellView {
            ai_move: true,
            ..CellView::default()
        };
        assert_ne!(cell_fill(&plain), cell_fill(&highlighted));
    }
}
