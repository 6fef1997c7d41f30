// ui.rs - egui presentation: reads snapshots, forwards gestures to the controller

use std::ops::RangeInclusive;
use std::time::Duration;

use conway::{Seed, SimulationController};
use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use tokio::runtime::Runtime;
use tracing::warn;

const SPACING: f32 = 1.0;

/// Allowed side of one painted cell, in points.
pub const CELL_PX_RANGE: RangeInclusive<f32> = 4.0..=40.0;

pub struct LifeApp {
    controller: SimulationController,
    selected_seed: Seed,
    size_setting: usize,
    cell_px: f32,
    live_color: Color32,
    dead_color: Color32,
    // Dropped last so the controller cancels its ticker while the runtime is still up.
    _runtime: Runtime,
}

impl LifeApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        controller: SimulationController,
        runtime: Runtime,
        cell_px: f32,
    ) -> Self {
        // Repaint whenever the engine publishes, including ticks between input events.
        let ctx = cc.egui_ctx.clone();
        let mut changes = controller.subscribe();
        runtime.spawn(async move {
            while changes.changed().await.is_ok() {
                ctx.request_repaint();
            }
        });

        let size_setting = controller.size();
        Self {
            controller,
            selected_seed: Seed::Random,
            size_setting,
            cell_px,
            live_color: Color32::BLACK,
            dead_color: Color32::WHITE,
            _runtime: runtime,
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        let snapshot = self.controller.snapshot();

        ui.horizontal(|ui| {
            let button_text = if snapshot.running { "⏸ Stop" } else { "▶ Start" };
            if ui.button(button_text).clicked() {
                if snapshot.running {
                    self.controller.stop();
                } else {
                    self.controller.start();
                }
            }

            if ui.button("⏭ Step").clicked() {
                self.controller.step();
            }

            if ui.button("⏹ Clear").clicked() {
                self.controller.clear();
            }

            ui.separator();

            // Pattern dropdown
            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(self.selected_seed.to_string())
                .show_ui(ui, |ui| {
                    for seed in Seed::all() {
                        ui.selectable_value(&mut self.selected_seed, seed, seed.to_string());
                    }
                });

            if ui.button("Place").clicked() {
                if let Err(e) = self.controller.place_seed(self.selected_seed, None) {
                    warn!(error = %e, "placement rejected");
                }
            }

            ui.separator();
            ui.label(format!("Generation: {}", snapshot.generation));
        });

        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Speed:");
            let mut speed = 1000.0 / self.controller.tick_interval().as_millis().max(1) as f32;
            if ui
                .add(egui::Slider::new(&mut speed, 0.5..=60.0).suffix(" gen/sec"))
                .changed()
            {
                let interval = Duration::from_millis((1000.0 / speed).round().max(1.0) as u64);
                if let Err(e) = self.controller.set_tick_interval(interval) {
                    warn!(error = %e, "interval rejected");
                }
            }

            ui.separator();

            ui.label("Size:");
            if ui
                .add(egui::Slider::new(&mut self.size_setting, 5..=100).suffix(" cells"))
                .changed()
            {
                if let Err(e) = self.controller.resize(self.size_setting) {
                    warn!(error = %e, "resize rejected");
                }
            }

            ui.separator();

            ui.label("Cell:");
            ui.add(egui::Slider::new(&mut self.cell_px, CELL_PX_RANGE).suffix(" px"));
        });

        ui.horizontal(|ui| {
            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);
        });
    }

    fn board(&mut self, ui: &mut egui::Ui) {
        let grid = self.controller.grid();
        let size = grid.size();
        let pitch = self.cell_px + SPACING;

        let start_pos = ui.cursor().min;
        let total_size = Vec2::splat(pitch * size as f32 - SPACING);
        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

        // Fill background
        painter.rect_filled(
            Rect::from_min_size(start_pos, total_size),
            0.0,
            Color32::from_gray(204),
        );

        for (row, cells) in grid.rows().enumerate() {
            for (col, &alive) in cells.iter().enumerate() {
                let min = start_pos + Vec2::new(col as f32 * pitch, row as f32 * pitch);
                let rect = Rect::from_min_size(min, Vec2::splat(self.cell_px));
                let color = if alive { self.live_color } else { self.dead_color };
                painter.rect_filled(rect, 0.0, color);
            }
        }
        painter.rect_stroke(
            Rect::from_min_size(start_pos, total_size),
            0.0,
            Stroke::new(1.0, Color32::from_gray(160)),
        );

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let offset = pos - start_pos;
                let (row, col) = ((offset.y / pitch) as usize, (offset.x / pitch) as usize);
                // Validate before calling; the engine would reject it anyway.
                if offset.x >= 0.0 && offset.y >= 0.0 && row < size && col < size {
                    if let Err(e) = self.controller.toggle_cell(row, col) {
                        warn!(error = %e, "toggle rejected");
                    }
                }
            }
        }

        ui.separator();

        let live_cells = grid.population();
        let total = size * size;
        ui.horizontal(|ui| {
            ui.label(format!("Live cells: {}", live_cells));
            ui.label(format!("Dead cells: {}", total - live_cells));
            ui.label(format!(
                "Population: {:.1}%",
                (live_cells as f32 / total as f32) * 100.0
            ));
        });
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");
            self.controls(ui);
            ui.separator();
            ui.label("Click cells to toggle them. The board wraps at every edge.");
            ui.separator();
            egui::ScrollArea::both().show(ui, |ui| self.board(ui));
        });
    }
}
