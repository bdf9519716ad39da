//! 视频控制栏

use egui::{RichText, Ui};

use crate::state::AppState;
use crate::ui::theme::LumenTheme;

pub struct TransportDeck;

impl TransportDeck {
    pub fn show(ui: &mut Ui, state: &mut AppState) {
        egui::Frame::none()
            .fill(LumenTheme::BG_SURFACE)
            .rounding(egui::Rounding::same(6.0))
            .inner_margin(egui::Margin::symmetric(16.0, 12.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());

                Self::transport_controls(ui, state);
                ui.add_space(8.0);

                if state.is_loaded() {
                    state.panel.show(ui);
                } else {
                    ui.label(
                        RichText::new("No video loaded")
                            .color(LumenTheme::TEXT_MUTED)
                            .size(13.0),
                    );
                }

                if let Some(err) = &state.last_error {
                    ui.add_space(4.0);
                    ui.label(RichText::new(err).color(LumenTheme::ERROR).size(12.0));
                }
            });
    }

    fn transport_controls(ui: &mut Ui, state: &mut AppState) {
        ui.horizontal(|ui| {
            if ui.button("Load demo video").clicked() {
                state.load_demo();
            }

            let loaded = state.is_loaded();
            let play_btn = if state.is_playing { "⏸" } else { "▶" };
            if ui
                .add_enabled(loaded, egui::Button::new(RichText::new(play_btn).size(16.0)))
                .clicked()
            {
                state.toggle_play();
            }

            if ui.add_enabled(loaded, egui::Button::new("Unload")).clicked() {
                state.unload();
            }
        });
    }
}
