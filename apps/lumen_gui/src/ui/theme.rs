//! 主题定义

use egui::{Color32, Rounding, Stroke, Style, Visuals};

/// 标注工具深色主题
pub struct LumenTheme;

impl LumenTheme {
    pub const BG_DEEP: Color32 = Color32::from_rgb(20, 22, 28);
    pub const BG_SURFACE: Color32 = Color32::from_rgb(32, 35, 44);
    pub const BG_ELEVATED: Color32 = Color32::from_rgb(44, 48, 60);
    pub const ACCENT: Color32 = Color32::from_rgb(72, 160, 255);
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(236, 238, 242);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(140, 146, 160);
    pub const ERROR: Color32 = Color32::from_rgb(235, 90, 80);

    /// 应用主题到 egui context
    pub fn apply(ctx: &egui::Context) {
        let mut style = Style::default();
        let mut visuals = Visuals::dark();

        visuals.panel_fill = Self::BG_DEEP;
        visuals.window_fill = Self::BG_SURFACE;
        visuals.extreme_bg_color = Self::BG_DEEP;

        visuals.widgets.inactive.bg_fill = Self::BG_ELEVATED;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Self::TEXT_PRIMARY);
        visuals.widgets.inactive.rounding = Rounding::same(4.0);

        visuals.widgets.hovered.bg_fill = Self::ACCENT.gamma_multiply(0.3);
        visuals.widgets.hovered.rounding = Rounding::same(4.0);

        visuals.widgets.active.bg_fill = Self::ACCENT;
        visuals.widgets.active.rounding = Rounding::same(4.0);

        // 进度条已播放部分
        visuals.selection.bg_fill = Self::ACCENT.gamma_multiply(0.6);
        visuals.selection.stroke = Stroke::new(1.0, Self::ACCENT);

        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(10.0, 4.0);

        ctx.set_style(style);
    }
}
