//! Lumen 标注工具 - 视频上下文面板

mod config;
mod state;
mod ui;

use eframe::egui;

use config::AppConfig;
use state::AppState;
use ui::{LumenTheme, TransportDeck};

fn main() -> eframe::Result<()> {
    let config_path = AppConfig::path_from_env();
    let (config, config_error) = match AppConfig::load(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_filter.as_str()),
    )
    .format_timestamp_millis()
    .init();

    if let Some(e) = config_error {
        log::warn!("{}: {}, using defaults", config_path.display(), e);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([400.0, 160.0])
            .with_title("Lumen Annotator"),
        ..Default::default()
    };

    eframe::run_native(
        "Lumen Annotator",
        options,
        Box::new(move |cc| {
            LumenTheme::apply(&cc.egui_ctx);
            Ok(Box::new(LumenApp::new(&config)))
        }),
    )
}

struct LumenApp {
    state: AppState,
}

impl LumenApp {
    fn new(config: &AppConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for LumenApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // 处理视频引擎事件
        self.state.poll_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Video");
            ui.add_space(8.0);
            TransportDeck::show(ui, &mut self.state);
        });

        // 已加载时持续重绘以跟随进度
        if self.state.is_loaded() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
