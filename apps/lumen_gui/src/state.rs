//! 应用状态

use std::time::Duration;

use lumen_dispatch::{ChannelDispatcher, LayerMessage, RequestDispatcher};
use lumen_panel::ContextPanel;
use lumen_store::{StateStore, VIDEO_LAYER};
use lumen_video::{
    apply_event, spawn_video_engine, EngineCommand, EngineConfig, VideoEngineHandle, VideoEvent,
};

use crate::config::AppConfig;

/// 应用状态
pub struct AppState {
    pub store: StateStore,
    pub panel: ContextPanel<ChannelDispatcher<EngineCommand>>,
    pub is_playing: bool,
    pub last_error: Option<String>,
    demo_duration: f64,

    // 视频引擎通信
    transport: ChannelDispatcher<EngineCommand>,
    engine: VideoEngineHandle,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let store = StateStore::new();
        store.ensure_layer(VIDEO_LAYER);

        let engine = spawn_video_engine(EngineConfig {
            tick: Duration::from_millis(config.tick_ms.max(1)),
        });
        let transport = engine.dispatcher();
        let panel = ContextPanel::new(&store, engine.dispatcher())
            .with_label_style(config.label_style);

        Self {
            store,
            panel,
            is_playing: false,
            last_error: None,
            demo_duration: config.demo_duration_secs,
            transport,
            engine,
        }
    }

    /// 处理视频引擎事件并写回共享状态
    pub fn poll_events(&mut self) {
        let events: Vec<_> = self.engine.evt_rx.try_iter().collect();
        for event in &events {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: &VideoEvent) {
        apply_event(&self.store, event);
        match event {
            VideoEvent::Loaded(_) => {
                self.last_error = None;
            }
            VideoEvent::Ended | VideoEvent::Unloaded => {
                self.is_playing = false;
            }
            VideoEvent::Error(e) => {
                // 命令被引擎拒绝，按钮状态回退到暂停
                self.is_playing = false;
                self.last_error = Some(e.clone());
            }
            VideoEvent::Progress(_) => {}
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.store.video_layer().is_some()
    }

    fn send(&self, message: LayerMessage) {
        self.transport.send_request(VIDEO_LAYER, message);
    }

    pub fn load_demo(&mut self) {
        self.is_playing = false;
        self.send(LayerMessage::Load(self.demo_duration));
    }

    pub fn unload(&mut self) {
        self.is_playing = false;
        self.send(LayerMessage::Unload);
    }

    pub fn toggle_play(&mut self) {
        if self.is_playing {
            self.send(LayerMessage::Pause);
        } else {
            self.send(LayerMessage::Play);
        }
        self.is_playing = !self.is_playing;
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        self.engine.shutdown();
    }
}
