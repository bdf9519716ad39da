//! 将引擎事件写回共享状态

use lumen_store::{LayerData, StateStore, VIDEO_LAYER};

use crate::VideoEvent;

/// 应用单个引擎事件
pub fn apply_event(store: &StateStore, event: &VideoEvent) {
    match event {
        VideoEvent::Loaded(state) | VideoEvent::Progress(state) => {
            store.set_layer_data(VIDEO_LAYER, LayerData::Video(*state));
        }
        VideoEvent::Unloaded => {
            store.clear_layer_data(VIDEO_LAYER);
        }
        VideoEvent::Ended => {
            log::info!("video reached the end");
        }
        VideoEvent::Error(e) => {
            log::warn!("video layer error: {}", e);
        }
    }
}
