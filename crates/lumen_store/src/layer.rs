//! 图层数据定义

use serde::{Deserialize, Serialize};

/// 视频媒体图层名（同时也是该图层后端的派发目标）
pub const VIDEO_LAYER: &str = "Video";

/// 视频图层播放快照
///
/// `played_seconds <= duration` 是期望而非强制约束，读取方需要容忍越界值。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoLayerState {
    pub played_seconds: f64,
    pub duration: f64,
}

impl VideoLayerState {
    pub fn new(played_seconds: f64, duration: f64) -> Self {
        Self {
            played_seconds,
            duration,
        }
    }
}

/// 图层携带的数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum LayerData {
    /// 视频媒体图层
    Video(VideoLayerState),
    /// 其他图层（标注、波形等）的原始 JSON
    Json(serde_json::Value),
}

impl LayerData {
    pub fn as_video(&self) -> Option<&VideoLayerState> {
        match self {
            LayerData::Video(state) => Some(state),
            _ => None,
        }
    }
}

/// 单个图层；`data` 为 `None` 表示图层已注册但尚未加载
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layer {
    pub data: Option<LayerData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_state_json_shape() {
        let state = VideoLayerState::new(12.5, 90.0);
        let json = serde_json::to_value(state).unwrap();
        assert_eq!(json, serde_json::json!({"playedSeconds": 12.5, "duration": 90.0}));
    }

    #[test]
    fn test_as_video_rejects_other_kinds() {
        let data = LayerData::Json(serde_json::json!({"boxes": []}));
        assert!(data.as_video().is_none());
    }
}
