//! 图层命令与传输信封

use serde::{Deserialize, Serialize};

/// 图层命令（面板 -> 后端）
///
/// 线上格式为 `{"type": "...", "payload": ...}`，无参数的命令省略 `payload`。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum LayerMessage {
    /// 跳转到指定秒数
    Seek(f64),
    /// 加载媒体，payload 为时长（秒）
    Load(f64),
    /// 卸载媒体
    Unload,
    /// 播放
    Play,
    /// 暂停
    Pause,
}

impl LayerMessage {
    /// 线上 `type` 字段的值
    pub fn kind(&self) -> &'static str {
        match self {
            LayerMessage::Seek(_) => "seek",
            LayerMessage::Load(_) => "load",
            LayerMessage::Unload => "unload",
            LayerMessage::Play => "play",
            LayerMessage::Pause => "pause",
        }
    }
}

/// 交给传输层的派发单元
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub target: String,
    pub message: LayerMessage,
}

impl Envelope {
    pub fn new(target: impl Into<String>, message: LayerMessage) -> Self {
        Self {
            target: target.into(),
            message,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
