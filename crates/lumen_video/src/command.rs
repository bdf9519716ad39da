//! 引擎命令和事件定义

use lumen_dispatch::Envelope;
use lumen_store::VideoLayerState;

/// 引擎命令（派发器 -> 引擎）
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    /// 派发来的图层请求
    Request(Envelope),
    /// 关闭引擎
    Shutdown,
}

impl From<Envelope> for EngineCommand {
    fn from(envelope: Envelope) -> Self {
        EngineCommand::Request(envelope)
    }
}

/// 引擎事件（引擎 -> 宿主）
#[derive(Debug, Clone, PartialEq)]
pub enum VideoEvent {
    /// 媒体已加载
    Loaded(VideoLayerState),
    /// 播放进度更新
    Progress(VideoLayerState),
    /// 媒体已卸载
    Unloaded,
    /// 播放到结尾
    Ended,
    /// 错误
    Error(String),
}

/// 引擎错误
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum VideoError {
    #[error("No video loaded")]
    NotLoaded,

    #[error("Invalid duration: {0}")]
    InvalidDuration(f64),

    #[error("Invalid seek position: {0}")]
    InvalidPosition(f64),
}
