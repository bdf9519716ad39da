//! lumen_video - 视频图层后端
//!
//! 在后台线程中模拟媒体时钟，消费派发给 `Video` 图层的命令，
//! 并以事件形式回报播放进度。宿主通过 [`apply_event`] 将事件写回共享状态。

mod apply;
mod clock;
mod command;
mod engine;

pub use apply::*;
pub use clock::*;
pub use command::*;
pub use engine::*;
