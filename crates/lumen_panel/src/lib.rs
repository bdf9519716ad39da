//! lumen_panel - 视频上下文面板
//!
//! 显示视频图层的当前播放位置，操作者拖动进度条松手后向 `Video`
//! 图层派发 `seek` 命令。面板只读共享状态，状态回流完全依赖后端。

mod panel;
mod time;
mod view;
mod widget;

pub use panel::*;
pub use time::*;
pub use view::*;
