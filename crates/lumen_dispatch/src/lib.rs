//! lumen_dispatch - 单向请求派发
//!
//! 面板向指定图层后端发送命令，不等待确认、不重试、不去重。

mod dispatcher;
mod message;

pub use dispatcher::*;
pub use message::*;
