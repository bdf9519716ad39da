//! lumen_store - 标注工具共享状态
//!
//! 按图层名组织的可订阅状态容器。读取方通过类型化访问器取值，
//! 写入方（宿主应用应用后端事件）修改后向所有订阅者发送变更通知。

mod layer;
mod store;

pub use layer::*;
pub use store::*;
