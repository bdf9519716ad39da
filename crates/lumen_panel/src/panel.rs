//! 上下文面板

use lumen_dispatch::{LayerMessage, RequestDispatcher};
use lumen_store::{StateStore, Subscription, VIDEO_LAYER};

use crate::{LabelStyle, PanelView};

/// 视频上下文面板
///
/// 持有一个显式的状态订阅，面板被 drop 时订阅随之注销。
/// 除订阅外不保存任何状态，每次渲染都从共享状态重新推导。
pub struct ContextPanel<D> {
    store: StateStore,
    subscription: Subscription,
    dispatcher: D,
    label_style: LabelStyle,
}

impl<D: RequestDispatcher> ContextPanel<D> {
    pub fn new(store: &StateStore, dispatcher: D) -> Self {
        Self {
            store: store.clone(),
            subscription: store.subscribe(),
            dispatcher,
            label_style: LabelStyle::default(),
        }
    }

    pub fn with_label_style(mut self, label_style: LabelStyle) -> Self {
        self.label_style = label_style;
        self
    }

    /// 处理待处理的变更通知，返回是否需要重新渲染
    pub fn sync(&self) -> bool {
        self.subscription.has_changes()
    }

    /// 当前显示状态
    pub fn view(&self) -> PanelView {
        PanelView::derive(self.store.video_layer(), self.label_style)
    }

    /// 进度条松手：派发一次 `seek`，数值原样传递
    pub fn on_release(&self, value: f64) {
        log::debug!("seek released at {}", value);
        self.dispatcher
            .send_request(VIDEO_LAYER, LayerMessage::Seek(value));
    }
}
