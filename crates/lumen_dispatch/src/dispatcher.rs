//! 派发器

use std::sync::{Arc, Mutex, PoisonError};

use crossbeam_channel::{Sender, TrySendError};

use crate::{Envelope, LayerMessage};

/// 单向请求派发
///
/// 调用立即返回；投递失败由实现自行处理，不会反馈给调用方。
pub trait RequestDispatcher {
    fn send_request(&self, target: &str, message: LayerMessage);
}

impl<D: RequestDispatcher + ?Sized> RequestDispatcher for Arc<D> {
    fn send_request(&self, target: &str, message: LayerMessage) {
        (**self).send_request(target, message)
    }
}

impl<D: RequestDispatcher + ?Sized> RequestDispatcher for &D {
    fn send_request(&self, target: &str, message: LayerMessage) {
        (**self).send_request(target, message)
    }
}

/// 基于 channel 的派发器，`C` 为接收端的命令类型
pub struct ChannelDispatcher<C = Envelope> {
    tx: Sender<C>,
}

impl<C> ChannelDispatcher<C> {
    pub fn new(tx: Sender<C>) -> Self {
        Self { tx }
    }
}

impl<C> Clone for ChannelDispatcher<C> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<C: From<Envelope>> RequestDispatcher for ChannelDispatcher<C> {
    fn send_request(&self, target: &str, message: LayerMessage) {
        let envelope = Envelope::new(target, message);
        log::debug!("dispatch {} -> {}", message.kind(), target);

        match self.tx.try_send(C::from(envelope)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                log::warn!("dispatch queue full, dropped {} for {}", message.kind(), target);
            }
            Err(TrySendError::Disconnected(_)) => {
                log::warn!("dispatch target {} is gone, dropped {}", target, message.kind());
            }
        }
    }
}

/// 记录所有派发的派发器，用于测试与无头渲染
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    sent: Mutex<Vec<Envelope>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按派发顺序返回已记录的信封
    pub fn sent(&self) -> Vec<Envelope> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn take(&self) -> Vec<Envelope> {
        std::mem::take(&mut *self.sent.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl RequestDispatcher for RecordingDispatcher {
    fn send_request(&self, target: &str, message: LayerMessage) {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Envelope::new(target, message));
    }
}
