//! 共享状态容器与订阅

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use crate::{Layer, LayerData, VideoLayerState, VIDEO_LAYER};

/// 每个订阅者的待处理通知上限；溢出的通知直接丢弃，订阅者重新读取即可
const SUBSCRIBER_BUFFER: usize = 64;

/// 变更通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub layer: String,
    pub revision: u64,
}

struct StoreInner {
    layers: BTreeMap<String, Layer>,
    revision: u64,
    next_subscriber: u64,
    subscribers: Vec<(u64, Sender<StoreChange>)>,
}

impl StoreInner {
    fn notify(&mut self, layer: &str) {
        self.revision += 1;
        let change = StoreChange {
            layer: layer.to_string(),
            revision: self.revision,
        };
        log::debug!("store change: layer={} revision={}", layer, self.revision);

        self.subscribers
            .retain(|(_, tx)| match tx.try_send(change.clone()) {
                Ok(()) | Err(TrySendError::Full(_)) => true,
                Err(TrySendError::Disconnected(_)) => false,
            });
    }
}

/// 共享状态容器句柄，克隆后指向同一份状态
#[derive(Clone)]
pub struct StateStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                layers: BTreeMap::new(),
                revision: 0,
                next_subscriber: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 读取图层数据；图层不存在或未加载时返回 `None`
    pub fn layer_data(&self, layer: &str) -> Option<LayerData> {
        self.lock()
            .layers
            .get(layer)
            .and_then(|l| l.data.clone())
    }

    /// 读取视频图层快照；未加载或数据类型不符时返回 `None`
    pub fn video_layer(&self) -> Option<VideoLayerState> {
        self.lock()
            .layers
            .get(VIDEO_LAYER)
            .and_then(|l| l.data.as_ref())
            .and_then(LayerData::as_video)
            .copied()
    }

    pub fn layer_names(&self) -> Vec<String> {
        self.lock().layers.keys().cloned().collect()
    }

    pub fn revision(&self) -> u64 {
        self.lock().revision
    }

    /// 注册一个尚无数据的图层
    pub fn ensure_layer(&self, layer: &str) {
        let mut inner = self.lock();
        if !inner.layers.contains_key(layer) {
            inner.layers.insert(layer.to_string(), Layer::default());
            inner.notify(layer);
        }
    }

    /// 写入图层数据；与当前值相同时不产生通知
    pub fn set_layer_data(&self, layer: &str, data: LayerData) {
        let mut inner = self.lock();
        let entry = inner.layers.entry(layer.to_string()).or_default();
        if entry.data.as_ref() == Some(&data) {
            return;
        }
        entry.data = Some(data);
        inner.notify(layer);
    }

    /// 清空图层数据，图层本身保留
    pub fn clear_layer_data(&self, layer: &str) {
        let mut inner = self.lock();
        let cleared = match inner.layers.get_mut(layer) {
            Some(entry) => entry.data.take().is_some(),
            None => false,
        };
        if cleared {
            inner.notify(layer);
        }
    }

    pub fn remove_layer(&self, layer: &str) {
        let mut inner = self.lock();
        if inner.layers.remove(layer).is_some() {
            inner.notify(layer);
        }
    }

    /// 注册订阅者；返回的句柄被 drop 时自动注销
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = bounded(SUBSCRIBER_BUFFER);
        let mut inner = self.lock();
        let id = inner.next_subscriber;
        inner.next_subscriber += 1;
        inner.subscribers.push((id, tx));
        log::debug!("store subscriber {} registered", id);

        Subscription {
            id,
            rx,
            store: Arc::downgrade(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }
}

/// 订阅句柄
pub struct Subscription {
    id: u64,
    rx: Receiver<StoreChange>,
    store: Weak<Mutex<StoreInner>>,
}

impl Subscription {
    /// 非阻塞取出所有待处理通知
    pub fn drain(&self) -> Vec<StoreChange> {
        self.rx.try_iter().collect()
    }

    /// 是否有待处理通知（会清空队列）
    pub fn has_changes(&self) -> bool {
        !self.drain().is_empty()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.subscribers.retain(|(id, _)| *id != self.id);
            log::debug!("store subscriber {} released", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(played: f64, duration: f64) -> LayerData {
        LayerData::Video(VideoLayerState::new(played, duration))
    }

    #[test]
    fn test_video_layer_absent_until_loaded() {
        let store = StateStore::new();
        assert!(store.video_layer().is_none());

        store.ensure_layer(VIDEO_LAYER);
        assert!(store.video_layer().is_none());

        store.set_layer_data(VIDEO_LAYER, video(1.0, 10.0));
        assert_eq!(store.video_layer(), Some(VideoLayerState::new(1.0, 10.0)));

        store.clear_layer_data(VIDEO_LAYER);
        assert!(store.video_layer().is_none());
        assert_eq!(store.layer_names(), vec![VIDEO_LAYER.to_string()]);
    }

    #[test]
    fn test_video_layer_ignores_other_kinds() {
        let store = StateStore::new();
        store.set_layer_data(VIDEO_LAYER, LayerData::Json(serde_json::json!(null)));
        assert!(store.video_layer().is_none());
        assert!(store.layer_data(VIDEO_LAYER).is_some());
    }

    #[test]
    fn test_subscriber_notified_on_change() {
        let store = StateStore::new();
        let sub = store.subscribe();

        store.set_layer_data(VIDEO_LAYER, video(0.0, 10.0));
        store.set_layer_data(VIDEO_LAYER, video(1.0, 10.0));

        let changes = sub.drain();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].layer, VIDEO_LAYER);
        assert!(changes[1].revision > changes[0].revision);
    }

    #[test]
    fn test_identical_write_is_silent() {
        let store = StateStore::new();
        store.set_layer_data(VIDEO_LAYER, video(1.0, 10.0));
        let sub = store.subscribe();

        store.set_layer_data(VIDEO_LAYER, video(1.0, 10.0));
        assert!(!sub.has_changes());
    }

    #[test]
    fn test_dropping_subscription_unregisters() {
        let store = StateStore::new();
        let a = store.subscribe();
        let b = store.subscribe();
        assert_eq!(store.subscriber_count(), 2);

        drop(a);
        assert_eq!(store.subscriber_count(), 1);

        store.remove_layer("missing");
        store.set_layer_data("Notes", LayerData::Json(serde_json::json!([])));
        assert_eq!(b.drain().len(), 1);
    }

    #[test]
    fn test_subscription_outlives_store() {
        let store = StateStore::new();
        let sub = store.subscribe();
        drop(store);
        assert!(sub.drain().is_empty());
        drop(sub);
    }

    #[test]
    fn test_overflow_keeps_subscriber() {
        let store = StateStore::new();
        let sub = store.subscribe();
        for i in 0..(SUBSCRIBER_BUFFER + 10) {
            store.set_layer_data(VIDEO_LAYER, video(i as f64, 1000.0));
        }
        assert_eq!(sub.drain().len(), SUBSCRIBER_BUFFER);
        assert_eq!(store.subscriber_count(), 1);
    }
}
