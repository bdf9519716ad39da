//! 面板显示状态

use lumen_store::VideoLayerState;
use serde::Serialize;

use crate::LabelStyle;

/// 拖动步进（秒）
pub const SEEK_STEP: f64 = 0.1;
/// 刻度标签间隔（秒）
pub const LABEL_STEP: f64 = 1.0;
/// 抽稀刻度时可选的间隔，超出后按整小时取整
const NICE_STRIDES: [u64; 12] = [1, 2, 5, 10, 15, 30, 60, 120, 300, 600, 900, 1800];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
}

/// 进度条配置
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderSpec {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub label_step: f64,
    pub value: f64,
    pub orientation: Orientation,
    pub label_style: LabelStyle,
}

impl SliderSpec {
    pub fn for_video(state: &VideoLayerState, label_style: LabelStyle) -> Self {
        Self {
            min: 0.0,
            max: state.duration,
            step: SEEK_STEP,
            label_step: LABEL_STEP,
            value: state.played_seconds,
            orientation: Orientation::Horizontal,
            label_style,
        }
    }

    /// 最后一个整秒刻度的序号；范围无效时为 `None`
    fn last_tick(&self) -> Option<u64> {
        if !self.max.is_finite() || self.max < self.min {
            return None;
        }
        Some((self.max / self.label_step).floor() as u64)
    }

    /// 标签数不超过 `max_labels` 时的刻度间隔（以 `label_step` 为单位）
    pub fn label_stride(&self, max_labels: usize) -> u64 {
        let Some(last) = self.last_tick() else {
            return 1;
        };
        let count = last.saturating_add(1);
        let raw = count.div_ceil(max_labels.max(1) as u64);
        NICE_STRIDES
            .iter()
            .copied()
            .find(|&s| s >= raw)
            .unwrap_or_else(|| raw.div_ceil(3600).saturating_mul(3600))
    }

    /// 整秒刻度及其标签，最多 `max_labels` 个；刻度值向下取整
    pub fn labels(&self, max_labels: usize) -> Vec<(f64, String)> {
        let Some(last) = self.last_tick() else {
            return Vec::new();
        };
        let stride = self.label_stride(max_labels);
        (0..=last)
            .step_by(stride as usize)
            .map(|i| {
                let tick = (self.min + i as f64 * self.label_step).floor();
                (tick, self.label_style.format(tick))
            })
            .collect()
    }

    /// 将任意值钳制到进度条范围
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max.max(self.min))
    }
}

/// 面板渲染结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum PanelView {
    /// 视频图层未加载，什么都不渲染
    Unloaded,
    Loaded { readout: String, slider: SliderSpec },
}

impl PanelView {
    pub fn derive(state: Option<VideoLayerState>, label_style: LabelStyle) -> Self {
        match state {
            None => PanelView::Unloaded,
            Some(state) => PanelView::Loaded {
                readout: state.played_seconds.to_string(),
                slider: SliderSpec::for_video(&state, label_style),
            },
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, PanelView::Loaded { .. })
    }

    pub fn slider(&self) -> Option<&SliderSpec> {
        match self {
            PanelView::Loaded { slider, .. } => Some(slider),
            PanelView::Unloaded => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_state_renders_nothing() {
        let view = PanelView::derive(None, LabelStyle::Compat);
        assert_eq!(view, PanelView::Unloaded);
        assert!(view.slider().is_none());
    }

    #[test]
    fn test_loaded_slider_config() {
        let view = PanelView::derive(Some(VideoLayerState::new(12.5, 90.0)), LabelStyle::Compat);
        let PanelView::Loaded { readout, slider } = view else {
            panic!("expected loaded view");
        };
        assert_eq!(readout, "12.5");
        assert_eq!(slider.min, 0.0);
        assert_eq!(slider.max, 90.0);
        assert_eq!(slider.value, 12.5);
        assert_eq!(slider.step, 0.1);
        assert_eq!(slider.label_step, 1.0);
        assert_eq!(slider.orientation, Orientation::Horizontal);
    }

    #[test]
    fn test_readout_whole_seconds() {
        let view = PanelView::derive(Some(VideoLayerState::new(1.0, 10.0)), LabelStyle::Compat);
        let PanelView::Loaded { readout, .. } = view else {
            panic!("expected loaded view");
        };
        assert_eq!(readout, "1");
    }

    #[test]
    fn test_labels_every_whole_second() {
        let slider = SliderSpec::for_video(&VideoLayerState::new(0.0, 65.7), LabelStyle::Compat);
        let labels = slider.labels(usize::MAX);
        assert_eq!(labels.len(), 66);
        assert_eq!(labels[0], (0.0, ":00".to_string()));
        assert_eq!(labels[5], (5.0, ":05".to_string()));
        assert_eq!(labels[65], (65.0, "1:05".to_string()));
    }

    #[test]
    fn test_zero_duration_degenerates() {
        let slider = SliderSpec::for_video(&VideoLayerState::new(0.0, 0.0), LabelStyle::Compat);
        assert_eq!(slider.max, 0.0);
        assert_eq!(slider.labels(10), vec![(0.0, ":00".to_string())]);
        assert_eq!(slider.clamp(5.0), 0.0);
    }

    #[test]
    fn test_contradictory_state_does_not_panic() {
        let slider = SliderSpec::for_video(&VideoLayerState::new(20.0, 10.0), LabelStyle::Compat);
        assert_eq!(slider.value, 20.0);
        assert_eq!(slider.clamp(slider.value), 10.0);

        let slider = SliderSpec::for_video(&VideoLayerState::new(0.0, f64::NAN), LabelStyle::Compat);
        assert!(slider.labels(10).is_empty());
    }

    #[test]
    fn test_labels_capped_for_long_media() {
        let slider = SliderSpec::for_video(&VideoLayerState::new(0.0, 1.0e7), LabelStyle::Hms);
        let labels = slider.labels(20);
        assert!(labels.len() <= 20);
        assert!(!labels.is_empty());
        assert_eq!(labels[0].0, 0.0);
    }

    #[test]
    fn test_label_stride_prefers_round_steps() {
        let slider = SliderSpec::for_video(&VideoLayerState::new(0.0, 600.0), LabelStyle::Compat);
        assert_eq!(slider.label_stride(usize::MAX), 1);
        assert_eq!(slider.label_stride(20), 60);

        let labels = slider.labels(20);
        assert_eq!(labels.len(), 11);
        assert_eq!(labels[1], (60.0, "1:00".to_string()));
        assert_eq!(labels[10], (600.0, "10:00".to_string()));
    }

    #[test]
    fn test_label_stride_beyond_half_hour() {
        let slider = SliderSpec::for_video(&VideoLayerState::new(0.0, 36000.0), LabelStyle::Hms);
        assert_eq!(slider.label_stride(4), 10800);
        assert_eq!(slider.labels(4).len(), 4);
    }

    #[test]
    fn test_view_json() {
        let view = PanelView::derive(Some(VideoLayerState::new(2.0, 3.0)), LabelStyle::Hms);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["state"], "loaded");
        assert_eq!(json["slider"]["max"], 3.0);
        assert_eq!(json["slider"]["label_style"], "hms");

        let json = serde_json::to_value(PanelView::Unloaded).unwrap();
        assert_eq!(json, serde_json::json!({"state": "unloaded"}));
    }
}
