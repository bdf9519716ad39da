//! egui 渲染

use egui::{Align2, FontId, InnerResponse, RichText, Sense, SliderOrientation, Ui};
use lumen_dispatch::RequestDispatcher;

use crate::{ContextPanel, Orientation, PanelView, SliderSpec};

const LABEL_ROW_HEIGHT: f32 = 14.0;
/// 相邻刻度标签的最小像素间距
const MIN_LABEL_GAP: f32 = 40.0;

impl<D: RequestDispatcher> ContextPanel<D> {
    /// 绘制面板；未加载时不绘制任何内容并返回 `None`。
    ///
    /// `inner` 为本帧松手的位置（若有），`response` 为进度条的响应。
    pub fn show(&self, ui: &mut Ui) -> Option<InnerResponse<Option<f64>>> {
        self.sync();
        let PanelView::Loaded { readout, slider } = self.view() else {
            return None;
        };

        let seek = ui
            .vertical(|ui| {
                ui.label(RichText::new(readout).monospace());
                seek_slider(ui, &slider)
            })
            .inner;

        if let Some(value) = seek.inner {
            self.on_release(value);
        }
        Some(seek)
    }
}

/// 占满可用宽度的进度条；拖动过程中的值暂存在 egui memory，只在松手或点击时返回
fn seek_slider(ui: &mut Ui, slider: &SliderSpec) -> InnerResponse<Option<f64>> {
    let id = ui.make_persistent_id("lumen_seek_slider");
    let mut value = ui
        .data(|d| d.get_temp::<f64>(id))
        .unwrap_or(slider.value);

    let orientation = match slider.orientation {
        Orientation::Horizontal => SliderOrientation::Horizontal,
    };
    let widget = egui::Slider::new(&mut value, slider.min..=slider.max.max(slider.min))
        .step_by(slider.step)
        .orientation(orientation)
        .show_value(false)
        .trailing_fill(true);

    let width = ui.available_width();
    let response = ui
        .scope(|ui| {
            ui.spacing_mut().slider_width = width;
            ui.add(widget)
        })
        .inner;
    paint_tick_labels(ui, response.rect, slider);

    let released = if response.drag_stopped() || (response.clicked() && response.changed()) {
        ui.data_mut(|d| d.remove::<f64>(id));
        Some(slider.clamp(value))
    } else if response.dragged() {
        ui.data_mut(|d| d.insert_temp(id, value));
        None
    } else {
        ui.data_mut(|d| d.remove::<f64>(id));
        None
    };
    InnerResponse::new(released, response)
}

fn paint_tick_labels(ui: &mut Ui, slider_rect: egui::Rect, slider: &SliderSpec) {
    let (row, _) = ui.allocate_exact_size(
        egui::vec2(slider_rect.width(), LABEL_ROW_HEIGHT),
        Sense::hover(),
    );

    let max_labels = (slider_rect.width() / MIN_LABEL_GAP).floor() as usize + 1;
    let labels = slider.labels(max_labels);
    let range = slider.max - slider.min;

    let painter = ui.painter();
    let color = ui.visuals().weak_text_color();
    let font = FontId::proportional(10.0);

    for (tick, text) in &labels {
        let t = if range > 0.0 {
            ((tick - slider.min) / range) as f32
        } else {
            0.0
        };
        let x = slider_rect.left() + slider_rect.width() * t;
        painter.text(
            egui::pos2(x, row.top()),
            Align2::CENTER_TOP,
            text,
            font.clone(),
            color,
        );
    }
}
