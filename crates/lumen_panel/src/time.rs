//! 刻度时间格式

use serde::{Deserialize, Serialize};

/// 刻度标签样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    /// `m:ss`，满一小时后丢弃小时位（与既有标注工具的显示保持一致）
    #[default]
    Compat,
    /// `h:mm:ss`，不足一小时时与 `Compat` 相同
    Hms,
}

impl LabelStyle {
    pub fn format(self, seconds: f64) -> String {
        match self {
            LabelStyle::Compat => format_time(seconds),
            LabelStyle::Hms => format_time_hms(seconds),
        }
    }
}

fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    }
}

fn format_minutes(minutes: u64, secs: u64) -> String {
    if minutes == 0 {
        format!(":{:02}", secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// 格式化为 `m:ss`，分钟为 0 时输出 `:ss`
///
/// 分钟取模 60：`3665` 秒显示为 `1:05`。
pub fn format_time(seconds: f64) -> String {
    let total = whole_seconds(seconds);
    format_minutes((total / 60) % 60, total % 60)
}

/// 格式化为 `h:mm:ss`，不足一小时时与 [`format_time`] 相同
pub fn format_time_hms(seconds: f64) -> String {
    let total = whole_seconds(seconds);
    let hours = total / 3600;
    if hours == 0 {
        return format_time(seconds);
    }
    format!("{}:{:02}:{:02}", hours, (total / 60) % 60, total % 60)
}
