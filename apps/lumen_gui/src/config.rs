//! 应用配置

use std::path::{Path, PathBuf};

use lumen_panel::LabelStyle;
use serde::{Deserialize, Serialize};

/// 配置文件路径环境变量
pub const CONFIG_ENV: &str = "LUMEN_CONFIG";
/// 默认配置文件名（工作目录下）
pub const DEFAULT_CONFIG_FILE: &str = "lumen.json";

/// 配置错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window_width: f32,
    pub window_height: f32,
    /// “加载演示视频”使用的时长（秒）
    pub demo_duration_secs: f64,
    /// 视频引擎时钟节拍（毫秒）
    pub tick_ms: u64,
    pub label_style: LabelStyle,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: 900.0,
            window_height: 260.0,
            demo_duration_secs: 600.0,
            tick_ms: 100,
            label_style: LabelStyle::Compat,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// 读取配置；文件不存在时返回默认值
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_json(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn path_from_env() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = AppConfig::from_json(r#"{"label_style": "hms", "tick_ms": 50}"#).unwrap();
        assert_eq!(config.label_style, LabelStyle::Hms);
        assert_eq!(config.tick_ms, 50);
        assert_eq!(config.demo_duration_secs, 600.0);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = AppConfig::load(Path::new("/nonexistent/lumen.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(matches!(
            AppConfig::from_json("{label_style"),
            Err(ConfigError::Parse(_))
        ));
        assert!(AppConfig::from_json(r#"{"label_style": "roman"}"#).is_err());
    }
}
