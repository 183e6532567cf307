//! 应用配置
//!
//! 可从JSON文件加载，缺省字段取默认值

use std::path::Path;

use anyhow::Context;
use rlink_codec::DecoderConfig;
use serde::{Deserialize, Serialize};

/// 队列容量上限
pub const MAX_QUEUE_CAPACITY: usize = 1 << 20;

/// 应用配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub queue_capacity: usize, // 各级队列容量
    pub pretty: bool,          // 是否格式化输出JSON
    pub decoder: DecoderConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 64,
            pretty: false,
            decoder: DecoderConfig::default(),
        }
    }
}

impl AppConfig {
    /// 从JSON文件加载配置
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let config: AppConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.queue_capacity == 0 {
            anyhow::bail!("queue_capacity must be greater than zero");
        }
        if self.queue_capacity > MAX_QUEUE_CAPACITY {
            anyhow::bail!(
                "queue_capacity {} exceeds the maximum of {MAX_QUEUE_CAPACITY}",
                self.queue_capacity
            );
        }
        self.decoder.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_nested_decoder_config() {
        let json = r#"{"pretty": true, "decoder": {"angular_velocity_resolution": 11}}"#;
        let config = AppConfig::from_json(json).unwrap();
        assert!(config.pretty);
        assert_eq!(config.queue_capacity, 64);
        assert_eq!(config.decoder.angular_velocity_resolution, 11);
        assert_eq!(config.decoder.accel_resolution, 16);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(AppConfig::from_json(r#"{"queue_capacity": 0}"#).is_err());
        assert!(AppConfig::from_json(r#"{"decoder": {"accel_resolution": 20}}"#).is_err());
        assert!(AppConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_queue_capacity_upper_bound() {
        let mut config = AppConfig {
            queue_capacity: MAX_QUEUE_CAPACITY,
            ..AppConfig::default()
        };
        assert!(config.validate().is_ok());

        config.queue_capacity = usize::MAX;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("exceeds the maximum"));

        let json = format!(r#"{{"queue_capacity": {}}}"#, MAX_QUEUE_CAPACITY + 1);
        assert!(AppConfig::from_json(&json).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/rlink.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
