//! 解码器配置

use rlink_core::DecodeError;
use serde::{Deserialize, Serialize};

/// 解码器配置
///
/// 加速度和角速度包本身不携带采样分辨率，由地面站按机载传感器配置指定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub accel_resolution: u8,            // 加速度计分辨率（位），1..=16
    pub angular_velocity_resolution: u8, // 陀螺仪分辨率（位），0..=15
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            accel_resolution: 16,
            angular_velocity_resolution: 15,
        }
    }
}

impl DecoderConfig {
    /// 校验分辨率取值范围
    pub fn validate(&self) -> Result<(), DecodeError> {
        if !(1..=16).contains(&self.accel_resolution) {
            return Err(DecodeError::UnknownCode {
                context: "acceleration resolution",
                code: self.accel_resolution.into(),
            });
        }
        if self.angular_velocity_resolution > 15 {
            return Err(DecodeError::UnknownCode {
                context: "angular velocity resolution",
                code: self.angular_velocity_resolution.into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(DecoderConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DecoderConfig = serde_json::from_str(r#"{"accel_resolution": 12}"#).unwrap();
        assert_eq!(config.accel_resolution, 12);
        assert_eq!(config.angular_velocity_resolution, 15);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let config = DecoderConfig {
            accel_resolution: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = DecoderConfig {
            angular_velocity_resolution: 16,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
