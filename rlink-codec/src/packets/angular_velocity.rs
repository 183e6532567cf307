//! 角速度数据包
//!
//! 与加速度包布局相同，但FSR右移量为 `16 - (resolution + 1)`

use rlink_core::DecodeError;
use serde::Serialize;

use super::acceleration::AXIS_FULL_SCALE;
use crate::field_extractor::FieldExtractor;

pub const ANGULAR_VELOCITY_NIBBLES: usize = 24;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AngularVelocityData {
    pub time: u32,
    pub fsr: i64,
    pub x_velocity: f64,
    pub y_velocity: f64,
    pub z_velocity: f64,
}

impl AngularVelocityData {
    /// 解码角速度包，`resolution` 取值 0..=15
    pub fn decode(raw: &str, resolution: u8) -> Result<Self, DecodeError> {
        if resolution > 15 {
            return Err(DecodeError::UnknownCode {
                context: "angular velocity resolution",
                code: resolution.into(),
            });
        }

        let fields = FieldExtractor::from_hex(raw)?;
        fields.expect_nibbles("angular_velocity", ANGULAR_VELOCITY_NIBBLES)?;

        let adjustment = 16 - (u32::from(resolution) + 1);
        let fsr = (fields.unsigned_nibbles(8, 12)? >> adjustment) as i64;
        let scale = fsr as f64 / AXIS_FULL_SCALE;

        let velocity = |start: usize| -> Result<f64, DecodeError> {
            Ok(fields.unsigned_nibbles(start, start + 4)? as f64 * scale)
        };

        Ok(Self {
            time: fields.unsigned_nibbles(0, 8)? as u32,
            fsr,
            x_velocity: velocity(12)?,
            y_velocity: velocity(16)?,
            z_velocity: velocity(20)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_angular_velocity() {
        // resolution=15 → 不移位
        let data = AngularVelocityData::decode("0000271007D0800040000001", 15).unwrap();
        assert_eq!(data.time, 10_000);
        assert_eq!(data.fsr, 2000);
        assert_eq!(data.x_velocity, 2000.0);
        assert_eq!(data.y_velocity, 1000.0);
        assert_eq!(data.z_velocity, 2000.0 / 32768.0);
    }

    #[test]
    fn test_shift_differs_from_acceleration() {
        // 同一FSR原始值0x0100，分辨率14：角速度右移1位，加速度右移3位
        let raw = "000000000100000000000000";
        let gyro = AngularVelocityData::decode(raw, 14).unwrap();
        let accel = super::super::AccelerationData::decode(raw, 14).unwrap();
        assert_eq!(gyro.fsr, 128);
        assert_eq!(accel.fsr, 32);
    }

    #[test]
    fn test_decode_angular_velocity_errors() {
        assert!(AngularVelocityData::decode("0000271007D0800040000001", 16).is_err());
        assert!(matches!(
            AngularVelocityData::decode("0000271007D08000400000", 15),
            Err(DecodeError::LengthMismatch { .. })
        ));
        assert!(matches!(
            AngularVelocityData::decode("0000271007D080004000000Z", 15),
            Err(DecodeError::InvalidDigit { offset: 23, .. })
        ));
    }
}
