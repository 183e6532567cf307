//! 加速度数据包

use rlink_core::DecodeError;
use serde::Serialize;

use crate::field_extractor::FieldExtractor;

/// 载荷长度：32位时间 + 4个16位字段
pub const ACCELERATION_NIBBLES: usize = 24;

/// 轴数据的满量程分母 2^15
pub(crate) const AXIS_FULL_SCALE: f64 = 32768.0;

/// 加速度数据
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccelerationData {
    pub time: u32,
    /// 按分辨率调整后的满量程
    pub fsr: i64,
    pub x_axis: f64,
    pub y_axis: f64,
    pub z_axis: f64,
}

impl AccelerationData {
    /// 解码加速度包
    ///
    /// `resolution` 为传感器采样位数（1..=16），决定FSR的右移量 `16 - resolution + 1`
    pub fn decode(raw: &str, resolution: u8) -> Result<Self, DecodeError> {
        if !(1..=16).contains(&resolution) {
            return Err(DecodeError::UnknownCode {
                context: "acceleration resolution",
                code: resolution.into(),
            });
        }

        let fields = FieldExtractor::from_hex(raw)?;
        fields.expect_nibbles("acceleration", ACCELERATION_NIBBLES)?;

        // FSR必须先于各轴解出
        let adjustment = 16 - u32::from(resolution) + 1;
        let fsr = (fields.unsigned_nibbles(8, 12)? >> adjustment) as i64;

        // 轴数据按无符号读取
        let axis = |start: usize| -> Result<f64, DecodeError> {
            let raw_axis = fields.unsigned_nibbles(start, start + 4)? as i64;
            Ok((raw_axis * fsr) as f64 / AXIS_FULL_SCALE)
        };

        Ok(Self {
            time: fields.unsigned_nibbles(0, 8)? as u32,
            fsr,
            x_axis: axis(12)?,
            y_axis: axis(16)?,
            z_axis: axis(20)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_acceleration_full_resolution() {
        // resolution=16 → 右移1位：0x0020 >> 1 = 16
        let data = AccelerationData::decode("000001F4002040000000C000", 16).unwrap();
        assert_eq!(data.time, 500);
        assert_eq!(data.fsr, 16);
        assert_eq!(data.x_axis, 8.0);
        assert_eq!(data.y_axis, 0.0);
        assert_eq!(data.z_axis, 24.0);
    }

    #[test]
    fn test_decode_acceleration_fsr_shift() {
        // resolution=14 → 右移3位：0x0100 >> 3 = 32
        let data = AccelerationData::decode("00000000010000010000FFFF", 14).unwrap();
        assert_eq!(data.fsr, 32);
        assert_eq!(data.x_axis, 32.0 / 32768.0);
        // 0xFFFF 按无符号读取
        assert_eq!(data.z_axis, 65535.0 * 32.0 / 32768.0);
    }

    #[test]
    fn test_decode_acceleration_rejects_bad_resolution() {
        assert_eq!(
            AccelerationData::decode("000001F4002040000000C000", 17),
            Err(DecodeError::UnknownCode {
                context: "acceleration resolution",
                code: 17
            })
        );
        assert!(AccelerationData::decode("000001F4002040000000C000", 0).is_err());
    }

    #[test]
    fn test_decode_acceleration_length_mismatch() {
        assert!(matches!(
            AccelerationData::decode("000001F40020400000", 16),
            Err(DecodeError::LengthMismatch {
                expected: 24,
                actual: 18,
                ..
            })
        ));
    }
}
