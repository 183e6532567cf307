//! MPU9250 IMU数据包
//!
//! 只解码头部中可确定的字段；陀螺仪量程与低通滤波带宽尚无解码规则，
//! 因此不出现在记录中。

use rlink_core::DecodeError;
use serde::Serialize;

use crate::field_extractor::FieldExtractor;

/// 头部：32位时间 + 8位采样率 + 8位配置
pub const MPU9250_MIN_NIBBLES: usize = 12;

/// 加速度计量程编码所在位
const ACCEL_FSR_BITS: (usize, usize) = (39, 41);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mpu9250Data {
    pub time_stamp: u32,
    /// 加速度计/陀螺仪采样率
    pub ag_sample_rate: u8,
    /// 加速度计量程（g）
    pub accelerometer_fsr: u16,
}

impl Mpu9250Data {
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        let fields = FieldExtractor::from_hex(raw)?;
        fields.expect_min_nibbles("mpu9250_imu", MPU9250_MIN_NIBBLES)?;

        let (fsr_start, fsr_end) = ACCEL_FSR_BITS;
        let fsr_code = fields.unsigned(fsr_start, fsr_end)?;

        Ok(Self {
            time_stamp: fields.unsigned_nibbles(0, 8)? as u32,
            ag_sample_rate: fields.unsigned_nibbles(8, 10)? as u8,
            accelerometer_fsr: 1u16 << (fsr_code + 1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_mpu9250_header() {
        // bit 39 是采样率字节的最低位（0x64 → 0），bit 40 是下一字节的最高位（0x80 → 1）
        let data = Mpu9250Data::decode("0000FFFF6480").unwrap();
        assert_eq!(data.time_stamp, 0xFFFF);
        assert_eq!(data.ag_sample_rate, 100);
        assert_eq!(data.accelerometer_fsr, 4);
    }

    #[test]
    fn test_accelerometer_fsr_codes() {
        let cases = [("32", "00", 2), ("32", "80", 4), ("33", "00", 8), ("33", "80", 16)];
        for (rate, config, expected) in cases {
            let raw = format!("00000000{rate}{config}");
            assert_eq!(Mpu9250Data::decode(&raw).unwrap().accelerometer_fsr, expected);
        }
    }

    #[test]
    fn test_trailing_measurements_ignored() {
        let short = Mpu9250Data::decode("000000013201").unwrap();
        let long = Mpu9250Data::decode("000000013201DEADBEEF").unwrap();
        assert_eq!(short, long);
    }

    #[test]
    fn test_too_short() {
        assert!(matches!(
            Mpu9250Data::decode("0000000132"),
            Err(DecodeError::LengthMismatch {
                context: "mpu9250_imu",
                expected: 12,
                actual: 10
            })
        ));
    }
}
