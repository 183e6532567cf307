//! GNSS定位数据包

use rlink_core::DecodeError;
use serde::Serialize;

use crate::field_extractor::FieldExtractor;

/// 载荷长度：32字节
pub const GNSS_LOCATION_NIBBLES: usize = 64;

/// fix_type位于第62个半字节开始的子串的 [2, 4) 位
const FIX_TYPE_BITS: (usize, usize) = (62 * 4 + 2, 62 * 4 + 4);

/// 定位类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FixType {
    Unknown,
    NotAvailable,
    #[serde(rename = "fix_2d")]
    Fix2D,
    #[serde(rename = "fix_3d")]
    Fix3D,
    Error,
}

impl From<u64> for FixType {
    fn from(code: u64) -> Self {
        match code {
            0 => FixType::Unknown,
            1 => FixType::NotAvailable,
            2 => FixType::Fix2D,
            3 => FixType::Fix3D,
            _ => FixType::Error,
        }
    }
}

/// GNSS定位数据
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GnssLocationData {
    /// 获得定位时的任务时间
    pub fix_time: u32,
    /// 单位 10^-4 角分
    pub latitude: i32,
    pub longitude: i32,
    /// Unix纪元秒
    pub utc_time: u32,
    /// 海拔（毫米）
    pub altitude: u32,
    /// 对地速度（1/100节）
    pub rocket_speed: i16,
    /// 航向（1/100度）
    pub rocket_course: i16,
    pub pdop: u16,
    pub hdop: u16,
    pub vdop: u16,
    pub num_sats: u8,
    pub fix_type: FixType,
}

impl GnssLocationData {
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        let fields = FieldExtractor::from_hex(raw)?;
        fields.expect_nibbles("gnss", GNSS_LOCATION_NIBBLES)?;

        let (fix_start, fix_end) = FIX_TYPE_BITS;

        Ok(Self {
            fix_time: fields.unsigned_nibbles(0, 8)? as u32,
            latitude: fields.signed_nibbles(8, 16)? as i32,
            longitude: fields.signed_nibbles(16, 24)? as i32,
            utc_time: fields.unsigned_nibbles(24, 32)? as u32,
            altitude: fields.unsigned_nibbles(32, 40)? as u32,
            rocket_speed: fields.signed_nibbles(40, 44)? as i16,
            rocket_course: fields.signed_nibbles(44, 48)? as i16,
            pdop: fields.unsigned_nibbles(48, 52)? as u16,
            hdop: fields.unsigned_nibbles(52, 56)? as u16,
            vdop: fields.unsigned_nibbles(56, 60)? as u16,
            num_sats: fields.unsigned_nibbles(60, 62)? as u8,
            fix_type: FixType::from(fields.unsigned(fix_start, fix_end)?),
        })
    }
}
