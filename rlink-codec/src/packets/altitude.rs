//! 高度/气压数据包

use rlink_core::DecodeError;
use serde::Serialize;

use crate::field_extractor::FieldExtractor;

/// 载荷长度：4个32位字段
pub const ALTITUDE_NIBBLES: usize = 32;

/// 原始值统一的缩放因子
const SCALE: f64 = 1000.0;

/// 高度数据
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AltitudeData {
    /// 任务时间（毫秒）
    pub time: u32,
    pub pressure: f64,
    /// 摄氏度
    pub temperature: f64,
    /// 米
    pub altitude: f64,
}

impl AltitudeData {
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        let fields = FieldExtractor::from_hex(raw)?;
        fields.expect_nibbles("altitude", ALTITUDE_NIBBLES)?;

        Ok(Self {
            time: fields.unsigned_nibbles(0, 8)? as u32,
            pressure: fields.unsigned_nibbles(8, 16)? as f64 / SCALE,
            temperature: fields.unsigned_nibbles(16, 24)? as f64 / SCALE,
            altitude: fields.unsigned_nibbles(24, 32)? as f64 / SCALE,
        })
    }
}
