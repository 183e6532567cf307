//! KX134-1211 加速度计数据包
//!
//! 头部（bit偏移）：
//! - `[0, 32)` 时间戳
//! - `[32, 36)` 输出数据速率编码
//! - `[36, 38)` 量程编码
//! - `38` 低通滤波转折频率选择（0: ODR/9，1: ODR/2）
//! - `39` 采样分辨率（0: 8位，1: 16位）
//! - `[46, 48)` 末尾填充字节数
//!
//! 从第48位开始为采样区，去掉末尾填充后按 `分辨率 * 3` 位切块，
//! 每块依次为 x、y、z。

use rlink_core::tables::{kx134_data_rate, kx134_full_scale_range};
use rlink_core::DecodeError;
use serde::Serialize;

use crate::field_extractor::FieldExtractor;

/// 头部长度：48位
pub const KX134_MIN_NIBBLES: usize = 12;

const SAMPLES_START: usize = 48;
const AXES: usize = 3;

/// 采样分辨率
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SampleResolution {
    /// 8位补码
    Low,
    /// 16位，按无符号读取
    High,
}

impl SampleResolution {
    pub fn bits(self) -> usize {
        match self {
            SampleResolution::Low => 8,
            SampleResolution::High => 16,
        }
    }
}

/// 单次三轴采样
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Kx134Measurement {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kx134AccelData {
    pub time_stamp: u32,
    /// 输出数据速率（Hz）
    pub data_rate: f64,
    /// 量程（g），编码无法识别时为 -1
    pub full_scale_range: i32,
    /// 低通滤波转折频率（Hz）
    pub corner_freq: f64,
    pub resolution: SampleResolution,
    pub measurements: Vec<Kx134Measurement>,
}

impl Kx134AccelData {
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        let fields = FieldExtractor::from_hex(raw)?;
        fields.expect_min_nibbles("kx134_1211_accel", KX134_MIN_NIBBLES)?;

        let data_rate = kx134_data_rate(fields.unsigned(32, 36)?)?;
        let full_scale_range = kx134_full_scale_range(fields.unsigned(36, 38)?);
        let corner_freq = if fields.bit(38)? {
            data_rate / 2.0
        } else {
            data_rate / 9.0
        };
        let resolution = if fields.bit(39)? {
            SampleResolution::High
        } else {
            SampleResolution::Low
        };
        let padding = fields.unsigned(46, 48)? as usize * 8;

        Ok(Self {
            time_stamp: fields.unsigned(0, 32)? as u32,
            data_rate,
            full_scale_range,
            corner_freq,
            resolution,
            measurements: Self::decode_samples(&fields, resolution, padding)?,
        })
    }

    fn decode_samples(
        fields: &FieldExtractor,
        resolution: SampleResolution,
        padding: usize,
    ) -> Result<Vec<Kx134Measurement>, DecodeError> {
        let sample_bits = resolution.bits();
        let chunk_size = sample_bits * AXES;
        let end = fields.bit_len().saturating_sub(padding).max(SAMPLES_START);
        let num_chunks = (end - SAMPLES_START) / chunk_size;

        let read_axis = |start: usize| -> Result<i64, DecodeError> {
            let end = start + sample_bits;
            match resolution {
                SampleResolution::Low => fields.signed(start, end),
                SampleResolution::High => Ok(fields.unsigned(start, end)? as i64),
            }
        };

        (0..num_chunks)
            .map(|i| {
                let chunk = SAMPLES_START + i * chunk_size;
                Ok(Kx134Measurement {
                    x: read_axis(chunk)?,
                    y: read_axis(chunk + sample_bits)?,
                    z: read_axis(chunk + 2 * sample_bits)?,
                })
            })
            .collect()
    }
}
