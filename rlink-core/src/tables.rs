//! 静态查找表
//!
//! 半字节展开表以及KX134加速度计的量程/输出速率表

use crate::error::DecodeError;

/// 十六进制数值到4位二进制（MSB优先）的展开表
pub const NIBBLE_BITS: [[bool; 4]; 16] = [
    [false, false, false, false],
    [false, false, false, true],
    [false, false, true, false],
    [false, false, true, true],
    [false, true, false, false],
    [false, true, false, true],
    [false, true, true, false],
    [false, true, true, true],
    [true, false, false, false],
    [true, false, false, true],
    [true, false, true, false],
    [true, false, true, true],
    [true, true, false, false],
    [true, true, false, true],
    [true, true, true, false],
    [true, true, true, true],
];

/// KX134-1211 输出数据速率（Hz），按4位ODR编码索引
pub const KX134_DATA_RATES_HZ: [f64; 16] = [
    0.781, 1.563, 3.125, 6.25, 12.5, 25.0, 50.0, 100.0, 200.0, 400.0, 800.0, 1600.0, 3200.0,
    6400.0, 12800.0, 25600.0,
];

/// KX134-1211 量程（g），按2位GSEL编码索引
pub const KX134_FULL_SCALE_RANGES_G: [i32; 4] = [8, 16, 32, 64];

/// 量程编码无法识别时的哨兵值
pub const UNKNOWN_FULL_SCALE_RANGE: i32 = -1;

/// 查询KX134输出数据速率
pub fn kx134_data_rate(code: u64) -> Result<f64, DecodeError> {
    usize::try_from(code)
        .ok()
        .and_then(|idx| KX134_DATA_RATES_HZ.get(idx).copied())
        .ok_or(DecodeError::UnknownCode {
            context: "kx134 data rate",
            code,
        })
}

/// 查询KX134量程，未知编码返回 `-1`
pub fn kx134_full_scale_range(code: u64) -> i32 {
    usize::try_from(code)
        .ok()
        .and_then(|idx| KX134_FULL_SCALE_RANGES_G.get(idx).copied())
        .unwrap_or(UNKNOWN_FULL_SCALE_RANGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nibble_table_matches_value() {
        for (value, bits) in NIBBLE_BITS.iter().enumerate() {
            let decoded = bits.iter().fold(0usize, |acc, &b| (acc << 1) | b as usize);
            assert_eq!(decoded, value);
        }
    }

    #[test]
    fn test_data_rate_table_doubles() {
        assert_eq!(kx134_data_rate(0x0).unwrap(), 0.781);
        assert_eq!(kx134_data_rate(0x6).unwrap(), 50.0);
        assert_eq!(kx134_data_rate(0xF).unwrap(), 25600.0);
        // 从12.5Hz开始严格翻倍
        for code in 4..15 {
            assert_eq!(
                kx134_data_rate(code + 1).unwrap(),
                kx134_data_rate(code).unwrap() * 2.0
            );
        }
    }

    #[test]
    fn test_data_rate_unknown_code() {
        assert_eq!(
            kx134_data_rate(0x10),
            Err(DecodeError::UnknownCode {
                context: "kx134 data rate",
                code: 0x10
            })
        );
    }

    #[test]
    fn test_full_scale_range_sentinel() {
        assert_eq!(kx134_full_scale_range(0), 8);
        assert_eq!(kx134_full_scale_range(3), 64);
        assert_eq!(kx134_full_scale_range(4), UNKNOWN_FULL_SCALE_RANGE);
    }
}
