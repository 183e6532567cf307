//! 工具模块
//!
//! 提供十六进制与二进制之间的转换，以及无符号/补码整数提取

use std::fmt;
use std::str::FromStr;

use crate::error::DecodeError;
use crate::tables::NIBBLE_BITS;

/// 单次提取支持的最大位宽
pub const MAX_FIELD_BITS: usize = 64;

/// MSB优先的位序列
///
/// 每个十六进制字符固定展开为4位，前导零不会被裁剪
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    /// 由位向量构造
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// 以指定位宽编码无符号值（高位截断）
    pub fn from_unsigned(value: u64, width: usize) -> Self {
        let bits = (0..width)
            .map(|i| {
                let shift = width - 1 - i;
                shift < 64 && (value >> shift) & 1 == 1
            })
            .collect();
        Self { bits }
    }

    /// 以指定位宽编码补码值
    pub fn from_signed(value: i64, width: usize) -> Self {
        Self::from_unsigned(value as u64, width)
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_bits(&self) -> &[bool] {
        &self.bits
    }

    /// 获取 `[start, end)` 范围的位切片
    pub fn slice(&self, start: usize, end: usize) -> Result<&[bool], DecodeError> {
        if start > end || end > self.bits.len() {
            return Err(DecodeError::OutOfRange {
                start,
                end,
                available: self.bits.len(),
            });
        }
        Ok(&self.bits[start..end])
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for BitString {
    type Err = DecodeError;

    /// 解析由 `0`/`1` 组成的字符串
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s
            .char_indices()
            .map(|(offset, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                found => Err(DecodeError::InvalidDigit { offset, found }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { bits })
    }
}

/// 去掉可选的 `0x`/`0X` 前缀，返回剩余部分及其在原串中的偏移
fn strip_hex_prefix(hex: &str) -> (&str, usize) {
    match hex.get(..2) {
        Some("0x") | Some("0X") => (&hex[2..], 2),
        _ => (hex, 0),
    }
}

/// 将十六进制字符串转换为位序列
///
/// 每个字符固定展开为4位（保留前导零），大小写不敏感，
/// 仅允许字符串开头带 `0x`/`0X` 前缀
///
/// # 示例
/// ```
/// use rlink_core::hex_to_bits;
///
/// let bits = hex_to_bits("0x1A").unwrap();
/// assert_eq!(bits.to_string(), "00011010");
/// ```
pub fn hex_to_bits(hex: &str) -> Result<BitString, DecodeError> {
    let (digits, prefix_len) = strip_hex_prefix(hex);
    let mut bits = Vec::with_capacity(digits.len() * 4);

    for (idx, c) in digits.char_indices() {
        let nibble = c.to_digit(16).ok_or(DecodeError::InvalidDigit {
            offset: prefix_len + idx,
            found: c,
        })?;
        bits.extend_from_slice(&NIBBLE_BITS[nibble as usize]);
    }

    Ok(BitString { bits })
}

/// 将位序列转换为大写十六进制字符串
///
/// 位数不是4的倍数时在高位补零
pub fn bits_to_hex(bits: &[bool]) -> String {
    let pad = (4 - bits.len() % 4) % 4;
    let padded: Vec<bool> = std::iter::repeat(false)
        .take(pad)
        .chain(bits.iter().copied())
        .collect();

    padded
        .chunks(4)
        .map(|nibble| {
            let value = nibble
                .iter()
                .fold(0u32, |acc, &bit| (acc << 1) | u32::from(bit));
            // value < 16，to_digit的逆运算必定成功
            char::from_digit(value, 16).map_or('0', |c| c.to_ascii_uppercase())
        })
        .collect()
}

/// 按MSB优先解释为无符号整数
pub fn unsigned_from_bits(bits: &[bool]) -> Result<u64, DecodeError> {
    if bits.len() > MAX_FIELD_BITS {
        return Err(DecodeError::OutOfRange {
            start: 0,
            end: bits.len(),
            available: MAX_FIELD_BITS,
        });
    }

    Ok(bits
        .iter()
        .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit)))
}

/// 按位序列的实际宽度解释为补码整数
///
/// 最高位为1时结果为 `unsigned(bits[1..]) - 2^(w-1)`，适用于任意位宽（如9位）
pub fn signed_from_bits(bits: &[bool]) -> Result<i64, DecodeError> {
    if bits.is_empty() || bits.len() > MAX_FIELD_BITS {
        return Err(DecodeError::OutOfRange {
            start: 0,
            end: bits.len(),
            available: MAX_FIELD_BITS,
        });
    }

    let magnitude = unsigned_from_bits(&bits[1..])?;
    if bits[0] {
        // 宽度为64时 2^63 超出i64，用 i64::MIN 表示负权重
        let weight = if bits.len() == MAX_FIELD_BITS {
            i64::MIN
        } else {
            -(1i64 << (bits.len() - 1))
        };
        Ok(weight + magnitude as i64)
    } else {
        Ok(magnitude as i64)
    }
}

fn check_nibbles(hex: &str, expected: usize) -> Result<(), DecodeError> {
    let (digits, _) = strip_hex_prefix(hex);
    if digits.len() != expected {
        return Err(DecodeError::LengthMismatch {
            context: "hex field",
            expected,
            actual: digits.len(),
        });
    }
    Ok(())
}

/// 将定长十六进制字符串转换为无符号整数
pub fn unsigned_from_hex(hex: &str, expected: usize) -> Result<u64, DecodeError> {
    check_nibbles(hex, expected)?;
    unsigned_from_bits(hex_to_bits(hex)?.as_bits())
}

/// 将定长十六进制字符串转换为补码整数（位宽为 4 * 字符数）
pub fn signed_from_hex(hex: &str, expected: usize) -> Result<i64, DecodeError> {
    check_nibbles(hex, expected)?;
    signed_from_bits(hex_to_bits(hex)?.as_bits())
}
