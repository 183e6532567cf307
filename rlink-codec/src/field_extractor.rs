//! 字段提取器
//!
//! 每次解码只把载荷展开一次为位序列，所有字段（无论按bit偏移还是按半字节偏移）
//! 都从同一个位视图中提取，保证两种寻址方式的绝对位置一致

use rlink_core::{hex_to_bits, signed_from_bits, unsigned_from_bits, BitString, DecodeError};

/// 每个半字节的位数
pub const BITS_PER_NIBBLE: usize = 4;

/// 载荷字段提取器
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    bits: BitString,
}

impl FieldExtractor {
    /// 由十六进制载荷构造
    ///
    /// # 示例
    /// ```
    /// use rlink_codec::FieldExtractor;
    ///
    /// let fields = FieldExtractor::from_hex("0A45").unwrap();
    /// // bit 5-15 (11bit): 01001000101 = 0x245
    /// assert_eq!(fields.unsigned(5, 16).unwrap(), 0x245);
    /// assert_eq!(fields.unsigned_nibbles(2, 4).unwrap(), 0x45);
    /// ```
    pub fn from_hex(raw: &str) -> Result<Self, DecodeError> {
        Ok(Self {
            bits: hex_to_bits(raw)?,
        })
    }

    /// 总位数
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// 总半字节数
    pub fn nibble_len(&self) -> usize {
        self.bits.len() / BITS_PER_NIBBLE
    }

    /// 要求载荷恰好为 `expected` 个半字节
    pub fn expect_nibbles(&self, packet: &'static str, expected: usize) -> Result<(), DecodeError> {
        if self.nibble_len() != expected {
            return Err(DecodeError::LengthMismatch {
                context: packet,
                expected,
                actual: self.nibble_len(),
            });
        }
        Ok(())
    }

    /// 要求载荷至少为 `minimum` 个半字节
    pub fn expect_min_nibbles(
        &self,
        packet: &'static str,
        minimum: usize,
    ) -> Result<(), DecodeError> {
        if self.nibble_len() < minimum {
            return Err(DecodeError::LengthMismatch {
                context: packet,
                expected: minimum,
                actual: self.nibble_len(),
            });
        }
        Ok(())
    }

    /// 提取 `[start, end)` 位
    pub fn bits(&self, start: usize, end: usize) -> Result<&[bool], DecodeError> {
        self.bits.slice(start, end)
    }

    /// 提取单个位
    pub fn bit(&self, index: usize) -> Result<bool, DecodeError> {
        Ok(self.bits(index, index + 1)?[0])
    }

    /// 将 `[start, end)` 位解释为无符号整数
    pub fn unsigned(&self, start: usize, end: usize) -> Result<u64, DecodeError> {
        unsigned_from_bits(self.bits(start, end)?)
    }

    /// 将 `[start, end)` 位按其宽度解释为补码整数
    pub fn signed(&self, start: usize, end: usize) -> Result<i64, DecodeError> {
        signed_from_bits(self.bits(start, end)?)
    }

    /// 按半字节偏移提取无符号整数
    pub fn unsigned_nibbles(&self, start: usize, end: usize) -> Result<u64, DecodeError> {
        self.unsigned(start * BITS_PER_NIBBLE, end * BITS_PER_NIBBLE)
    }

    /// 按半字节偏移提取补码整数
    pub fn signed_nibbles(&self, start: usize, end: usize) -> Result<i64, DecodeError> {
        self.signed(start * BITS_PER_NIBBLE, end * BITS_PER_NIBBLE)
    }
}
