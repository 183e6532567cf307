//! 解码错误定义

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// 载荷或字段长度与期望的半字节数不符
    LengthMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },
    /// 非十六进制（或非二进制）字符
    InvalidDigit { offset: usize, found: char },
    /// bit范围超出可用位数
    OutOfRange {
        start: usize,
        end: usize,
        available: usize,
    },
    /// 查表失败
    UnknownCode { context: &'static str, code: u64 },
    /// 名称无法识别
    UnknownName { context: &'static str, name: String },
}

impl DecodeError {
    /// 错误类别名称，便于日志和统计
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::LengthMismatch { .. } => "LengthMismatch",
            DecodeError::InvalidDigit { .. } => "InvalidDigit",
            DecodeError::OutOfRange { .. } => "OutOfRange",
            DecodeError::UnknownCode { .. } => "UnknownCode",
            DecodeError::UnknownName { .. } => "UnknownName",
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::LengthMismatch {
                context,
                expected,
                actual,
            } => write!(
                f,
                "Length mismatch in {context}: expected {expected} nibbles, got {actual}"
            ),
            DecodeError::InvalidDigit { offset, found } => {
                write!(f, "Invalid digit {found:?} at offset {offset}")
            }
            DecodeError::OutOfRange {
                start,
                end,
                available,
            } => write!(
                f,
                "Bit range [{start}, {end}) out of range: {available} bits available"
            ),
            DecodeError::UnknownCode { context, code } => {
                write!(f, "Unknown {context} code: {code:#x}")
            }
            DecodeError::UnknownName { context, name } => {
                write!(f, "Unknown {context}: {name:?}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = DecodeError::LengthMismatch {
            context: "altitude",
            expected: 32,
            actual: 30,
        };
        assert_eq!(
            err.to_string(),
            "Length mismatch in altitude: expected 32 nibbles, got 30"
        );

        let err = DecodeError::InvalidDigit {
            offset: 3,
            found: 'g',
        };
        assert_eq!(err.to_string(), "Invalid digit 'g' at offset 3");

        let err = DecodeError::UnknownCode {
            context: "kx134 data rate",
            code: 0x10,
        };
        assert_eq!(err.to_string(), "Unknown kx134 data rate code: 0x10");

        let err = DecodeError::UnknownName {
            context: "packet kind",
            name: "status".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown packet kind: \"status\"");
        assert_eq!(err.kind(), "UnknownName");
    }

    #[test]
    fn test_kind_names() {
        let err = DecodeError::OutOfRange {
            start: 0,
            end: 8,
            available: 4,
        };
        assert_eq!(err.kind(), "OutOfRange");
    }
}
