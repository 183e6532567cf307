//! rocketlink Core Library
//!
//! This crate provides the numeric primitives, lookup tables and block
//! catalog shared by the rocketlink telemetry codec.

pub mod error;
pub mod protocol_meta;
pub mod tables;
pub mod utils;

// 导出错误类型
pub use error::DecodeError;

// 导出块类型目录，便于其他模块使用
pub use protocol_meta::*;

pub use utils::{
    hex_to_bits, signed_from_bits, signed_from_hex, unsigned_from_bits, unsigned_from_hex,
    BitString,
};
