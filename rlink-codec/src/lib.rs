//! rocketlink Telemetry Codec
//!
//! This crate decodes hex-encoded LoRa telemetry payloads into typed sensor
//! records. Every decoder is a pure function of its input string.

pub mod config;
pub mod field_extractor;
pub mod packets;
pub mod registry;

pub use config::DecoderConfig;
pub use field_extractor::FieldExtractor;
pub use packets::*;
pub use registry::{decode_batch, Packet};
pub use rlink_core::{DecodeError, PacketKind};
