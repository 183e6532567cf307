//! rocketlink Ground Station Application
//!
//! Wires the telemetry codec into a staged pipeline: payload source,
//! decoder and JSON writer running as separate tasks.

pub mod config;
pub mod emulator;
pub mod pipeline;

pub use config::AppConfig;
pub use emulator::PayloadEmulator;
pub use pipeline::{run_pipeline, InputError, PipelineStats};
