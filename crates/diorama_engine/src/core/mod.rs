//! # Core
//!
//! Top-level configuration shared by the engine and the binaries.

pub mod config;

pub use config::{DioramaConfig, LoggingConfig, AssetConfig, FrameConfig};
pub use crate::config::{Config, ConfigError};
