//! Configuration management for jointkit
//!
//! Holds the material-level engine configuration (thickness, kerf, bed bolt
//! and hex hole dimensions) plus per-settings-type parameter overrides, and
//! reads/writes it as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{BedBoltSettings, EngineConfig, HexHoleSettings, ParamOverrides, ParamValue};
pub use error::{SettingsError, SettingsResult};
