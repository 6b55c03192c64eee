//! Engine configuration file handling
//!
//! A configuration describes the sheet material and the default parameters
//! every edge family starts from:
//! - material thickness and kerf ("burn") compensation
//! - bed bolt slot and hex hole pattern dimensions
//! - per-settings-type overrides, keyed by the settings type name
//!   (`FingerJoint`, `DoveTail`, `Flex`, `Grip`)
//!
//! ```toml
//! thickness = 4.0
//! burn = 0.05
//!
//! [edges.FingerJoint]
//! space = 1.5
//! style = "springs"
//! ```

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// A single parameter value as written in a config file or passed by code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl ParamValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short type name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Flag(_) => "flag",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Overrides for one settings type, parameter name to value.
pub type ParamOverrides = BTreeMap<String, ParamValue>;

/// Dimensions of the T-slot cut for a bolt and captive nut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BedBoltSettings {
    /// Bolt diameter
    pub d: f64,
    /// Nut width across flats
    pub d_nut: f64,
    /// Nut height
    pub h_nut: f64,
    /// Bolt length
    pub l: f64,
    /// Distance of the nut from the edge
    pub l1: f64,
}

impl Default for BedBoltSettings {
    fn default() -> Self {
        Self {
            d: 3.0,
            d_nut: 5.5,
            h_nut: 2.0,
            l: 20.0,
            l1: 15.0,
        }
    }
}

/// Hex pattern used to fill plates with round holes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HexHoleSettings {
    /// Hole radius
    pub radius: f64,
    /// Material left between neighbouring holes
    pub spacing: f64,
}

impl Default for HexHoleSettings {
    fn default() -> Self {
        Self {
            radius: 5.0,
            spacing: 3.0,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Material thickness in mm
    pub thickness: f64,
    /// Half of the kerf width in mm
    pub burn: f64,
    /// Draw helper outlines in the annotation colour
    pub debug: bool,
    /// Bolt slot dimensions
    pub bed_bolt: BedBoltSettings,
    /// Hex hole pattern
    pub hex_holes: HexHoleSettings,
    /// Parameter overrides per settings type
    pub edges: BTreeMap<String, ParamOverrides>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thickness: 3.0,
            burn: 0.1,
            debug: false,
            bed_bolt: BedBoltSettings::default(),
            hex_holes: HexHoleSettings::default(),
            edges: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults for a given material thickness.
    pub fn with_thickness(thickness: f64) -> Self {
        Self {
            thickness,
            ..Self::default()
        }
    }

    /// Gap left between parts placed next to each other.
    pub fn spacing(&self) -> f64 {
        2.0 * self.burn + 0.5 * self.thickness
    }

    /// Overrides recorded for a settings type, if any.
    pub fn overrides_for(&self, settings: &str) -> Option<&ParamOverrides> {
        self.edges.get(settings)
    }

    /// Record a single override.
    pub fn set_override(
        &mut self,
        settings: &str,
        name: &str,
        value: impl Into<ParamValue>,
    ) -> &mut Self {
        self.edges
            .entry(settings.to_string())
            .or_default()
            .insert(name.to_string(), value.into());
        self
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format_of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), thickness = config.thickness, "loaded engine config");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.thickness.is_finite() && self.thickness > 0.0) {
            return Err(invalid("thickness", "must be a positive number"));
        }

        if !(self.burn.is_finite() && self.burn >= 0.0) {
            return Err(invalid("burn", "must not be negative"));
        }

        let bolt = &self.bed_bolt;
        if bolt.d <= 0.0 || bolt.d_nut < bolt.d {
            return Err(invalid(
                "bed_bolt",
                "bolt diameter must be positive and not exceed the nut width",
            ));
        }
        if bolt.l < bolt.l1 + bolt.h_nut {
            return Err(invalid("bed_bolt", "bolt too short for the nut position"));
        }

        if self.hex_holes.radius <= 0.0 || self.hex_holes.spacing < 0.0 {
            return Err(invalid(
                "hex_holes",
                "radius must be positive and spacing not negative",
            ));
        }

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

fn invalid(key: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidSetting {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
