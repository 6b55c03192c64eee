//! Stroke colours understood by laser cutter drivers.
//!
//! Outer cuts are black, anything cut inside a part (holes) is blue so the
//! driver can order inner cuts before the outline.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutColor {
    #[default]
    OuterCut,
    InnerCut,
    Annotation,
    Etching,
    EtchingDeep,
}

impl CutColor {
    /// RGB components in the 0.0..=1.0 range.
    pub fn rgb(self) -> [f64; 3] {
        match self {
            Self::OuterCut => [0.0, 0.0, 0.0],
            Self::InnerCut => [0.0, 0.0, 1.0],
            Self::Annotation => [1.0, 0.0, 0.0],
            Self::Etching => [0.0, 1.0, 0.0],
            Self::EtchingDeep => [0.0, 1.0, 1.0],
        }
    }

    /// Hex notation for SVG `stroke` attributes.
    pub fn svg_hex(self) -> String {
        let [r, g, b] = self.rgb();
        let channel = |c: f64| (c * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
    }
}

impl fmt::Display for CutColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OuterCut => write!(f, "outer cut"),
            Self::InnerCut => write!(f, "inner cut"),
            Self::Annotation => write!(f, "annotation"),
            Self::Etching => write!(f, "etching"),
            Self::EtchingDeep => write!(f, "deep etching"),
        }
    }
}
