//! Corrugated edge (`g`) useful as a gripping area.

use super::{BoundaryEdge, EdgeDrawOptions};
use crate::error::EngineResult;
use crate::params::{no_check, AbsoluteDefault, SettingsSchema, SharedSettings};
use crate::sheet::Sheet;

pub static GRIP: SettingsSchema = SettingsSchema {
    name: "Grip",
    absolute: &[
        ("style", AbsoluteDefault::Choice(&["wave", "bumps"])),
        ("outset", AbsoluteDefault::Flag(true)),
    ],
    relative: &[("depth", 0.3)],
    check: no_check,
};

#[derive(Debug, Clone)]
pub struct GrippingEdge {
    settings: SharedSettings,
}

impl GrippingEdge {
    pub fn new(settings: SharedSettings) -> Self {
        Self { settings }
    }

    fn grooves(length: f64, depth: f64) -> usize {
        (length / (depth * 2.0)).floor().max(0.0) as usize + 1
    }

    fn wave(sheet: &mut Sheet, length: f64, depth: f64, outset: bool) {
        let grooves = Self::grooves(length, depth);
        let depth = length / grooves as f64 / 4.0;
        let o = if outset { 1.0 } else { -1.0 };

        for _ in 0..grooves {
            sheet.corner(o * -90.0, depth);
            sheet.corner(o * 180.0, depth);
            sheet.corner(o * -90.0, depth);
        }
    }

    fn bumps(sheet: &mut Sheet, length: f64, depth: f64, outset: bool) {
        let grooves = Self::grooves(length, depth);
        let depth = length / grooves as f64 / 2.0;

        if outset {
            sheet.corner(-90.0, 0.0);
        } else {
            sheet.corner(90.0, 0.0);
            sheet.edge(depth);
            sheet.corner(-180.0, 0.0);
        }

        for _ in 0..grooves {
            sheet.corner(180.0, depth);
            sheet.corner(-180.0, 0.0);
        }

        if outset {
            sheet.corner(90.0, 0.0);
        } else {
            sheet.edge(depth);
            sheet.corner(90.0, 0.0);
        }
    }
}

impl BoundaryEdge for GrippingEdge {
    fn symbol(&self) -> Option<char> {
        Some('g')
    }

    fn description(&self) -> &'static str {
        "Corrugated edge useful as a gripping area"
    }

    fn settings(&self) -> Option<SharedSettings> {
        Some(self.settings.clone())
    }

    fn draw(&self, sheet: &mut Sheet, length: f64, _opts: &EdgeDrawOptions<'_>) -> EngineResult<()> {
        if length == 0.0 {
            return Ok(());
        }
        let (bumps, outset, depth) = {
            let s = self.settings.borrow();
            (s.text("style") == "bumps", s.flag("outset"), s.number("depth"))
        };

        if bumps {
            Self::bumps(sheet, length, depth, outset);
        } else {
            Self::wave(sheet, length, depth, outset);
        }
        Ok(())
    }

    fn margin(&self) -> f64 {
        let s = self.settings.borrow();
        if s.flag("outset") {
            s.number("depth")
        } else {
            0.0
        }
    }
}
