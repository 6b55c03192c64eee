//! Dovetail joints (`d` tails, `D` the opposing side)

use super::{BoundaryEdge, EdgeDrawOptions};
use crate::error::EngineResult;
use crate::params::{no_check, AbsoluteDefault, SettingsSchema, SharedSettings};
use crate::sheet::Sheet;
use std::f64::consts::FRAC_PI_2;
use tracing::warn;

pub static DOVE_TAIL: SettingsSchema = SettingsSchema {
    name: "DoveTail",
    // how much the tails widen, -80 to 80 degrees
    absolute: &[("angle", AbsoluteDefault::Number(50.0))],
    relative: &[("size", 3.0), ("depth", 1.5), ("radius", 0.2)],
    check: no_check,
};

#[derive(Debug, Clone)]
pub struct DoveTailJoint {
    settings: SharedSettings,
    positive: bool,
}

impl DoveTailJoint {
    pub fn new(settings: SharedSettings, positive: bool) -> Self {
        Self { settings, positive }
    }
}

impl BoundaryEdge for DoveTailJoint {
    fn symbol(&self) -> Option<char> {
        Some(if self.positive { 'd' } else { 'D' })
    }

    fn description(&self) -> &'static str {
        if self.positive {
            "Dove Tail Joint"
        } else {
            "Dove Tail Joint (opposing side)"
        }
    }

    fn settings(&self) -> Option<SharedSettings> {
        Some(self.settings.clone())
    }

    fn draw(&self, sheet: &mut Sheet, length: f64, _opts: &EdgeDrawOptions<'_>) -> EngineResult<()> {
        let (angle, size, depth, radius) = {
            let s = self.settings.borrow();
            (
                s.number("angle"),
                s.number("size"),
                s.number("depth"),
                s.number("radius"),
            )
        };

        // no smaller than burn
        let radius = if radius < sheet.burn() {
            warn!(radius, burn = sheet.burn(), "dovetail radius raised to burn");
            sheet.burn()
        } else {
            radius
        };

        let a = angle + 90.0;
        let alpha = FRAC_PI_2 - angle.to_radians();
        let l1 = radius / (alpha / 2.0).tan();
        let diffx = 0.5 * depth / alpha.tan();
        let l2 = 0.5 * depth / alpha.sin();

        let sections = (length / (size * 2.0)).floor().max(0.0) as usize;
        let leftover = length - sections as f64 * size * 2.0;
        if sections == 0 {
            sheet.edge(length);
            return Ok(());
        }

        let p = if self.positive { 1.0 } else { -1.0 };
        let end = (size + leftover) / 2.0 + diffx - l1;
        let flank = 2.0 * (l2 - l1);
        let run = 2.0 * (diffx - l1) + size;

        sheet.edge(end);
        for i in 0..sections {
            sheet.corner(-p * a, radius);
            sheet.edge(flank);
            sheet.corner(p * a, radius);
            sheet.edge(run);
            sheet.corner(p * a, radius);
            sheet.edge(flank);
            sheet.corner(-p * a, radius);

            if i + 1 < sections {
                sheet.edge(run);
            }
        }
        sheet.edge(end);
        Ok(())
    }

    fn margin(&self) -> f64 {
        if self.positive {
            self.settings.borrow().number("depth")
        } else {
            0.0
        }
    }
}
