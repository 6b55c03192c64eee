//! Straight edges: `e` flush with the inner outline and `E` outset by one
//! material thickness.

use super::{BoundaryEdge, EdgeDrawOptions};
use crate::error::EngineResult;
use crate::sheet::Sheet;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StraightEdge {
    /// Outset distance, zero for a plain edge.
    outset: f64,
}

impl StraightEdge {
    pub fn plain() -> Self {
        Self { outset: 0.0 }
    }

    pub fn outset(thickness: f64) -> Self {
        Self { outset: thickness }
    }

    pub fn is_outset(&self) -> bool {
        self.outset > 0.0
    }
}

impl BoundaryEdge for StraightEdge {
    fn symbol(&self) -> Option<char> {
        Some(if self.is_outset() { 'E' } else { 'e' })
    }

    fn description(&self) -> &'static str {
        if self.is_outset() {
            "Straight Edge (outset by thickness)"
        } else {
            "Straight Edge"
        }
    }

    /// With a bolt policy the length is split into equal intervals: the
    /// outset edge gets a bolt hole in each, the plain edge a bed bolt slot.
    fn draw(&self, sheet: &mut Sheet, length: f64, opts: &EdgeDrawOptions<'_>) -> EngineResult<()> {
        let bolts = opts.bolts.map_or(0, |b| b.bolt_count());
        if bolts == 0 {
            sheet.edge(length);
            return Ok(());
        }

        let interval = length / bolts as f64;
        let bed = opts.bed_bolt.unwrap_or_else(|| sheet.bed_bolt());
        for _ in 0..bolts {
            if self.is_outset() {
                let t = sheet.thickness();
                sheet.hole(0.5 * interval, 0.5 * t, 0.5 * bed.d)?;
                sheet.edge(interval);
            } else {
                sheet.bed_bolt_hole(interval, Some(bed))?;
            }
        }
        Ok(())
    }

    fn start_width(&self) -> f64 {
        self.outset
    }
}
