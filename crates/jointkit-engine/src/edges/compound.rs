//! Edges built from other edges: compound runs, slots and slotted edges.

use super::{BoundaryEdge, EdgeDrawOptions, EdgeRegistry, EdgeSpec};
use crate::error::{EngineError, EngineResult};
use crate::sheet::Sheet;
use std::rc::Rc;

const LENGTH_TOLERANCE: f64 = 1e-5;

/// Edge composed of multiple different edges.
#[derive(Clone)]
pub struct CompoundEdge {
    parts: Vec<(Rc<dyn BoundaryEdge>, f64)>,
    length: f64,
}

impl std::fmt::Debug for CompoundEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<_> = self
            .parts
            .iter()
            .map(|(e, l)| (e.description(), *l))
            .collect();
        f.debug_struct("CompoundEdge").field("parts", &parts).finish()
    }
}

impl CompoundEdge {
    /// Resolve `(edge, length)` pairs through `registry`.
    pub fn new<I, S>(registry: &EdgeRegistry, parts: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<EdgeSpec>,
    {
        let parts = parts
            .into_iter()
            .map(|(spec, length)| Ok((registry.resolve(&spec.into())?, length)))
            .collect::<EngineResult<Vec<_>>>()?;
        if parts.is_empty() {
            return Err(EngineError::EdgeCount {
                expected: 1,
                found: 0,
            });
        }
        let length = parts.iter().map(|(_, l)| l).sum();
        Ok(Self { parts, length })
    }

    /// Sum of the part lengths.
    pub fn length(&self) -> f64 {
        self.length
    }

    fn first(&self) -> &Rc<dyn BoundaryEdge> {
        &self.parts[0].0
    }

    fn last(&self) -> &Rc<dyn BoundaryEdge> {
        &self.parts[self.parts.len() - 1].0
    }
}

impl BoundaryEdge for CompoundEdge {
    fn description(&self) -> &'static str {
        "Compound Edge"
    }

    /// A `length` of zero draws the parts without checking their sum.
    fn draw(&self, sheet: &mut Sheet, length: f64, _opts: &EdgeDrawOptions<'_>) -> EngineResult<()> {
        if length != 0.0 && (length - self.length).abs() > LENGTH_TOLERANCE {
            return Err(EngineError::LengthMismatch {
                expected: length,
                actual: self.length,
            });
        }
        let opts = EdgeDrawOptions::default();
        for (edge, l) in &self.parts {
            edge.draw(sheet, *l, &opts)?;
        }
        Ok(())
    }

    fn start_width(&self) -> f64 {
        self.first().start_width()
    }

    fn end_width(&self) -> f64 {
        self.last().end_width()
    }

    fn margin(&self) -> f64 {
        let widest = self
            .parts
            .iter()
            .map(|(e, _)| e.margin() + e.start_width())
            .fold(f64::NEG_INFINITY, f64::max);
        widest - self.first().start_width()
    }
}

/// Edge with a slot to slide another piece through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    depth: f64,
}

impl Slot {
    pub fn new(depth: f64) -> Self {
        Self { depth }
    }
}

impl BoundaryEdge for Slot {
    fn description(&self) -> &'static str {
        "Slot"
    }

    fn draw(&self, sheet: &mut Sheet, length: f64, _opts: &EdgeDrawOptions<'_>) -> EngineResult<()> {
        if self.depth == 0.0 {
            sheet.edge(length);
            return Ok(());
        }
        sheet.corner(90.0, 0.0);
        sheet.edge(self.depth);
        sheet.corner(-90.0, 0.0);
        sheet.edge(length);
        sheet.corner(-90.0, 0.0);
        sheet.edge(self.depth);
        sheet.corner(90.0, 0.0);
        Ok(())
    }
}

/// Straight edge with slots between its sections.
#[derive(Clone)]
pub struct SlottedEdge {
    edge: Rc<dyn BoundaryEdge>,
    sections: Vec<f64>,
    slot_depth: f64,
    thickness: f64,
}

impl std::fmt::Debug for SlottedEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlottedEdge")
            .field("edge", &self.edge.description())
            .field("sections", &self.sections)
            .field("slot_depth", &self.slot_depth)
            .finish()
    }
}

impl SlottedEdge {
    /// Sections of `edge` separated by thickness-wide gaps, cut as slots
    /// `slot_depth` deep when it is non-zero.
    pub fn new(
        registry: &EdgeRegistry,
        sections: Vec<f64>,
        edge: impl Into<EdgeSpec>,
        slot_depth: f64,
    ) -> EngineResult<Self> {
        if sections.is_empty() {
            return Err(EngineError::InvalidSections(String::new()));
        }
        Ok(Self {
            edge: registry.resolve(&edge.into())?,
            sections,
            slot_depth,
            thickness: registry.thickness(),
        })
    }

    /// Length covered by the sections and the gaps between them.
    pub fn length(&self) -> f64 {
        self.sections.iter().sum::<f64>() + (self.sections.len() - 1) as f64 * self.thickness
    }
}

impl BoundaryEdge for SlottedEdge {
    fn description(&self) -> &'static str {
        "Straight Edge with slots"
    }

    fn draw(&self, sheet: &mut Sheet, _length: f64, opts: &EdgeDrawOptions<'_>) -> EngineResult<()> {
        let slot = Slot::new(self.slot_depth);
        let (last, init) = match self.sections.split_last() {
            Some(split) => split,
            None => return Ok(()),
        };
        for l in init {
            self.edge.draw(sheet, *l, opts)?;
            slot.draw(sheet, self.thickness, opts)?;
        }
        self.edge.draw(sheet, *last, opts)
    }

    fn start_width(&self) -> f64 {
        self.edge.start_width()
    }

    fn end_width(&self) -> f64 {
        self.edge.end_width()
    }

    fn margin(&self) -> f64 {
        self.edge.margin()
    }
}
