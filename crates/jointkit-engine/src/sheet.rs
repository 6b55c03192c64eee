//! Drawing context for one cut sheet
//!
//! [`Sheet`] owns the cursor, the edge registry and the ambient drawing
//! parameters (thickness, kerf, spacing). Edges, walls and layout helpers
//! all take `&mut Sheet`, so a part is drawn by a single mutable context
//! threaded through every call.

use crate::bolts::BedBoltSettings;
use crate::cursor::{Cursor, Poly};
use crate::edges::{BoundaryEdge, EdgeDrawOptions, EdgeRegistry, EdgeSpec};
use crate::error::EngineResult;
use crate::surface::Surface;
use jointkit_core::CutColor;
use jointkit_settings::{EngineConfig, HexHoleSettings};
use nalgebra::{Isometry2, Point2, Vector2};
use std::rc::Rc;
use tracing::debug;

/// What a feature callback is told about the place it is drawn at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureContext {
    /// Callback slot, usually the side index of the wall.
    pub index: usize,
    /// Length of the side or span the callback belongs to.
    pub length: f64,
    /// Offset of the callback's origin from the span start.
    pub offset: Vector2<f64>,
}

impl FeatureContext {
    pub fn new(index: usize, length: f64) -> Self {
        Self {
            index,
            length,
            offset: Vector2::zeros(),
        }
    }

    fn at(mut self, x: f64, y: f64) -> Self {
        self.offset = Vector2::new(x, y);
        self
    }
}

/// Caller-supplied drawing run in a part's local frame.
pub type FeatureFn<'a> = Box<dyn FnMut(&mut Sheet, FeatureContext) -> EngineResult<()> + 'a>;

pub struct Sheet {
    cursor: Cursor,
    edges: EdgeRegistry,
    thickness: f64,
    burn: f64,
    spacing: f64,
    debug: bool,
    bed_bolt: BedBoltSettings,
    hex_holes: HexHoleSettings,
}

impl std::fmt::Debug for Sheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sheet")
            .field("cursor", &self.cursor)
            .field("edges", &self.edges)
            .field("thickness", &self.thickness)
            .field("burn", &self.burn)
            .finish()
    }
}

impl Sheet {
    /// Validate `config` and set up a sheet drawing onto `surface`.
    pub fn from_config(config: &EngineConfig, surface: Box<dyn Surface>) -> EngineResult<Self> {
        config.validate()?;
        let edges = EdgeRegistry::new(config)?;
        debug!(
            thickness = config.thickness,
            burn = config.burn,
            spacing = config.spacing(),
            "new sheet"
        );

        Ok(Self {
            cursor: Cursor::new(surface, config.thickness, config.burn),
            edges,
            thickness: config.thickness,
            burn: config.burn,
            spacing: config.spacing(),
            debug: config.debug,
            bed_bolt: config.bed_bolt,
            hex_holes: config.hex_holes,
        })
    }

    pub fn with_defaults(surface: Box<dyn Surface>) -> EngineResult<Self> {
        Self::from_config(&EngineConfig::default(), surface)
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn burn(&self) -> f64 {
        self.burn
    }

    /// Gap kept between parts: `2 * burn + thickness / 2`.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn bed_bolt(&self) -> BedBoltSettings {
        self.bed_bolt
    }

    pub fn hex_holes(&self) -> HexHoleSettings {
        self.hex_holes
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    pub fn edges(&self) -> &EdgeRegistry {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut EdgeRegistry {
        &mut self.edges
    }

    pub fn resolve(&self, spec: &EdgeSpec) -> EngineResult<Rc<dyn BoundaryEdge>> {
        self.edges.resolve(spec)
    }

    /// Draw a single edge from the cursor.
    pub fn draw_edge(
        &mut self,
        spec: impl Into<EdgeSpec>,
        length: f64,
        opts: &EdgeDrawOptions<'_>,
    ) -> EngineResult<()> {
        let edge = self.resolve(&spec.into())?;
        edge.draw(self, length, opts)
    }

    pub fn position(&self) -> Point2<f64> {
        self.cursor.position()
    }

    pub fn heading(&self) -> f64 {
        self.cursor.heading()
    }

    pub fn frame(&self) -> Isometry2<f64> {
        self.cursor.frame()
    }

    pub fn edge(&mut self, length: f64) {
        self.cursor.edge(length);
    }

    pub fn corner(&mut self, degrees: f64, radius: f64) {
        self.cursor.corner(degrees, radius);
    }

    pub fn move_to(&mut self, dx: f64, dy: f64, degrees: f64) {
        self.cursor.move_to(dx, dy, degrees);
    }

    pub fn move_arc(&mut self, degrees: f64, radius: f64) {
        self.cursor.move_arc(degrees, radius);
    }

    pub fn curve_to(&mut self, c1: Point2<f64>, c2: Point2<f64>, to: Point2<f64>) {
        self.cursor.curve_to(c1, c2, to);
    }

    pub fn polyline(&mut self, steps: &[Poly]) {
        self.cursor.polyline(steps);
    }

    pub fn stroke(&mut self) {
        self.cursor.stroke();
    }

    pub fn set_color(&mut self, color: CutColor) {
        self.cursor.set_color(color);
    }

    pub fn save(&mut self) {
        self.cursor.save();
    }

    pub fn restore(&mut self) -> EngineResult<()> {
        self.cursor.restore()
    }

    /// Run `f` and put the cursor back where it was, even if `f` fails.
    pub fn saved<T>(&mut self, f: impl FnOnce(&mut Self) -> EngineResult<T>) -> EngineResult<T> {
        self.save();
        let out = f(self);
        self.restore()?;
        out
    }

    /// Run `f` stroked separately in the inner-cut color.
    pub(crate) fn inner_cut<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> EngineResult<T>,
    ) -> EngineResult<T> {
        self.saved(|sheet| {
            sheet.stroke();
            sheet.set_color(CutColor::InnerCut);
            let out = f(sheet);
            sheet.stroke();
            sheet.set_color(CutColor::OuterCut);
            out
        })
    }

    /// Invoke an optional feature callback at local `(x, y)`.
    pub fn cc(
        &mut self,
        callback: Option<&mut FeatureFn<'_>>,
        ctx: FeatureContext,
        x: f64,
        y: f64,
    ) -> EngineResult<()> {
        let Some(callback) = callback else {
            return Ok(());
        };
        self.saved(|sheet| {
            sheet.move_to(x, y, 0.0);
            callback(sheet, ctx.at(x, y))
        })
    }

    /// Like [`Sheet::cc`] with `y` at the kerf line.
    pub fn cc_at(
        &mut self,
        callback: Option<&mut FeatureFn<'_>>,
        ctx: FeatureContext,
        x: f64,
    ) -> EngineResult<()> {
        let y = self.burn;
        self.cc(callback, ctx, x, y)
    }

    /// Stroke whatever is still open.
    pub fn finish(&mut self) {
        self.stroke();
    }
}
