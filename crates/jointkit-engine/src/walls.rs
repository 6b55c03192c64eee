//! Wall composition
//!
//! Walls resolve their edge specs through the sheet's registry, reserve
//! room for each edge's width and margin, then walk the outline
//! counter-clockwise starting with the bottom side. Every wall is placed
//! with [`Sheet::place`] so that consecutive parts do not overlap.

use crate::bolts::{BedBoltSettings, BoltPolicy};
use crate::edges::{BoundaryEdge, EdgeDrawOptions, EdgeSpec, EdgeSpecs};
use crate::error::{EngineError, EngineResult};
use crate::layout::MoveSpec;
use crate::sheet::{FeatureContext, FeatureFn, Sheet};
use jointkit_core::{PolygonSize, RegularPolygon};
use jointkit_settings::HexHoleSettings;
use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

fn set_slot<T>(slots: &mut Vec<Option<T>>, index: usize, value: T) {
    if slots.len() <= index {
        slots.resize_with(index + 1, || None);
    }
    slots[index] = Some(value);
}

/// Per-call extras for the wall functions.
#[derive(Default)]
pub struct WallOptions<'a> {
    callbacks: Vec<Option<FeatureFn<'a>>>,
    bolts: Vec<Option<&'a dyn BoltPolicy>>,
    bed_bolts: Vec<Option<BedBoltSettings>>,
    holes_margin: Option<f64>,
    hex_holes: Option<HexHoleSettings>,
    ignore_widths: Vec<i32>,
    moves: String,
}

impl fmt::Debug for WallOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let callbacks: Vec<_> = self
            .callbacks
            .iter()
            .enumerate()
            .filter(|(_, cb)| cb.is_some())
            .map(|(i, _)| i)
            .collect();
        f.debug_struct("WallOptions")
            .field("callbacks", &callbacks)
            .field("bolts", &self.bolts)
            .field("bed_bolts", &self.bed_bolts)
            .field("holes_margin", &self.holes_margin)
            .field("ignore_widths", &self.ignore_widths)
            .field("moves", &self.moves)
            .finish()
    }
}

impl<'a> WallOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` at callback slot `index`.
    pub fn callback(
        mut self,
        index: usize,
        f: impl FnMut(&mut Sheet, FeatureContext) -> EngineResult<()> + 'a,
    ) -> Self {
        set_slot(&mut self.callbacks, index, Box::new(f) as FeatureFn<'a>);
        self
    }

    pub fn bolts(mut self, side: usize, policy: &'a dyn BoltPolicy) -> Self {
        set_slot(&mut self.bolts, side, policy);
        self
    }

    pub fn bed_bolt(mut self, side: usize, settings: BedBoltSettings) -> Self {
        set_slot(&mut self.bed_bolts, side, settings);
        self
    }

    /// Fill the inside with hex holes, keeping `margin` from the outline.
    pub fn holes_margin(mut self, margin: f64) -> Self {
        self.holes_margin = Some(margin);
        self
    }

    pub fn hex_holes(mut self, settings: HexHoleSettings) -> Self {
        self.hex_holes = Some(settings);
        self
    }

    /// Corner widths to fold into the adjacent side. `2i` extends side `i`
    /// over the next side's start width, `2i + 1` draws the corner after
    /// side `i` as if it started flush, `2i - 1` (or `2i + 7`) extends side
    /// `i` over the previous side's end width. `6` and `7` skip the initial
    /// bottom margin and left spacing.
    pub fn ignore_widths(mut self, widths: &[i32]) -> Self {
        self.ignore_widths = widths.to_vec();
        self
    }

    /// Placement in the move language, e.g. `"right"` or `"up only"`.
    pub fn moves(mut self, moves: &str) -> Self {
        self.moves = moves.to_string();
        self
    }

    fn callback_mut(&mut self, index: usize) -> Option<&mut FeatureFn<'a>> {
        self.callbacks.get_mut(index).and_then(Option::as_mut)
    }

    fn draw_options(&self, side: usize) -> EdgeDrawOptions<'a> {
        EdgeDrawOptions {
            bolts: self.bolts.get(side).copied().flatten(),
            bed_bolt: self.bed_bolts.get(side).copied().flatten(),
            height: None,
        }
    }

    fn move_spec(&self) -> EngineResult<MoveSpec> {
        self.moves.parse()
    }
}

/// Size a wall took up, and whether drawing was skipped for an `only` move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallOutcome {
    pub overall_width: f64,
    pub overall_height: f64,
    pub skipped: bool,
}

/// Edges of a [`Sheet::surrounding_wall`].
#[derive(Debug, Clone)]
pub struct SurroundingEdges {
    pub bottom: EdgeSpec,
    pub top: EdgeSpec,
    pub left: EdgeSpec,
    pub right: EdgeSpec,
}

impl Default for SurroundingEdges {
    fn default() -> Self {
        Self {
            bottom: 'e'.into(),
            top: 'e'.into(),
            left: 'D'.into(),
            right: 'd'.into(),
        }
    }
}

type EdgeRef = Rc<dyn BoundaryEdge>;

impl Sheet {
    fn resolve_all(&self, specs: &EdgeSpecs) -> EngineResult<Vec<EdgeRef>> {
        specs.iter().map(|s| self.resolve(s)).collect()
    }

    /// Rectangular wall for all kind of box like objects.
    ///
    /// `edges` lists bottom, right, top and left. The overall size adds the
    /// spacing of the two perpendicular edges to each side length.
    pub fn rectangular_wall(
        &mut self,
        x: f64,
        y: f64,
        edges: impl Into<EdgeSpecs>,
        mut opts: WallOptions<'_>,
    ) -> EngineResult<WallOutcome> {
        let specs = edges.into();
        if specs.len() != 4 {
            return Err(EngineError::EdgeCount {
                expected: 4,
                found: specs.len(),
            });
        }
        let e = self.resolve_all(&specs)?;
        let side = |i: usize| Rc::clone(&e[i % 4]);

        let overall_width = x + e[3].spacing() + e[1].spacing();
        let overall_height = y + e[0].spacing() + e[2].spacing();
        let moves = opts.move_spec()?;
        debug!(x, y, edges = ?specs, overall_width, overall_height, "rectangular wall");

        if self.place(overall_width, overall_height, &moves, true)? {
            return Ok(WallOutcome {
                overall_width,
                overall_height,
                skipped: true,
            });
        }

        let ignore = opts.ignore_widths.clone();
        let ignored = |n: i32| ignore.contains(&n);
        if !ignored(7) {
            self.move_to(e[3].spacing(), 0.0, 0.0);
        }
        if !ignored(6) {
            self.move_to(0.0, e[0].margin(), 0.0);
        }

        let plain = self.resolve(&EdgeSpec::Symbol('e'))?;
        for (i, length) in [x, y, x, y].into_iter().enumerate() {
            let (cur, next) = (side(i), side(i + 1));
            let y0 = cur.start_width() + self.burn();
            self.cc(opts.callback_mut(i), FeatureContext::new(i, length), 0.0, y0)?;

            let n = i as i32;
            let mut l = length;
            let (mut e1, mut e2) = (Rc::clone(&cur), Rc::clone(&next));
            if ignored(2 * n - 1) || ignored(2 * n + 7) {
                l += side(i + 3).end_width();
            }
            if ignored(2 * n) {
                l += next.start_width();
                e2 = Rc::clone(&plain);
            }
            if ignored(2 * n + 1) {
                e1 = Rc::clone(&plain);
            }

            cur.draw(self, l, &opts.draw_options(i))?;
            let turn = 90.0 - next.start_angle() - cur.end_angle();
            self.edge_corner(&*e1, &*e2, turn);
        }

        if let Some(margin) = opts.holes_margin {
            let (dx, dy) = (margin + e[3].end_width(), margin + e[0].start_width());
            let settings = opts.hex_holes;
            self.saved(|sheet| {
                sheet.move_to(dx, dy, 0.0);
                sheet.hex_holes_rectangle(x - 2.0 * margin, y - 2.0 * margin, settings)
            })?;
        }

        self.stroke();
        self.place(overall_width, overall_height, &moves, false)?;
        Ok(WallOutcome {
            overall_width,
            overall_height,
            skipped: false,
        })
    }

    /// Plate with rounded corners fitting to [`Sheet::surrounding_wall`].
    ///
    /// The first side is split to have a joint in the middle. Callbacks run
    /// at the start of the straight runs: 0 and 1 for the two halves of the
    /// first side, 2, 3 and 4 for the others.
    pub fn rounded_plate(
        &mut self,
        x: f64,
        y: f64,
        r: f64,
        edge: impl Into<EdgeSpec>,
        mut opts: WallOptions<'_>,
    ) -> EngineResult<WallOutcome> {
        let e = self.resolve(&edge.into())?;
        let overall_width = x + 2.0 * e.spacing();
        let overall_height = y + 2.0 * e.spacing();
        let moves = opts.move_spec()?;
        debug!(x, y, r, overall_width, overall_height, "rounded plate");

        if self.place(overall_width, overall_height, &moves, true)? {
            return Ok(WallOutcome {
                overall_width,
                overall_height,
                skipped: true,
            });
        }

        let lx = x - 2.0 * r;
        let ly = y - 2.0 * r;
        let r = r + e.start_width();

        self.move_to(e.margin(), e.margin(), 0.0);
        self.move_to(r, 0.0, 0.0);

        self.cc_at(opts.callback_mut(0), FeatureContext::new(0, lx / 2.0), 0.0)?;
        e.draw(self, lx / 2.0, &opts.draw_options(0))?;
        self.cc_at(opts.callback_mut(1), FeatureContext::new(1, lx / 2.0), 0.0)?;
        e.draw(self, lx / 2.0, &opts.draw_options(1))?;
        for (i, l) in [(2, ly), (3, lx), (4, ly)] {
            self.corner(90.0, r);
            self.cc_at(opts.callback_mut(i), FeatureContext::new(i, l), 0.0)?;
            e.draw(self, l, &opts.draw_options(i))?;
        }
        self.corner(90.0, r);

        // back to the placement origin for the holes
        self.restore()?;
        self.save();
        let sp = self.spacing();
        self.move_to(sp / 2.0 + e.margin(), sp / 2.0 + e.margin(), 0.0);

        if let Some(margin) = opts.holes_margin {
            self.move_to(margin, margin, 0.0);
            let rc = if r > margin { r - margin } else { 0.0 };
            self.hex_holes_plate(x - 2.0 * margin, y - 2.0 * margin, rc, opts.hex_holes)?;
        }

        self.stroke();
        self.place(overall_width, overall_height, &moves, false)?;
        Ok(WallOutcome {
            overall_width,
            overall_height,
            skipped: false,
        })
    }

    /// Flexing wall wrapping around a [`Sheet::rounded_plate`] of the same
    /// `x`, `y` and `r`. `h` is the inner height, not counting the joints.
    ///
    /// Callbacks run at the start of the flat runs: 0 for the right half of
    /// the first x side, 1 and 3 for the y sides, 2 for the second x side
    /// and 4 for the second half of the first x side.
    pub fn surrounding_wall(
        &mut self,
        x: f64,
        y: f64,
        r: f64,
        h: f64,
        edges: SurroundingEdges,
        mut opts: WallOptions<'_>,
    ) -> EngineResult<WallOutcome> {
        let flex = self.resolve(&EdgeSpec::Symbol('X'))?;
        let stretch = flex
            .settings()
            .map_or(1.0, |s| s.borrow().number("stretch"));
        // quarter circle, shortened by the flex stretch
        let c4 = (r + self.burn()) * FRAC_PI_2 / stretch;

        let top = self.resolve(&edges.top)?;
        let bottom = self.resolve(&edges.bottom)?;
        let left = self.resolve(&edges.left)?;
        let right = self.resolve(&edges.right)?;
        let tail = self.resolve(&EdgeSpec::Symbol('d'))?;
        let socket = self.resolve(&EdgeSpec::Symbol('D'))?;

        // assumes start width == end width
        let top_width = top.start_width();
        let bottom_width = bottom.start_width();

        let overall_width =
            2.0 * x + 2.0 * y - 8.0 * r + 4.0 * c4 + tail.spacing() + socket.spacing();
        let overall_height = h + top.spacing() + bottom.spacing();
        let moves = opts.move_spec()?;
        debug!(x, y, r, h, overall_width, overall_height, "surrounding wall");

        if self.place(overall_width, overall_height, &moves, true)? {
            return Ok(WallOutcome {
                overall_width,
                overall_height,
                skipped: true,
            });
        }

        let plain = EdgeDrawOptions::default();
        let flex_opts = EdgeDrawOptions::with_height(h + top_width + bottom_width);
        let cb_y = bottom_width + self.burn();

        self.move_to(left.spacing(), bottom.margin(), 0.0);
        self.cc(opts.callback_mut(0), FeatureContext::new(0, x / 2.0 - r), 0.0, cb_y)?;
        bottom.draw(self, x / 2.0 - r, &plain)?;
        if y - 2.0 * r < 1e-3 {
            flex.draw(self, 2.0 * c4, &flex_opts)?;
            self.cc(opts.callback_mut(2), FeatureContext::new(2, x - 2.0 * r), 0.0, cb_y)?;
            bottom.draw(self, x - 2.0 * r, &plain)?;
            flex.draw(self, 2.0 * c4, &flex_opts)?;
            self.cc(opts.callback_mut(4), FeatureContext::new(4, x / 2.0 - r), 0.0, cb_y)?;
        } else {
            for (i, l) in [y, x, y, 0.0].into_iter().enumerate() {
                flex.draw(self, c4, &flex_opts)?;
                let ctx = FeatureContext::new(i + 1, l - 2.0 * r);
                self.cc(opts.callback_mut(i + 1), ctx, 0.0, cb_y)?;
                if i < 3 {
                    bottom.draw(self, l - 2.0 * r, &plain)?;
                }
            }
        }
        bottom.draw(self, x / 2.0 - r, &plain)?;

        self.edge_corner(&*bottom, &*right, 90.0);
        right.draw(self, h, &plain)?;
        self.edge_corner(&*right, &*top, 90.0);

        top.draw(self, x / 2.0 - r, &plain)?;
        for (i, l) in [y, x, y, 0.0].into_iter().enumerate() {
            self.edge(c4);
            if i < 3 {
                top.draw(self, l - 2.0 * r, &plain)?;
            }
        }
        top.draw(self, x / 2.0 - r, &plain)?;

        self.edge_corner(&*top, &*left, 90.0);
        left.draw(self, h, &plain)?;
        self.edge_corner(&*left, &*bottom, 90.0);

        self.stroke();
        self.place(overall_width, overall_height, &moves, false)?;
        Ok(WallOutcome {
            overall_width,
            overall_height,
            skipped: false,
        })
    }

    /// Regular polygon as a wall.
    ///
    /// `edges` holds one spec for all sides or one per side. Callback 0
    /// runs at the centre, callbacks 1 to N at the start of each side.
    /// `hole` cuts a centre hole of that diameter.
    pub fn regular_polygon_wall(
        &mut self,
        corners: usize,
        size: PolygonSize,
        edges: impl Into<EdgeSpecs>,
        hole: Option<f64>,
        mut opts: WallOptions<'_>,
    ) -> EngineResult<WallOutcome> {
        let polygon = RegularPolygon::new(corners, size)?;
        let specs = edges.into();
        let resolved = self.resolve_all(&specs)?;
        let e: Vec<EdgeRef> = match resolved.len() {
            1 => vec![Rc::clone(&resolved[0]); corners],
            n if n == corners => resolved,
            n => {
                return Err(EngineError::EdgeCount {
                    expected: corners,
                    found: n,
                })
            }
        };

        let RegularPolygon {
            radius: r,
            apothem: h,
            side,
            ..
        } = polygon;
        let t = self.thickness();
        let overall_height = if corners % 2 == 1 {
            r + h + 2.0 * t
        } else {
            2.0 * h + 2.0 * t
        };
        let overall_width = 2.0 * r + 3.0 * t;
        let moves = opts.move_spec()?;
        debug!(corners, side, overall_width, overall_height, "regular polygon wall");

        if self.place(overall_width, overall_height, &moves, true)? {
            return Ok(WallOutcome {
                overall_width,
                overall_height,
                skipped: true,
            });
        }

        self.move_to(r - 0.5 * side, 0.0, 0.0);

        let cy = h + e[0].start_width() + self.burn();
        if let Some(d) = hole {
            self.hole(side / 2.0, cy, d / 2.0)?;
        }
        self.cc(opts.callback_mut(0), FeatureContext::new(0, side), side / 2.0, cy)?;

        let turn = polygon.turn_degrees();
        for i in 0..corners {
            let (cur, next) = (&e[i], &e[(i + 1) % corners]);
            let y0 = cur.start_width() + self.burn();
            self.cc(opts.callback_mut(i + 1), FeatureContext::new(i + 1, side), 0.0, y0)?;
            cur.draw(self, side, &opts.draw_options(i))?;
            self.edge_corner(&**cur, &**next, turn);
        }

        self.stroke();
        self.place(overall_width, overall_height, &moves, false)?;
        Ok(WallOutcome {
            overall_width,
            overall_height,
            skipped: false,
        })
    }
}
