//! Holes and other cut-outs drawn inside a part.

use crate::bolts::BedBoltSettings;
use crate::edges::{BoundaryEdge, EdgeDrawOptions};
use crate::error::EngineResult;
use crate::sheet::Sheet;
use jointkit_core::{dist, PolygonSize, RegularPolygon};
use jointkit_settings::HexHoleSettings;
use std::f64::consts::PI;

impl Sheet {
    /// Round hole of radius `r` centred at `(x, y)`.
    pub fn hole(&mut self, x: f64, y: f64, r: f64) -> EngineResult<()> {
        self.inner_cut(|sheet| {
            let burn = sheet.burn();
            let r = if r < burn { burn + 1e-9 } else { r };
            sheet.move_to(x + r - burn, y, -90.0);
            sheet.corner(-360.0, r);
            Ok(())
        })
    }

    /// Rectangular hole `dx` by `dy` centred at `(x, y)` with corner radius `r`.
    pub fn rectangular_hole(&mut self, x: f64, y: f64, dx: f64, dy: f64, r: f64) -> EngineResult<()> {
        self.inner_cut(|sheet| {
            sheet.move_to(x + r - dx / 2.0, y - dy / 2.0, 180.0);
            for d in [dy, dx, dy, dx] {
                sheet.corner(-90.0, r);
                sheet.edge(d - 2.0 * r);
            }
            Ok(())
        })
    }

    /// Straight run of `length` with a T-slot for a bolt and nut in the middle.
    pub fn bed_bolt_hole(&mut self, length: f64, settings: Option<BedBoltSettings>) -> EngineResult<()> {
        let BedBoltSettings {
            d,
            d_nut,
            h_nut,
            l,
            l1,
        } = settings.unwrap_or(self.bed_bolt());
        let shoulder = (d_nut - d) / 2.0;
        let shank = l - l1 - h_nut;

        self.edge((length - d) / 2.0);
        for (turn, run) in [
            (90.0, l1),
            (90.0, shoulder),
            (-90.0, h_nut),
            (-90.0, shoulder),
            (90.0, shank),
            (-90.0, d),
            (-90.0, shank),
            (90.0, shoulder),
            (-90.0, h_nut),
            (-90.0, shoulder),
            (90.0, l1),
            (90.0, (length - d) / 2.0),
        ] {
            self.corner(turn, 0.0);
            self.edge(run);
        }
        Ok(())
    }

    /// Corner between two edges, taking their widths into account.
    pub fn edge_corner(&mut self, from: &dyn BoundaryEdge, to: &dyn BoundaryEdge, degrees: f64) {
        let t = (degrees / 2.0).to_radians().tan();
        self.edge(to.start_width() * t);
        self.corner(degrees, 0.0);
        self.edge(from.end_width() * t);
    }

    /// Regular polygon outline centred at `(x, y)`, rotated by `angle` degrees.
    pub fn regular_polygon_at(
        &mut self,
        x: f64,
        y: f64,
        corners: usize,
        angle: f64,
        size: PolygonSize,
    ) -> EngineResult<()> {
        let polygon = RegularPolygon::new(corners, size)?;
        self.saved(|sheet| {
            sheet.move_to(x, y, angle);
            sheet.move_to(-polygon.side / 2.0, -polygon.apothem - sheet.burn(), 0.0);
            for _ in 0..corners {
                sheet.edge(polygon.side);
                sheet.corner(polygon.turn_degrees(), 0.0);
            }
            Ok(())
        })
    }

    /// Holes for a finger joint edge of `length` starting at `(x, y)` and
    /// running at `angle` degrees.
    pub fn finger_holes_at(
        &mut self,
        x: f64,
        y: f64,
        length: f64,
        angle: f64,
        opts: &EdgeDrawOptions<'_>,
    ) -> EngineResult<()> {
        let holes = self.edges().finger_holes();
        holes.draw(self, x, y, length, angle, opts)
    }

    /// Fill an `x` by `y` rectangle with holes in a hex pattern.
    pub fn hex_holes_rectangle(
        &mut self,
        x: f64,
        y: f64,
        settings: Option<HexHoleSettings>,
    ) -> EngineResult<()> {
        let settings = settings.unwrap_or(self.hex_holes());
        self.hex_holes_where(x, y, settings, |_, _| false)
    }

    /// Hex pattern for a plate with corners rounded by `rc`.
    pub fn hex_holes_plate(
        &mut self,
        x: f64,
        y: f64,
        rc: f64,
        settings: Option<HexHoleSettings>,
    ) -> EngineResult<()> {
        let settings = settings.unwrap_or(self.hex_holes());
        let r = settings.radius;
        let wx = 0.5 * x - rc - r;
        let wy = 0.5 * y - rc - r;
        self.hex_holes_where(x, y, settings, |px, py| {
            let px = (px - x / 2.0).abs();
            let py = (py - y / 2.0).abs();
            if px <= wx || py <= wy {
                return false;
            }
            dist(px - wx, py - wy) > rc
        })
    }

    /// Hex pattern inside a circle of diameter `d`.
    pub fn hex_holes_circle(&mut self, d: f64, settings: Option<HexHoleSettings>) -> EngineResult<()> {
        let settings = settings.unwrap_or(self.hex_holes());
        let c = d / 2.0;
        let r = settings.radius;
        self.hex_holes_where(d, d, settings, |px, py| dist(px - c, py - c) > c - r)
    }

    fn hex_holes_where(
        &mut self,
        x: f64,
        y: f64,
        settings: HexHoleSettings,
        skip: impl Fn(f64, f64) -> bool,
    ) -> EngineResult<()> {
        let r = settings.radius;
        let w = r + settings.spacing / 2.0;
        let dist = w * (PI / 6.0).cos();

        // how many half circles fit
        let cx = ((x - 2.0 * r) / w).floor() as i64 + 2;
        let cy = ((y - 2.0 * r) / dist).floor() as i64 + 2;

        // what is left on the sides
        let lx = (x - (2.0 * r + (cx - 2) as f64 * w)) / 2.0;
        let ly = (y - (2.0 * r + (cy.div_euclid(2) * 2) as f64 * dist - 2.0 * dist)) / 2.0;

        self.saved(|sheet| {
            for i in 0..cy.div_euclid(2) {
                for j in 0..(cx - i % 2).div_euclid(2) {
                    let mut px = 2.0 * j as f64 * w + r + lx;
                    let py = i as f64 * 2.0 * dist + r + ly;
                    if i % 2 == 1 {
                        px += w;
                    }
                    if skip(px, py) {
                        continue;
                    }
                    sheet.hole(px, py, r)?;
                }
            }
            Ok(())
        })
    }
}
