//! Drawing backends
//!
//! The cursor only ever talks to a [`Surface`] in absolute sheet
//! coordinates (millimetres, y pointing up). [`PathRecorder`] is the
//! in-memory backend: it keeps every stroked path together with its cut
//! colour and renders them as SVG.

use jointkit_core::{CutColor, Shared};
use nalgebra::{Point2, Vector2};
use std::f64::consts::{PI, TAU};
use std::fmt::Write as _;

/// A circular arc in absolute coordinates, angles in radians.
///
/// A positive arc runs counter-clockwise from `start_angle` to `end_angle`,
/// a negative one clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub center: Point2<f64>,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub negative: bool,
}

impl ArcSegment {
    /// Signed sweep; the end angle is wrapped by whole turns until it lies
    /// on the drawing side of the start angle.
    pub fn sweep(&self) -> f64 {
        let mut end = self.end_angle;
        if self.negative {
            while end > self.start_angle {
                end -= TAU;
            }
        } else {
            while end < self.start_angle {
                end += TAU;
            }
        }
        end - self.start_angle
    }

    pub fn point_at(&self, angle: f64) -> Point2<f64> {
        self.center + Vector2::new(angle.cos(), angle.sin()) * self.radius
    }

    pub fn start_point(&self) -> Point2<f64> {
        self.point_at(self.start_angle)
    }

    pub fn end_point(&self) -> Point2<f64> {
        self.point_at(self.start_angle + self.sweep())
    }

    pub fn length(&self) -> f64 {
        self.sweep().abs() * self.radius
    }
}

/// A 2D path sink.
pub trait Surface {
    /// Start a new sub-path.
    fn move_to(&mut self, to: Point2<f64>);

    fn line_to(&mut self, to: Point2<f64>);

    /// Append an arc; a straight connector from the current point to the
    /// arc start is implied.
    fn arc(&mut self, arc: ArcSegment);

    fn curve_to(&mut self, c1: Point2<f64>, c2: Point2<f64>, to: Point2<f64>);

    /// Cut everything drawn since the last stroke with the current colour.
    fn stroke(&mut self);

    fn set_color(&mut self, _color: CutColor) {}
}

impl<S: Surface> Surface for Shared<S> {
    fn move_to(&mut self, to: Point2<f64>) {
        self.borrow_mut().move_to(to);
    }

    fn line_to(&mut self, to: Point2<f64>) {
        self.borrow_mut().line_to(to);
    }

    fn arc(&mut self, arc: ArcSegment) {
        self.borrow_mut().arc(arc);
    }

    fn curve_to(&mut self, c1: Point2<f64>, c2: Point2<f64>, to: Point2<f64>) {
        self.borrow_mut().curve_to(c1, c2, to);
    }

    fn stroke(&mut self) {
        self.borrow_mut().stroke();
    }

    fn set_color(&mut self, color: CutColor) {
        self.borrow_mut().set_color(color);
    }
}

/// One recorded drawing primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point2<f64>),
    LineTo(Point2<f64>),
    Arc(ArcSegment),
    CurveTo {
        c1: Point2<f64>,
        c2: Point2<f64>,
        to: Point2<f64>,
    },
}

/// A stroked path and the colour it was cut with.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPath {
    pub color: CutColor,
    pub commands: Vec<PathCommand>,
}

impl RecordedPath {
    /// Total drawn length; curves are measured by their control polygon.
    pub fn length(&self) -> f64 {
        let mut length = 0.0;
        let mut current: Option<Point2<f64>> = None;
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => current = Some(p),
                PathCommand::LineTo(p) => {
                    if let Some(from) = current {
                        length += (p - from).norm();
                    }
                    current = Some(p);
                }
                PathCommand::Arc(arc) => {
                    if let Some(from) = current {
                        length += (arc.start_point() - from).norm();
                    }
                    length += arc.length();
                    current = Some(arc.end_point());
                }
                PathCommand::CurveTo { c1, c2, to } => {
                    let from = current.unwrap_or(c1);
                    length += (c1 - from).norm() + (c2 - c1).norm() + (to - c2).norm();
                    current = Some(to);
                }
            }
        }
        length
    }

    /// Points that bound the path; arcs are sampled.
    pub fn sample_points(&self) -> Vec<Point2<f64>> {
        let mut points = Vec::new();
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => points.push(p),
                PathCommand::Arc(arc) => {
                    let steps = 16;
                    let sweep = arc.sweep();
                    points.extend((0..=steps).map(|i| {
                        arc.point_at(arc.start_angle + sweep * i as f64 / steps as f64)
                    }));
                }
                PathCommand::CurveTo { c1, c2, to } => points.extend([c1, c2, to]),
            }
        }
        points
    }

    /// SVG path data with y flipped so the sheet's y axis points up.
    pub fn svg_data(&self) -> String {
        let mut data = String::new();
        let mut current: Option<Point2<f64>> = None;

        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => {
                    push_point(&mut data, 'M', p);
                    current = Some(p);
                }
                PathCommand::LineTo(p) => {
                    push_point(&mut data, if current.is_some() { 'L' } else { 'M' }, p);
                    current = Some(p);
                }
                PathCommand::Arc(arc) => {
                    let start = arc.start_point();
                    match current {
                        None => push_point(&mut data, 'M', start),
                        Some(p) if (p - start).norm() > 1e-9 => push_point(&mut data, 'L', start),
                        Some(_) => {}
                    }
                    push_arc(&mut data, &arc);
                    current = Some(arc.end_point());
                }
                PathCommand::CurveTo { c1, c2, to } => {
                    if current.is_none() {
                        push_point(&mut data, 'M', c1);
                    }
                    let _ = write!(
                        data,
                        "C {:.4} {:.4} {:.4} {:.4} {:.4} {:.4} ",
                        c1.x,
                        svg_y(c1.y),
                        c2.x,
                        svg_y(c2.y),
                        to.x,
                        svg_y(to.y)
                    );
                    current = Some(to);
                }
            }
        }

        data.trim_end().to_string()
    }
}

fn svg_y(y: f64) -> f64 {
    0.0 - y
}

fn push_point(data: &mut String, op: char, p: Point2<f64>) {
    let _ = write!(data, "{} {:.4} {:.4} ", op, p.x, svg_y(p.y));
}

// SVG arcs cannot describe a full turn, so long arcs are split below half a
// turn each. With y flipped a counter-clockwise arc has sweep flag 0.
fn push_arc(data: &mut String, arc: &ArcSegment) {
    let sweep = arc.sweep();
    if arc.radius < 1e-12 || sweep.abs() < 1e-12 {
        return;
    }
    let chunks = (sweep.abs() / PI).floor() as usize + 1;
    let flag = if arc.negative { 1 } else { 0 };
    for i in 1..=chunks {
        let p = arc.point_at(arc.start_angle + sweep * i as f64 / chunks as f64);
        let _ = write!(
            data,
            "A {:.4} {:.4} 0 0 {} {:.4} {:.4} ",
            arc.radius,
            arc.radius,
            flag,
            p.x,
            svg_y(p.y)
        );
    }
}

/// In-memory surface keeping stroked paths.
#[derive(Debug, Clone, Default)]
pub struct PathRecorder {
    paths: Vec<RecordedPath>,
    current: Vec<PathCommand>,
    color: CutColor,
}

impl PathRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> &[RecordedPath] {
        &self.paths
    }

    /// Paths cut with one colour.
    pub fn paths_with_color(&self, color: CutColor) -> impl Iterator<Item = &RecordedPath> {
        self.paths.iter().filter(move |p| p.color == color)
    }

    /// Commands drawn but not yet stroked.
    pub fn pending(&self) -> &[PathCommand] {
        &self.current
    }

    /// Axis-aligned bounds of all stroked paths as (min, max).
    pub fn bounding_box(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        self.paths
            .iter()
            .flat_map(RecordedPath::sample_points)
            .fold(None, |acc, p| match acc {
                None => Some((p, p)),
                Some((min, max)) => Some((
                    Point2::new(min.x.min(p.x), min.y.min(p.y)),
                    Point2::new(max.x.max(p.x), max.y.max(p.y)),
                )),
            })
    }

    /// Render all stroked paths as a standalone SVG document in millimetres.
    pub fn to_svg(&self) -> String {
        let (min, max) = self
            .bounding_box()
            .unwrap_or((Point2::origin(), Point2::origin()));
        let pad = 2.0;
        let width = max.x - min.x + 2.0 * pad;
        let height = max.y - min.y + 2.0 * pad;

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.2}mm" height="{h:.2}mm" viewBox="{x:.4} {y:.4} {w:.4} {h:.4}">"#,
            w = width,
            h = height,
            x = min.x - pad,
            y = svg_y(max.y) - pad,
        );
        for path in &self.paths {
            let _ = writeln!(
                svg,
                r#"  <path d="{}" stroke="{}" fill="none" stroke-width="0.1"/>"#,
                path.svg_data(),
                path.color.svg_hex()
            );
        }
        svg.push_str("</svg>\n");
        svg
    }
}

impl Surface for PathRecorder {
    fn move_to(&mut self, to: Point2<f64>) {
        self.current.push(PathCommand::MoveTo(to));
    }

    fn line_to(&mut self, to: Point2<f64>) {
        self.current.push(PathCommand::LineTo(to));
    }

    fn arc(&mut self, arc: ArcSegment) {
        self.current.push(PathCommand::Arc(arc));
    }

    fn curve_to(&mut self, c1: Point2<f64>, c2: Point2<f64>, to: Point2<f64>) {
        self.current.push(PathCommand::CurveTo { c1, c2, to });
    }

    fn stroke(&mut self) {
        let commands = std::mem::take(&mut self.current);
        if commands
            .iter()
            .any(|c| !matches!(c, PathCommand::MoveTo(_)))
        {
            self.paths.push(RecordedPath {
                color: self.color,
                commands,
            });
        }
    }

    fn set_color(&mut self, color: CutColor) {
        self.color = color;
    }
}
