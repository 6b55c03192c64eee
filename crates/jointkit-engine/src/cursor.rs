//! Turtle-style drawing cursor
//!
//! The cursor keeps a local frame (origin + heading) on top of a
//! [`Surface`]. Every primitive works in local coordinates: the x axis
//! points along the current heading and positive angles turn left, away
//! from the material when walking a part outline counter-clockwise.
//!
//! Kerf compensation happens in [`Cursor::corner`]: outward corners grow by
//! `burn`, inward corners shrink by it, and inward corners sharper than
//! `burn` are drawn as a small reverse arc so the part is never undercut.

use crate::error::{EngineError, EngineResult};
use crate::surface::{ArcSegment, Surface};
use jointkit_core::CutColor;
use nalgebra::{Isometry2, Point2, Vector2};
use std::f64::consts::FRAC_PI_2;
use std::fmt;
use tracing::{trace, warn};

const PEN_EPSILON: f64 = 1e-9;

/// One step of a [`Cursor::polyline`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Poly {
    /// Straight run of the given length.
    Line(f64),
    /// Sharp turn in degrees.
    Turn(f64),
    /// Turn in degrees around the given radius.
    Round(f64, f64),
}

pub struct Cursor {
    surface: Box<dyn Surface>,
    frame: Isometry2<f64>,
    stack: Vec<Isometry2<f64>>,
    /// Where the surface's current point is, if a sub-path is open.
    pen: Option<Point2<f64>>,
    thickness: f64,
    burn: f64,
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("frame", &self.frame)
            .field("depth", &self.stack.len())
            .field("thickness", &self.thickness)
            .field("burn", &self.burn)
            .finish()
    }
}

impl Cursor {
    pub fn new(surface: Box<dyn Surface>, thickness: f64, burn: f64) -> Self {
        Self {
            surface,
            frame: Isometry2::identity(),
            stack: Vec::new(),
            pen: None,
            thickness,
            burn,
        }
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn burn(&self) -> f64 {
        self.burn
    }

    /// Current frame origin in sheet coordinates.
    pub fn position(&self) -> Point2<f64> {
        Point2::from(self.frame.translation.vector)
    }

    /// Current heading in degrees, in (-180, 180].
    pub fn heading(&self) -> f64 {
        self.frame.rotation.angle().to_degrees()
    }

    pub fn frame(&self) -> Isometry2<f64> {
        self.frame
    }

    /// Number of saved frames.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Convert a local point to sheet coordinates.
    pub fn to_sheet(&self, local: Point2<f64>) -> Point2<f64> {
        self.frame * local
    }

    pub fn save(&mut self) {
        self.stack.push(self.frame);
    }

    pub fn restore(&mut self) -> EngineResult<()> {
        match self.stack.pop() {
            Some(frame) => {
                self.frame = frame;
                Ok(())
            }
            None => {
                warn!("cursor restore without matching save");
                Err(EngineError::CursorUnderflow)
            }
        }
    }

    /// Translate the frame by `(dx, dy)`, then rotate it by `degrees`.
    pub fn move_to(&mut self, dx: f64, dy: f64, degrees: f64) {
        trace!(dx, dy, degrees, "move frame");
        self.frame *= Isometry2::new(Vector2::new(dx, dy), degrees.to_radians());
    }

    /// Move the frame along an arc of radius `r` without drawing.
    pub fn move_arc(&mut self, degrees: f64, r: f64) {
        let (degrees, r) = if r < 0.0 { (-degrees, -r) } else { (degrees, r) };
        let rad = degrees.to_radians();
        if degrees > 0.0 {
            self.move_to(r * rad.sin(), r * (1.0 - rad.cos()), degrees);
        } else {
            self.move_to(r * (-rad).sin(), -r * (1.0 - rad.cos()), degrees);
        }
    }

    /// Re-anchor the frame at a local point and turn by `radians`.
    pub fn continue_direction(&mut self, to: Point2<f64>, radians: f64) {
        self.frame *= Isometry2::new(to.coords, radians);
    }

    /// Straight run along the heading.
    pub fn edge(&mut self, length: f64) {
        let end = Point2::new(length, 0.0);
        self.draw_line(Point2::origin(), end);
        self.frame *= Isometry2::translation(length, 0.0);
    }

    /// Turn by `degrees` around `radius`, compensating for the kerf.
    pub fn corner(&mut self, degrees: f64, radius: f64) {
        if radius > 0.5 * self.thickness && degrees.abs() > 36.0 {
            let steps = (degrees.abs() / 36.0) as usize + 1;
            for _ in 0..steps {
                self.corner(degrees / steps as f64, radius);
            }
            return;
        }

        let rad = degrees.to_radians();
        let arc = if degrees > 0.0 {
            let r = radius + self.burn;
            ArcSegment {
                center: Point2::new(0.0, r),
                radius: r,
                start_angle: -FRAC_PI_2,
                end_angle: rad - FRAC_PI_2,
                negative: false,
            }
        } else if radius > self.burn {
            let r = radius - self.burn;
            ArcSegment {
                center: Point2::new(0.0, -r),
                radius: r,
                start_angle: FRAC_PI_2,
                end_angle: rad + FRAC_PI_2,
                negative: true,
            }
        } else {
            let r = self.burn - radius;
            ArcSegment {
                center: Point2::new(0.0, r),
                radius: r,
                start_angle: -FRAC_PI_2,
                end_angle: -FRAC_PI_2 + rad,
                negative: true,
            }
        };

        let end = arc.end_point();
        self.draw_arc(arc);
        self.continue_direction(end, rad);
    }

    /// Cubic Bezier in local coordinates; the new heading follows the
    /// tangent at the end point.
    pub fn curve_to(&mut self, c1: Point2<f64>, c2: Point2<f64>, to: Point2<f64>) {
        let start = self.to_sheet(Point2::origin());
        let (c1_sheet, c2_sheet, end) = (self.to_sheet(c1), self.to_sheet(c2), self.to_sheet(to));
        self.begin_at(start);
        self.surface.curve_to(c1_sheet, c2_sheet, end);
        self.pen = Some(end);

        let tangent = to - c2;
        self.continue_direction(to, tangent.y.atan2(tangent.x));
    }

    pub fn polyline(&mut self, steps: &[Poly]) {
        for step in steps {
            match *step {
                Poly::Line(length) => self.edge(length),
                Poly::Turn(degrees) => self.corner(degrees, 0.0),
                Poly::Round(degrees, radius) => self.corner(degrees, radius),
            }
        }
    }

    /// Start a free sub-path at a local point without moving the frame.
    pub fn jump_to(&mut self, x: f64, y: f64) {
        let p = self.to_sheet(Point2::new(x, y));
        self.surface.move_to(p);
        self.pen = Some(p);
    }

    /// Draw to a local point without moving the frame.
    pub fn line_to(&mut self, x: f64, y: f64) {
        let p = self.to_sheet(Point2::new(x, y));
        match self.pen {
            Some(_) => self.surface.line_to(p),
            None => self.surface.move_to(p),
        }
        self.pen = Some(p);
    }

    pub fn stroke(&mut self) {
        self.surface.stroke();
        self.pen = None;
    }

    pub fn set_color(&mut self, color: CutColor) {
        self.surface.set_color(color);
    }

    fn begin_at(&mut self, start: Point2<f64>) {
        let connected = self
            .pen
            .is_some_and(|pen| (pen - start).norm() <= PEN_EPSILON);
        if !connected {
            self.surface.move_to(start);
        }
    }

    fn draw_line(&mut self, from: Point2<f64>, to: Point2<f64>) {
        let (from, to) = (self.to_sheet(from), self.to_sheet(to));
        self.begin_at(from);
        self.surface.line_to(to);
        self.pen = Some(to);
    }

    fn draw_arc(&mut self, local: ArcSegment) {
        let offset = self.frame.rotation.angle();
        let arc = ArcSegment {
            center: self.to_sheet(local.center),
            radius: local.radius,
            start_angle: local.start_angle + offset,
            end_angle: local.end_angle + offset,
            negative: local.negative,
        };
        self.begin_at(arc.start_point());
        self.surface.arc(arc);
        self.pen = Some(arc.end_point());
    }
}
