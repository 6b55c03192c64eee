//! Plain 2D geometry helpers that do not depend on a drawing cursor.

use crate::error::{GeometryError, GeometryResult};

/// Euclidean length of a vector.
#[inline]
pub fn dist(dx: f64, dy: f64) -> f64 {
    (dx * dx + dy * dy).sqrt()
}

/// The one measure a regular polygon is specified by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PolygonSize {
    /// Distance from the centre to a corner.
    Radius(f64),
    /// Distance from the centre to the middle of a side.
    Apothem(f64),
    /// Length of one side.
    Side(f64),
}

/// Fully resolved measures of a regular polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegularPolygon {
    pub corners: usize,
    pub radius: f64,
    pub apothem: f64,
    pub side: f64,
}

impl RegularPolygon {
    /// Derive the remaining measures from whichever one is given.
    pub fn new(corners: usize, size: PolygonSize) -> GeometryResult<Self> {
        if corners < 3 {
            return Err(GeometryError::TooFewCorners(corners));
        }
        let half_angle = std::f64::consts::PI / corners as f64;

        let (radius, apothem, side) = match size {
            PolygonSize::Radius(r) => {
                check_positive("radius", r)?;
                (r, r * half_angle.cos(), 2.0 * half_angle.sin() * r)
            }
            PolygonSize::Apothem(h) => {
                check_positive("apothem", h)?;
                let side = 2.0 * half_angle.tan() * h;
                (dist(side / 2.0, h), h, side)
            }
            PolygonSize::Side(side) => {
                check_positive("side", side)?;
                let h = 0.5 * side * (std::f64::consts::FRAC_PI_2 - half_angle).tan();
                (dist(side / 2.0, h), h, side)
            }
        };

        Ok(Self {
            corners,
            radius,
            apothem,
            side,
        })
    }

    /// Exterior turning angle at each corner, in degrees.
    pub fn turn_degrees(&self) -> f64 {
        360.0 / self.corners as f64
    }
}

fn check_positive(name: &'static str, value: f64) -> GeometryResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::NonPositive { name, value })
    }
}
