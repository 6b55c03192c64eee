//! Bolt placement policies
//!
//! A policy spreads bolts over the gaps of a finger joint (or the intervals
//! of a straight edge) and may force the finger count to be even so bolts
//! land symmetrically.

pub use jointkit_settings::BedBoltSettings;
use std::fmt;

/// Distributes bolts over the segments of an edge.
pub trait BoltPolicy: fmt::Debug {
    /// Number of bolts on a straight edge.
    fn bolt_count(&self) -> usize;

    /// Largest usable finger count not above `fingers`.
    fn num_fingers(&self, fingers: usize) -> usize {
        fingers
    }

    /// Whether the gap before finger `pos` of `fingers` gets a bolt.
    fn draw_bolt(&self, _pos: usize, _fingers: usize) -> bool {
        false
    }
}

/// Same or next smaller even number.
pub fn even(n: usize) -> usize {
    (n / 2) * 2
}

/// A fixed number of bolts spread evenly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bolts {
    pub bolts: usize,
}

impl Bolts {
    pub fn new(bolts: usize) -> Self {
        Self { bolts }
    }
}

impl Default for Bolts {
    fn default() -> Self {
        Self::new(1)
    }
}

impl BoltPolicy for Bolts {
    fn bolt_count(&self) -> usize {
        self.bolts
    }

    fn num_fingers(&self, fingers: usize) -> usize {
        if self.bolts % 2 == 1 {
            even(fingers)
        } else {
            fingers
        }
    }

    fn draw_bolt(&self, pos: usize, fingers: usize) -> bool {
        if fingers == 0 {
            return false;
        }
        let pos = if pos > fingers / 2 { fingers - pos } else { pos };
        if pos == 0 {
            return false;
        }
        if pos == fingers / 2 && self.bolts % 2 == 0 {
            return false;
        }

        let slot = |p: usize| ((p as f64 * (self.bolts + 1) as f64 / fingers as f64) - 0.01).floor();
        slot(pos) != slot(pos + 1)
    }
}
