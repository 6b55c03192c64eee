//! # jointkit Core
//!
//! Core types shared by the jointkit crates: single-threaded shared
//! ownership aliases, regular polygon sizing and the cut colour palette.

pub mod color;
pub mod error;
pub mod geometry;
pub mod types;

pub use color::CutColor;
pub use error::{GeometryError, GeometryResult};
pub use geometry::{dist, PolygonSize, RegularPolygon};
pub use types::{shared, Shared};
