//! # jointkit-engine
//!
//! Path construction for laser-cut panels. A [`Sheet`] drives a turtle
//! style [`Cursor`] over a [`Surface`]; pluggable [`BoundaryEdge`]s draw
//! joints along the sides of a part, and the wall functions compose four
//! or more edges into a placed, non-overlapping outline.

pub mod bolts;
pub mod cursor;
pub mod edges;
pub mod error;
pub mod features;
pub mod layout;
pub mod params;
pub mod sections;
pub mod sheet;
pub mod surface;
pub mod walls;

pub use bolts::{BedBoltSettings, BoltPolicy, Bolts};
pub use cursor::{Cursor, Poly};
pub use edges::{
    BoundaryEdge, CompoundEdge, EdgeDrawOptions, EdgeRegistry, EdgeSpec, EdgeSpecs, FingerHoles,
    Slot, SlottedEdge,
};
pub use error::{EngineError, EngineResult};
pub use layout::{MoveSpec, MoveToken};
pub use params::{AbsoluteDefault, Settings, SettingsSchema, SharedSettings};
pub use sections::parse_sections;
pub use sheet::{FeatureContext, FeatureFn, Sheet};
pub use surface::{ArcSegment, PathCommand, PathRecorder, RecordedPath, Surface};
pub use walls::{SurroundingEdges, WallOptions, WallOutcome};
