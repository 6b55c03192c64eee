//! # jointkit
//!
//! Parametric 2D geometry for laser-cut furniture parts: given a few
//! dimensions and a material thickness it computes the boundary paths,
//! interlocking joints included, of flat panels that assemble into a 3D
//! object.
//!
//! ## Architecture
//!
//! jointkit is organized as a workspace with multiple crates:
//!
//! 1. **jointkit-core** - Shared aliases, polygon sizing, cut colours
//! 2. **jointkit-settings** - Engine configuration files and parameter values
//! 3. **jointkit-engine** - Cursor, surfaces, edges, walls and layout
//! 4. **jointkit** - This facade, plus logging setup
//!
//! ## Example
//!
//! ```
//! use jointkit::{EngineConfig, PathRecorder, Sheet, WallOptions};
//! use jointkit::core::shared;
//!
//! let recorder = shared(PathRecorder::new());
//! let mut sheet = Sheet::from_config(&EngineConfig::default(), Box::new(recorder.clone()))?;
//! sheet.rectangular_wall(100.0, 60.0, "fFfF", WallOptions::new().moves("right"))?;
//! assert!(!recorder.borrow().paths().is_empty());
//! # Ok::<(), jointkit::EngineError>(())
//! ```

pub use jointkit_core as core;
pub use jointkit_engine as engine;
pub use jointkit_settings as settings;

pub use jointkit_core::{CutColor, GeometryError, PolygonSize, RegularPolygon, Shared};
pub use jointkit_engine::{
    parse_sections, BoltPolicy, Bolts, BoundaryEdge, CompoundEdge, Cursor, EdgeDrawOptions,
    EdgeRegistry, EdgeSpec, EdgeSpecs, EngineError, EngineResult, FeatureContext, FeatureFn,
    MoveSpec, MoveToken, PathRecorder, Poly, Settings, Sheet, Slot, SlottedEdge, Surface,
    SurroundingEdges, WallOptions, WallOutcome,
};
pub use jointkit_settings::{
    BedBoltSettings, EngineConfig, HexHoleSettings, ParamValue, SettingsError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
///
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    Ok(())
}
