//! Error types for the engine crate.
//!
//! Configuration errors (unknown parameters, wrong edge counts, unknown move
//! tokens) and geometry errors (length mismatches, degenerate sizes) both
//! abort the current drawing call. Nothing is retried.

use jointkit_core::GeometryError;
use jointkit_settings::SettingsError;
use thiserror::Error;

/// Errors that can occur while drawing parts.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A settings bag was given a parameter it does not declare.
    #[error("Unknown parameter for {settings} settings: {name}")]
    UnknownParameter { settings: String, name: String },

    /// A declared parameter got a value of the wrong kind or out of range.
    #[error("Invalid value for {settings} parameter '{name}': {reason}")]
    InvalidParameter {
        settings: String,
        name: String,
        reason: String,
    },

    /// A wall got the wrong number of edge specifiers.
    #[error("Expected {expected} edges, got {found}")]
    EdgeCount { expected: usize, found: usize },

    /// No edge is registered under this symbol.
    #[error("Unknown edge type '{0}'")]
    UnknownEdge(char),

    /// An edge without a symbol was registered without naming one.
    #[error("Edge '{0}' has no symbol to register it under")]
    AnonymousEdge(String),

    /// A move string contained an unknown token.
    #[error("Unknown direction: '{0}'")]
    UnknownMove(String),

    /// Sub-edge lengths of a compound edge do not add up.
    #[error("Wrong length for compound edge: expected {expected}, sections sum to {actual}")]
    LengthMismatch { expected: f64, actual: f64 },

    /// An edge that needs a height was drawn without one.
    #[error("Edge '{0}' needs a height to be drawn")]
    MissingHeight(String),

    /// A sections string could not be parsed.
    #[error("Don't understand sections string: '{0}'")]
    InvalidSections(String),

    /// The cursor was restored more often than saved.
    #[error("Cursor restore without matching save")]
    CursorUnderflow,

    /// A geometry helper rejected its input.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// The engine configuration was rejected.
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
