//! Boundary edges
//!
//! An edge draws one side of a part over a given length, starting at the
//! cursor and ending at `(length, 0)` with the heading unchanged. Besides
//! drawing it reports how much room it needs outside the part's inner
//! rectangle: `start_width`/`end_width` is material it eats into the
//! neighbouring corner, `margin` is extra clearance beyond that.
//!
//! Edges are looked up by a single character through an [`EdgeRegistry`],
//! which [`crate::Sheet`] builds from the engine configuration. Custom edge
//! types implement [`BoundaryEdge`] and are added with
//! [`EdgeRegistry::register`].

pub mod compound;
pub mod dovetail;
pub mod finger;
pub mod flex;
pub mod grip;
pub mod straight;

pub use compound::{CompoundEdge, Slot, SlottedEdge};
pub use dovetail::{DoveTailJoint, DOVE_TAIL};
pub use finger::{
    FingerHoleEdge, FingerHoles, FingerJointEdge, FingerLayout, FingerParams, FingerStyle,
    FINGER_JOINT,
};
pub use flex::{FlexEdge, FLEX};
pub use grip::{GrippingEdge, GRIP};
pub use straight::StraightEdge;

use crate::bolts::{BedBoltSettings, BoltPolicy};
use crate::error::{EngineError, EngineResult};
use crate::params::{Settings, SettingsSchema, SharedSettings};
use crate::sheet::Sheet;
use jointkit_core::shared;
use jointkit_settings::{EngineConfig, ParamValue};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

/// Per-call extras an edge may use while drawing.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDrawOptions<'a> {
    /// Where to put bolts along the edge.
    pub bolts: Option<&'a dyn BoltPolicy>,
    /// Slot dimensions, the sheet default when unset.
    pub bed_bolt: Option<BedBoltSettings>,
    /// Height of the cut pattern for flex edges.
    pub height: Option<f64>,
}

impl<'a> EdgeDrawOptions<'a> {
    pub fn with_bolts(bolts: &'a dyn BoltPolicy) -> Self {
        Self {
            bolts: Some(bolts),
            ..Self::default()
        }
    }

    pub fn with_height(height: f64) -> Self {
        Self {
            height: Some(height),
            ..Self::default()
        }
    }
}

/// A drawable side of a part.
pub trait BoundaryEdge {
    /// Registry key, if the edge has one.
    fn symbol(&self) -> Option<char> {
        None
    }

    fn description(&self) -> &'static str;

    /// Parameter bag, shared with the mating edge.
    fn settings(&self) -> Option<SharedSettings> {
        None
    }

    fn draw(&self, sheet: &mut Sheet, length: f64, opts: &EdgeDrawOptions<'_>)
        -> EngineResult<()>;

    /// Material the start of the edge sits below the part's inner outline.
    fn start_width(&self) -> f64 {
        0.0
    }

    fn end_width(&self) -> f64 {
        self.start_width()
    }

    /// Clearance needed beyond the start width.
    fn margin(&self) -> f64 {
        0.0
    }

    /// Room the edge needs outside the inner outline.
    fn spacing(&self) -> f64 {
        self.start_width() + self.margin()
    }

    /// Degrees the edge leaves the baseline at its start.
    fn start_angle(&self) -> f64 {
        0.0
    }

    /// Degrees the edge leaves the baseline at its end.
    fn end_angle(&self) -> f64 {
        0.0
    }
}

/// Either a registry symbol or a concrete edge.
#[derive(Clone)]
pub enum EdgeSpec {
    Symbol(char),
    Edge(Rc<dyn BoundaryEdge>),
}

impl fmt::Debug for EdgeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol(c) => write!(f, "Symbol({:?})", c),
            Self::Edge(edge) => write!(f, "Edge({})", edge.description()),
        }
    }
}

impl From<char> for EdgeSpec {
    fn from(symbol: char) -> Self {
        Self::Symbol(symbol)
    }
}

impl From<Rc<dyn BoundaryEdge>> for EdgeSpec {
    fn from(edge: Rc<dyn BoundaryEdge>) -> Self {
        Self::Edge(edge)
    }
}

/// An ordered list of edge specs, one per side.
#[derive(Debug, Clone, Default)]
pub struct EdgeSpecs(pub Vec<EdgeSpec>);

impl EdgeSpecs {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EdgeSpec> {
        self.0.iter()
    }
}

impl From<&str> for EdgeSpecs {
    fn from(symbols: &str) -> Self {
        Self(symbols.chars().map(EdgeSpec::Symbol).collect())
    }
}

impl From<Vec<EdgeSpec>> for EdgeSpecs {
    fn from(specs: Vec<EdgeSpec>) -> Self {
        Self(specs)
    }
}

impl From<EdgeSpec> for EdgeSpecs {
    fn from(spec: EdgeSpec) -> Self {
        Self(vec![spec])
    }
}

/// Edges by symbol, plus the settings bags they were built from.
pub struct EdgeRegistry {
    edges: BTreeMap<char, Rc<dyn BoundaryEdge>>,
    settings: BTreeMap<&'static str, SharedSettings>,
    finger_joint: SharedSettings,
    thickness: f64,
}

impl fmt::Debug for EdgeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeRegistry")
            .field("symbols", &self.edges.keys().collect::<String>())
            .field("settings", &self.settings.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl EdgeRegistry {
    /// Build the standard edges (`e E f F h d D X g`) with the parameter
    /// overrides recorded in `config`.
    pub fn new(config: &EngineConfig) -> EngineResult<Self> {
        let thickness = config.thickness;
        let schemas: [&'static SettingsSchema; 4] = [&FINGER_JOINT, &DOVE_TAIL, &FLEX, &GRIP];

        for name in config.edges.keys() {
            if !schemas.iter().any(|s| s.name == name) {
                warn!(settings = %name, "ignoring overrides for unknown settings type");
            }
        }

        let mut settings = BTreeMap::new();
        for schema in schemas {
            let overrides = config
                .overrides_for(schema.name)
                .into_iter()
                .flatten()
                .map(|(k, v)| (k.as_str(), v.clone()));
            let resolved = Settings::new(schema, thickness, true, overrides)?;
            settings.insert(schema.name, shared(resolved));
        }

        let bag = |name: &str| -> SharedSettings { Rc::clone(&settings[name]) };
        let finger_joint = bag(FINGER_JOINT.name);

        let mut registry = Self {
            edges: BTreeMap::new(),
            finger_joint: Rc::clone(&finger_joint),
            settings: BTreeMap::new(),
            thickness,
        };

        let standard: Vec<Rc<dyn BoundaryEdge>> = vec![
            Rc::new(StraightEdge::plain()),
            Rc::new(StraightEdge::outset(thickness)),
            Rc::new(FingerJointEdge::new(Rc::clone(&finger_joint), true)),
            Rc::new(FingerJointEdge::new(Rc::clone(&finger_joint), false)),
            Rc::new(FingerHoleEdge::new(
                FingerHoles::new(Rc::clone(&finger_joint)),
                config.spacing(),
            )),
            Rc::new(DoveTailJoint::new(bag(DOVE_TAIL.name), true)),
            Rc::new(DoveTailJoint::new(bag(DOVE_TAIL.name), false)),
            Rc::new(FlexEdge::new(bag(FLEX.name))),
            Rc::new(GrippingEdge::new(bag(GRIP.name))),
        ];
        registry.settings = settings;
        for edge in standard {
            registry.register(edge)?;
        }

        Ok(registry)
    }

    /// Add an edge under its own symbol, replacing any previous one.
    pub fn register(&mut self, edge: Rc<dyn BoundaryEdge>) -> EngineResult<()> {
        let symbol = edge
            .symbol()
            .ok_or_else(|| EngineError::AnonymousEdge(edge.description().to_string()))?;
        self.register_as(symbol, edge);
        Ok(())
    }

    /// Add an edge under an explicit symbol, replacing any previous one.
    pub fn register_as(&mut self, symbol: char, edge: Rc<dyn BoundaryEdge>) {
        debug!(%symbol, description = edge.description(), "register edge");
        self.edges.insert(symbol, edge);
    }

    pub fn get(&self, symbol: char) -> Option<Rc<dyn BoundaryEdge>> {
        self.edges.get(&symbol).cloned()
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.edges.contains_key(&symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.edges.keys().copied()
    }

    pub fn resolve(&self, spec: &EdgeSpec) -> EngineResult<Rc<dyn BoundaryEdge>> {
        match spec {
            EdgeSpec::Symbol(c) => self.get(*c).ok_or(EngineError::UnknownEdge(*c)),
            EdgeSpec::Edge(edge) => Ok(Rc::clone(edge)),
        }
    }

    /// Settings bag by type name (`FingerJoint`, `DoveTail`, `Flex`, `Grip`).
    pub fn settings(&self, name: &str) -> Option<SharedSettings> {
        self.settings.get(name).cloned()
    }

    /// Change a settings bag; every edge sharing it draws with the new values.
    pub fn set_values<I, K, V>(&self, name: &str, relative: bool, overrides: I) -> EngineResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<ParamValue>,
    {
        let bag = self.settings.get(name).ok_or_else(|| EngineError::UnknownParameter {
            settings: "EdgeRegistry".to_string(),
            name: name.to_string(),
        })?;
        bag.borrow_mut().set_values(relative, overrides)
    }

    pub fn finger_joint(&self) -> SharedSettings {
        Rc::clone(&self.finger_joint)
    }

    pub fn finger_holes(&self) -> FingerHoles {
        FingerHoles::new(self.finger_joint())
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }
}
