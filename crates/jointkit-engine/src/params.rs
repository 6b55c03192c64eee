//! Parameter bags for edge families
//!
//! Each edge family declares a [`SettingsSchema`] with two tiers:
//! absolute parameters are stored as given, relative ones are multiples of
//! the material thickness and get scaled when set. A resolved [`Settings`]
//! bag is shared between the positive and negative edge of a pair through
//! [`SharedSettings`], so changing it changes both joints alike.

use crate::error::{EngineError, EngineResult};
use jointkit_core::Shared;
use jointkit_settings::ParamValue;
use std::collections::BTreeMap;

/// Default of an absolute parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbsoluteDefault {
    Number(f64),
    Flag(bool),
    /// Allowed values; the first one is the default.
    Choice(&'static [&'static str]),
}

/// Declaration of a settings type.
#[derive(Debug)]
pub struct SettingsSchema {
    /// Name used in errors and as the key in config files.
    pub name: &'static str,
    pub absolute: &'static [(&'static str, AbsoluteDefault)],
    pub relative: &'static [(&'static str, f64)],
    /// Range check run after every change.
    pub check: fn(&Settings) -> EngineResult<()>,
}

impl SettingsSchema {
    fn absolute_default(&self, name: &str) -> Option<(&'static str, AbsoluteDefault)> {
        self.absolute.iter().copied().find(|(n, _)| *n == name)
    }

    fn relative_key(&self, name: &str) -> Option<&'static str> {
        self.relative
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(n, _)| *n)
    }
}

/// Check that accepts everything.
pub fn no_check(_: &Settings) -> EngineResult<()> {
    Ok(())
}

/// A resolved parameter bag.
#[derive(Debug, Clone)]
pub struct Settings {
    schema: &'static SettingsSchema,
    thickness: f64,
    values: BTreeMap<&'static str, ParamValue>,
}

pub type SharedSettings = Shared<Settings>;

impl Settings {
    /// Resolve all defaults for `thickness`, then apply `overrides`.
    ///
    /// With `relative` set, relative overrides are multiples of the
    /// thickness; otherwise they are taken as millimetres.
    pub fn new<I, K, V>(
        schema: &'static SettingsSchema,
        thickness: f64,
        relative: bool,
        overrides: I,
    ) -> EngineResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<ParamValue>,
    {
        let mut values = BTreeMap::new();
        for (name, default) in schema.absolute {
            let value = match default {
                AbsoluteDefault::Number(n) => ParamValue::Number(*n),
                AbsoluteDefault::Flag(b) => ParamValue::Flag(*b),
                AbsoluteDefault::Choice(choices) => {
                    ParamValue::Text(choices.first().copied().unwrap_or_default().to_string())
                }
            };
            values.insert(*name, value);
        }

        let factor = if relative { thickness } else { 1.0 };
        for (name, default) in schema.relative {
            values.insert(*name, ParamValue::Number(default * factor));
        }

        let mut settings = Self {
            schema,
            thickness,
            values,
        };
        settings.set_values(relative, overrides)?;
        Ok(settings)
    }

    /// All defaults, relative parameters scaled by `thickness`.
    pub fn with_defaults(schema: &'static SettingsSchema, thickness: f64) -> EngineResult<Self> {
        Self::new(schema, thickness, true, std::iter::empty::<(&str, ParamValue)>())
    }

    /// Change parameters after construction, same scaling rule as [`Settings::new`].
    pub fn set_values<I, K, V>(&mut self, relative: bool, overrides: I) -> EngineResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<ParamValue>,
    {
        let factor = if relative { self.thickness } else { 1.0 };
        for (name, value) in overrides {
            let name = name.as_ref();
            let value = value.into();

            if let Some((key, default)) = self.schema.absolute_default(name) {
                let value = self.accept_absolute(key, default, value)?;
                self.values.insert(key, value);
            } else if let Some(key) = self.schema.relative_key(name) {
                let n = value.as_f64().ok_or_else(|| {
                    self.invalid(key, format!("expected a number, got {}", value.kind()))
                })?;
                self.values.insert(key, ParamValue::Number(n * factor));
            } else {
                return Err(EngineError::UnknownParameter {
                    settings: self.schema.name.to_string(),
                    name: name.to_string(),
                });
            }
        }
        (self.schema.check)(self)
    }

    fn accept_absolute(
        &self,
        key: &str,
        default: AbsoluteDefault,
        value: ParamValue,
    ) -> EngineResult<ParamValue> {
        match (default, &value) {
            (AbsoluteDefault::Number(_), ParamValue::Number(_))
            | (AbsoluteDefault::Flag(_), ParamValue::Flag(_)) => Ok(value),
            (AbsoluteDefault::Choice(choices), ParamValue::Text(text)) => {
                if choices.contains(&text.as_str()) {
                    Ok(value)
                } else {
                    Err(self.invalid(
                        key,
                        format!("'{}' is not one of {}", text, choices.join(", ")),
                    ))
                }
            }
            _ => Err(self.invalid(key, format!("unexpected {} value", value.kind()))),
        }
    }

    /// Build an [`EngineError::InvalidParameter`] for this settings type.
    pub fn invalid(&self, name: &str, reason: impl Into<String>) -> EngineError {
        EngineError::InvalidParameter {
            settings: self.schema.name.to_string(),
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub fn schema(&self) -> &'static SettingsSchema {
        self.schema
    }

    pub fn name(&self) -> &'static str {
        self.schema.name
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Numeric parameter; undeclared names read as zero.
    pub fn number(&self, name: &str) -> f64 {
        debug_assert!(self.values.contains_key(name), "undeclared parameter {name}");
        self.get(name).and_then(ParamValue::as_f64).unwrap_or_default()
    }

    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(ParamValue::as_bool).unwrap_or_default()
    }

    pub fn text(&self, name: &str) -> &str {
        self.get(name).and_then(ParamValue::as_str).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }
}
