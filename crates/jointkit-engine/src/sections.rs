//! Section strings like `"20 30:40"`, `"60/3"` or `"20*3"`.

use crate::error::{EngineError, EngineResult};
use regex::Regex;
use std::sync::OnceLock;

fn separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new(r"\s|:").expect("invalid regex pattern"))
}

fn divide() -> &'static Regex {
    static DIVIDE: OnceLock<Regex> = OnceLock::new();
    DIVIDE.get_or_init(|| Regex::new(r"^(\d+(\.\d+)?)/(\d+)$").expect("invalid regex pattern"))
}

fn repeat() -> &'static Regex {
    static REPEAT: OnceLock<Regex> = OnceLock::new();
    REPEAT.get_or_init(|| Regex::new(r"^(\d+(\.\d+)?)\*(\d+)$").expect("invalid regex pattern"))
}

/// Split a section string into lengths.
///
/// Tokens are separated by whitespace or `:`. `a/n` is `n` parts of `a/n`
/// each, `a*n` is `n` parts of `a`. An empty string gives a single zero
/// section.
pub fn parse_sections(s: &str) -> EngineResult<Vec<f64>> {
    let invalid = || EngineError::InvalidSections(s.to_string());
    let mut result = Vec::new();

    for token in separator().split(s) {
        if token.is_empty() {
            continue;
        }
        if let Some(caps) = divide().captures(token) {
            let value: f64 = caps[1].parse().map_err(|_| invalid())?;
            let n: usize = caps[3].parse().map_err(|_| invalid())?;
            result.extend(std::iter::repeat(value / n as f64).take(n));
        } else if let Some(caps) = repeat().captures(token) {
            let value: f64 = caps[1].parse().map_err(|_| invalid())?;
            let n: usize = caps[3].parse().map_err(|_| invalid())?;
            result.extend(std::iter::repeat(value).take(n));
        } else {
            result.push(token.parse::<f64>().map_err(|_| invalid())?);
        }
    }

    if result.is_empty() {
        result.push(0.0);
    }
    Ok(result)
}
