//! Table-driven accessor requests
//!
//! Macros ask for parameters with request strings such as
//! `release_parameter` or `end_date_field`. A request is split into a metric
//! name and an [`AccessorKind`] using a fixed suffix table, then checked
//! against the metrics the resolver was built with.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::error::{ErrorCode, MacroError, Result};

/// What a request wants back for its metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    /// The resolved value
    Parameter,
    /// The label of the resolved value
    Field,
    /// Same as `Parameter`, used for card-type parameters
    Type,
    /// Same as `Parameter`, used for card-property parameters
    Property,
}

const SUFFIXES: &[(&str, AccessorKind)] = &[
    ("_parameter", AccessorKind::Parameter),
    ("_field", AccessorKind::Field),
    ("_type", AccessorKind::Type),
    ("_property", AccessorKind::Property),
];

impl AccessorKind {
    pub fn suffix(&self) -> &'static str {
        SUFFIXES
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(suffix, _)| *suffix)
            .unwrap_or("_parameter")
    }

    /// Whether the request asks for a label rather than a value
    pub fn is_label(&self) -> bool {
        matches!(self, AccessorKind::Field)
    }
}

/// A parsed accessor request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    pub metric: String,
    pub kind: AccessorKind,
}

impl Accessor {
    pub fn parse(request: &str) -> Result<Self> {
        for (suffix, kind) in SUFFIXES {
            if let Some(metric) = request.strip_suffix(*suffix) {
                if metric.is_empty() {
                    break;
                }
                return Ok(Self {
                    metric: metric.to_string(),
                    kind: *kind,
                });
            }
        }

        Err(MacroError::validation_with_code(
            ErrorCode::VALIDATION_UNKNOWN_ACCESSOR,
            format!(
                "'{}' is not a recognized accessor (expected a _parameter, _field, _type or _property suffix)",
                request
            ),
            Some(request.to_string()),
        ))
    }
}

impl FromStr for Accessor {
    type Err = MacroError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.metric, self.kind.suffix())
    }
}

/// The metric names an accessor may name, plus aliases
#[derive(Debug, Clone, Default)]
pub struct AccessorTable {
    known: BTreeSet<String>,
    aliases: HashMap<String, String>,
}

impl AccessorTable {
    /// Build a table, rejecting aliases that point at unknown metrics
    pub fn new(
        known: impl IntoIterator<Item = String>,
        aliases: HashMap<String, String>,
    ) -> Result<Self> {
        let known: BTreeSet<String> = known.into_iter().collect();
        for (alias, metric) in &aliases {
            if !known.contains(metric) {
                return Err(MacroError::validation_with_code(
                    ErrorCode::VALIDATION_UNKNOWN_METRIC,
                    format!("alias '{}' refers to unknown metric '{}'", alias, metric),
                    Some(alias.clone()),
                ));
            }
        }
        Ok(Self { known, aliases })
    }

    /// Map a requested name to its metric, following aliases
    pub fn metric_for<'t>(&'t self, name: &'t str) -> Result<&'t str> {
        let metric = self.aliases.get(name).map(String::as_str).unwrap_or(name);
        if self.known.contains(metric) {
            Ok(metric)
        } else {
            Err(crate::error::helpers::common::unknown_metric(name))
        }
    }

    /// Known metrics in sorted order
    pub fn metrics(&self) -> impl Iterator<Item = &str> {
        self.known.iter().map(String::as_str)
    }

    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(a, m)| (a.as_str(), m.as_str()))
    }
}
