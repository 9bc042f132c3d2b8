//! Parameter resolution with defaulting
//!
//! Every macro resolves its metric names the same way:
//!
//! 1. a caller-supplied override wins,
//! 2. otherwise a registered default is used (a literal, a lazily invoked
//!    supplier, or the metric name itself),
//! 3. otherwise the metric name is returned unchanged.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use tracker_macros::params::ParameterResolver;
//!
//! let overrides = HashMap::from([("date_accepted".to_string(), "accepted_on".to_string())]);
//! let resolver = ParameterResolver::builder()
//!     .identity("date_accepted")
//!     .literal("iteration_length", "7")
//!     .build(overrides)
//!     .unwrap();
//!
//! assert_eq!(resolver.resolve("date_accepted").unwrap(), "accepted_on");
//! assert_eq!(resolver.field_for("date_accepted").unwrap(), "Accepted On");
//! assert_eq!(resolver.get("iteration_length_parameter").unwrap(), "7");
//! ```

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, trace};

use super::accessor::{Accessor, AccessorTable};
use super::label::label_for;
use crate::error::Result;

/// Caller-supplied values keyed by metric name
pub type ParameterOverrides = HashMap<String, String>;

/// Zero-argument function consulted when a default is needed
pub type Supplier<'a> = Box<dyn Fn() -> Result<String> + 'a>;

/// How a metric is resolved when the caller did not override it
pub enum ParameterDefault<'a> {
    Literal(String),
    /// Invoked on every resolution, never at construction
    Supplier(Supplier<'a>),
    /// The metric name is its own value
    Identity,
}

impl ParameterDefault<'_> {
    /// Short human-readable description, used by `tracker-macros list`
    pub fn describe(&self) -> String {
        match self {
            ParameterDefault::Literal(value) => format!("defaults to '{}'", value),
            ParameterDefault::Supplier(_) => "supplied by the project".to_string(),
            ParameterDefault::Identity => "defaults to its own name".to_string(),
        }
    }
}

impl fmt::Debug for ParameterDefault<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterDefault::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            ParameterDefault::Supplier(_) => f.write_str("Supplier(..)"),
            ParameterDefault::Identity => f.write_str("Identity"),
        }
    }
}

/// Builder collecting defaults and aliases before the overrides arrive
#[derive(Default)]
pub struct ParameterResolverBuilder<'a> {
    defaults: HashMap<String, ParameterDefault<'a>>,
    aliases: HashMap<String, String>,
}

impl<'a> ParameterResolverBuilder<'a> {
    pub fn literal(mut self, metric: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults
            .insert(metric.into(), ParameterDefault::Literal(value.into()));
        self
    }

    pub fn supplier<F>(mut self, metric: impl Into<String>, supply: F) -> Self
    where
        F: Fn() -> Result<String> + 'a,
    {
        self.defaults
            .insert(metric.into(), ParameterDefault::Supplier(Box::new(supply)));
        self
    }

    pub fn identity(mut self, metric: impl Into<String>) -> Self {
        self.defaults
            .insert(metric.into(), ParameterDefault::Identity);
        self
    }

    /// Let accessor requests name `metric` as `alias`
    pub fn alias(mut self, alias: impl Into<String>, metric: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), metric.into());
        self
    }

    /// Finish the resolver.
    ///
    /// The known metric set becomes the union of override and default keys.
    /// Fails if an alias names a metric outside that set.
    pub fn build(self, overrides: ParameterOverrides) -> Result<ParameterResolver<'a>> {
        let known = overrides
            .keys()
            .chain(self.defaults.keys())
            .cloned()
            .collect::<Vec<_>>();
        let accessors = AccessorTable::new(known, self.aliases)?;

        Ok(ParameterResolver {
            overrides,
            defaults: self.defaults,
            accessors,
        })
    }
}

/// Resolves metric names to values and display labels
pub struct ParameterResolver<'a> {
    overrides: ParameterOverrides,
    defaults: HashMap<String, ParameterDefault<'a>>,
    accessors: AccessorTable,
}

impl<'a> ParameterResolver<'a> {
    pub fn builder() -> ParameterResolverBuilder<'a> {
        ParameterResolverBuilder::default()
    }

    /// Resolver with overrides only; every other name resolves to itself
    pub fn with_overrides(overrides: ParameterOverrides) -> Self {
        let accessors = AccessorTable::new(overrides.keys().cloned(), HashMap::new())
            .unwrap_or_default();
        Self {
            overrides,
            defaults: HashMap::new(),
            accessors,
        }
    }

    /// Resolve `name` to its value.
    ///
    /// Supplier failures are returned unchanged.
    pub fn resolve(&self, name: &str) -> Result<String> {
        if let Some(value) = self.overrides.get(name) {
            trace!(metric = name, value = %value, "resolved from override");
            return Ok(value.clone());
        }

        let value = match self.defaults.get(name) {
            Some(ParameterDefault::Literal(value)) => value.clone(),
            Some(ParameterDefault::Supplier(supply)) => {
                debug!(metric = name, "invoking default supplier");
                supply()?
            }
            Some(ParameterDefault::Identity) | None => name.to_string(),
        };
        trace!(metric = name, value = %value, "resolved from default");
        Ok(value)
    }

    /// Display label for a value or name
    pub fn label_for(&self, value: &str) -> String {
        label_for(value)
    }

    /// Label of the resolved value of `name`
    pub fn field_for(&self, name: &str) -> Result<String> {
        Ok(label_for(&self.resolve(name)?))
    }

    /// Answer an accessor request such as `velocity_field` or
    /// `release_parameter`.
    ///
    /// Unlike [`resolve`](Self::resolve), the metric must be one this
    /// resolver knows about (directly or through an alias).
    pub fn get(&self, request: &str) -> Result<String> {
        let accessor = Accessor::parse(request)?;
        let metric = self.accessors.metric_for(&accessor.metric)?;
        if accessor.kind.is_label() {
            self.field_for(metric)
        } else {
            self.resolve(metric)
        }
    }

    pub fn has_override(&self, name: &str) -> bool {
        self.overrides.contains_key(name)
    }

    /// Known metrics with a description of where their value comes from
    pub fn describe(&self) -> Vec<(String, String)> {
        self.accessors
            .metrics()
            .map(|metric| {
                let source = match (self.overrides.get(metric), self.defaults.get(metric)) {
                    (Some(value), _) => format!("overridden with '{}'", value),
                    (None, Some(default)) => default.describe(),
                    (None, None) => ParameterDefault::Identity.describe(),
                };
                (metric.to_string(), source)
            })
            .collect()
    }

    pub fn aliases(&self) -> Vec<(String, String)> {
        let mut aliases: Vec<_> = self
            .accessors
            .aliases()
            .map(|(alias, metric)| (alias.to_string(), metric.to_string()))
            .collect();
        aliases.sort();
        aliases
    }
}

impl fmt::Debug for ParameterResolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterResolver")
            .field("overrides", &self.overrides)
            .field("defaults", &self.defaults)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, MacroError};
    use std::cell::Cell;

    fn overrides(pairs: &[(&str, &str)]) -> ParameterOverrides {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_override_beats_default() {
        let resolver = ParameterResolver::builder()
            .literal("story_points", "estimate")
            .build(overrides(&[("story_points", "planning_estimate")]))
            .unwrap();
        assert_eq!(resolver.resolve("story_points").unwrap(), "planning_estimate");
    }

    #[test]
    fn test_literal_default() {
        let resolver = ParameterResolver::builder()
            .literal("iteration_length", "7")
            .build(ParameterOverrides::new())
            .unwrap();
        assert_eq!(resolver.resolve("iteration_length").unwrap(), "7");
    }

    #[test]
    fn test_supplier_invoked_once_per_resolve() {
        let calls = Cell::new(0);
        let resolver = ParameterResolver::builder()
            .supplier("release", || {
                calls.set(calls.get() + 1);
                Ok("#1 Release 1".to_string())
            })
            .build(ParameterOverrides::new())
            .unwrap();

        assert_eq!(calls.get(), 0);
        assert_eq!(resolver.resolve("release").unwrap(), "#1 Release 1");
        assert_eq!(calls.get(), 1);
        assert_eq!(resolver.resolve("release").unwrap(), "#1 Release 1");
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_supplier_not_invoked_when_overridden() {
        let calls = Cell::new(0);
        let resolver = ParameterResolver::builder()
            .supplier("iteration", || {
                calls.set(calls.get() + 1);
                Ok("#2 Sprint".to_string())
            })
            .build(overrides(&[("iteration", "#5 Sprint")]))
            .unwrap();

        assert_eq!(resolver.resolve("iteration").unwrap(), "#5 Sprint");
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_identity_fallback() {
        let resolver = ParameterResolver::with_overrides(ParameterOverrides::new());
        assert_eq!(resolver.resolve("story_points").unwrap(), "story_points");
        assert_eq!(resolver.field_for("story_points").unwrap(), "Story Points");
    }

    #[test]
    fn test_supplier_failure_propagates_unchanged() {
        let resolver = ParameterResolver::builder()
            .supplier("iteration", || {
                Err(MacroError::resolution_with_code(
                    ErrorCode::RESOLUTION_VARIABLE_UNDEFINED,
                    "project variable 'Current Iteration' is not defined",
                    None,
                ))
            })
            .build(ParameterOverrides::new())
            .unwrap();

        let err = resolver.resolve("iteration").unwrap_err();
        assert_eq!(err.code(), ErrorCode::RESOLUTION_VARIABLE_UNDEFINED);
        assert!(resolver.field_for("iteration").is_err());
    }

    #[test]
    fn test_get_dispatches_on_suffix() {
        let resolver = ParameterResolver::builder()
            .identity("date_accepted")
            .identity("story_points")
            .alias("estimate", "story_points")
            .build(overrides(&[("date_accepted", "accepted_on")]))
            .unwrap();

        assert_eq!(resolver.get("date_accepted_parameter").unwrap(), "accepted_on");
        assert_eq!(resolver.get("date_accepted_property").unwrap(), "accepted_on");
        assert_eq!(resolver.get("date_accepted_field").unwrap(), "Accepted On");
        assert_eq!(resolver.get("estimate_property").unwrap(), "story_points");
        assert_eq!(resolver.get("estimate_field").unwrap(), "Story Points");
        assert_eq!(resolver.get("story_points_type").unwrap(), "story_points");
    }

    #[test]
    fn test_get_rejects_unknown_metric() {
        let resolver = ParameterResolver::builder()
            .identity("velocity")
            .build(ParameterOverrides::new())
            .unwrap();

        let err = resolver.get("colour_field").unwrap_err();
        assert_eq!(err.code(), ErrorCode::VALIDATION_UNKNOWN_METRIC);
        assert_eq!(err.metric(), Some("colour"));
        assert_eq!(resolver.resolve("colour").unwrap(), "colour");
    }

    #[test]
    fn test_override_keys_are_known() {
        let resolver = ParameterResolver::builder()
            .build(overrides(&[("burn_rate", "fast")]))
            .unwrap();
        assert_eq!(resolver.get("burn_rate_parameter").unwrap(), "fast");
    }

    #[test]
    fn test_describe_lists_sources() {
        let resolver = ParameterResolver::builder()
            .literal("iteration_length", "7")
            .supplier("release", || Ok("#1 R".to_string()))
            .identity("velocity")
            .build(overrides(&[("velocity", "actual_velocity")]))
            .unwrap();

        let described: HashMap<_, _> = resolver.describe().into_iter().collect();
        assert_eq!(described["iteration_length"], "defaults to '7'");
        assert_eq!(described["release"], "supplied by the project");
        assert_eq!(described["velocity"], "overridden with 'actual_velocity'");
    }
}
