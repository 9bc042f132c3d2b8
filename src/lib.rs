//! # tracker-macros
//!
//! Report macros for a project-tracking tool: release velocity metrics, an
//! iteration burndown chart and a what-if velocity calculator.
//!
//! ## Usage
//!
//! ```bash
//! tracker-macros run release_metrics --project project.yaml [--param velocity=actual_velocity]
//! ```
//!
//! ## Modules
//!
//! - `params` - Parameter resolution, labels and accessor dispatch shared by every macro
//! - `project` - Query interface over a project's cards, plus an in-memory fixture project
//! - `metrics` - Velocity, burndown and date arithmetic
//! - `chart` - Line-chart image URLs
//! - `render` - Markup templates
//! - `macros` - The macros themselves and their registry
//! - `config` - TOML run files
//! - `app` - Logging and fatal error handling for the binary
pub mod app;
pub mod chart;
pub mod config;
pub mod error;
pub mod macros;
pub mod metrics;
pub mod params;
pub mod project;
pub mod render;

pub use error::{MacroError, Result};
pub use macros::{CurrentUser, Macro, MacroContext, MacroKind};
pub use params::{ParameterDefault, ParameterOverrides, ParameterResolver};
pub use project::{InMemoryProject, ProjectQuery, Query, Record};
