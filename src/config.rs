//! TOML run configuration
//!
//! A run file names the macro, the project fixture and the parameters so a
//! report can be re-run without retyping them:
//!
//! ```toml
//! macro = "release_metrics"
//! project = "project.yaml"
//! user = "alice"
//! log_level = "debug"
//!
//! [parameters]
//! velocity = "actual_velocity"
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ErrorCode, MacroError, Result};
use crate::macros::MacroKind;
use crate::params::ParameterOverrides;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[serde(rename = "macro")]
    pub macro_name: Option<String>,
    /// Project fixture; relative paths are taken from the run file's directory
    pub project: Option<PathBuf>,
    pub user: Option<String>,
    pub log_level: Option<String>,
    #[serde(default)]
    pub parameters: HashMap<String, String>,
}

impl RunConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            let code = match e.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::CONFIG_NOT_FOUND,
                _ => ErrorCode::CONFIG_GENERIC,
            };
            MacroError::config_with_code(code, "cannot read run file", Some(path.to_path_buf()))
                .with_source(e)
        })?;

        let mut config: RunConfig = toml::from_str(&content).map_err(|e| {
            MacroError::config_with_code(
                ErrorCode::CONFIG_INVALID_TOML,
                format!("invalid run file: {}", e.message()),
                Some(path.to_path_buf()),
            )
            .with_source(e)
        })?;

        if let (Some(project), Some(dir)) = (&config.project, path.parent()) {
            if project.is_relative() {
                config.project = Some(dir.join(project));
            }
        }
        debug!(path = %path.display(), parameters = config.parameters.len(), "loaded run file");
        Ok(config)
    }

    pub fn macro_kind(&self) -> Result<Option<MacroKind>> {
        self.macro_name.as_deref().map(str::parse::<MacroKind>).transpose()
    }

    /// File parameters overlaid with `overrides`
    pub fn merged_parameters(
        &self,
        overrides: impl IntoIterator<Item = (String, String)>,
    ) -> ParameterOverrides {
        let mut parameters = self.parameters.clone();
        parameters.extend(overrides);
        parameters
    }
}

/// Parse a `key=value` command-line parameter
pub fn parse_parameter(text: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = text
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", text))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("parameter name missing in '{}'", text));
    }
    Ok((key.to_string(), value.to_string()))
}
