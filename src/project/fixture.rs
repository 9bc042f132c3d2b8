//! YAML project fixtures
//!
//! ```yaml
//! today: 2011-07-15
//! variables:
//!   Current Release: "#1 Release 1"
//! cards:
//!   - type: iteration
//!     name: Iteration 1
//!     Start Date: 2011-06-06
//!     End Date: 2011-06-12
//!     Velocity: 10
//! ```
//!
//! Card keys may be field labels or column keys; both become column keys.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_yaml::Value;
use tracing::debug;

use super::memory::InMemoryProject;
use super::record::Record;
use crate::error::{ErrorCode, MacroError, Result};
use crate::params::key_for;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFixture {
    /// Date queries compare against; the local date when absent
    pub today: Option<NaiveDate>,
    #[serde(default)]
    pub variables: HashMap<String, String>,
    #[serde(default)]
    pub cards: Vec<BTreeMap<String, Value>>,
}

impl ProjectFixture {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            let code = match e.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::CONFIG_NOT_FOUND,
                _ => ErrorCode::CONFIG_GENERIC,
            };
            MacroError::config_with_code(
                code,
                "cannot read project fixture",
                Some(path.to_path_buf()),
            )
            .with_source(e)
        })?;

        serde_yaml::from_str(&content).map_err(|e| {
            MacroError::config_with_code(
                ErrorCode::CONFIG_INVALID_YAML,
                format!("invalid project fixture: {}", e),
                Some(path.to_path_buf()),
            )
            .with_source(e)
        })
    }

    pub fn into_project(self) -> Result<InMemoryProject> {
        let today = self
            .today
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let mut project = InMemoryProject::new(today);

        for (name, value) in self.variables {
            project = project.with_variable(name, value);
        }
        for (index, card) in self.cards.into_iter().enumerate() {
            project = project.with_card(card_record(index, card)?);
        }

        debug!(cards = project.cards().len(), %today, "loaded project fixture");
        Ok(project)
    }
}

fn card_record(index: usize, card: BTreeMap<String, Value>) -> Result<Record> {
    let mut record = Record::new();
    for (field, value) in card {
        let text = match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            other => {
                return Err(MacroError::config_with_code(
                    ErrorCode::CONFIG_INVALID_VALUE,
                    format!(
                        "card {} field '{}' must be a scalar, found {:?}",
                        index, field, other
                    ),
                    None,
                ))
            }
        };
        record.insert(key_for(&field), text);
    }
    Ok(record)
}

impl InMemoryProject {
    /// Load a project from a YAML fixture file
    pub fn load(path: &Path) -> Result<Self> {
        ProjectFixture::load(path)?.into_project()
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        ProjectFixture::from_yaml_str(content)?.into_project()
    }
}
