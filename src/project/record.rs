use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::helpers::common;
use crate::error::Result;

/// One row returned by a project query.
///
/// Keys are snake_case column keys (`start_date`); a `None` value is a
/// column the host returned without a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    values: BTreeMap<String, Option<String>>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), Some(value.into()));
        self
    }

    pub fn with_optional(mut self, key: impl Into<String>, value: Option<String>) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        self.values.insert(key.into(), value);
    }

    /// Value of `key`, or `None` when the column is absent or empty
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|v| v.as_deref())
    }

    /// Value of `key`, failing with a query error when it has none
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| common::missing_column(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
