use serde::{Deserialize, Serialize};

use crate::params::ParameterOverrides;
use crate::project::ProjectQuery;

/// The user a macro is rendered for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub login: String,
    pub name: String,
}

impl CurrentUser {
    pub fn new(login: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            name: name.into(),
        }
    }

    /// User whose display name is their login
    pub fn from_login(login: impl Into<String>) -> Self {
        let login = login.into();
        Self {
            name: login.clone(),
            login,
        }
    }
}

/// Everything a macro receives from its host
#[derive(Clone, Copy)]
pub struct MacroContext<'a> {
    pub parameters: &'a ParameterOverrides,
    pub project: &'a dyn ProjectQuery,
    pub user: &'a CurrentUser,
}

impl<'a> MacroContext<'a> {
    pub fn new(
        parameters: &'a ParameterOverrides,
        project: &'a dyn ProjectQuery,
        user: &'a CurrentUser,
    ) -> Self {
        Self {
            parameters,
            project,
            user,
        }
    }
}
