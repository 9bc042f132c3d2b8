//! Project collaborator interface
//!
//! Macros never talk to a host directly. They go through [`ProjectQuery`],
//! which the host implements and tests replace with [`InMemoryProject`].

use chrono::NaiveDate;

use crate::error::Result;

pub mod fixture;
pub mod memory;
pub mod query;
pub mod record;

pub use fixture::ProjectFixture;
pub use memory::InMemoryProject;
pub use query::{Condition, Ordering, Query};
pub use record::Record;

/// Project variable naming the iteration in progress
pub const CURRENT_ITERATION: &str = "Current Iteration";
/// Project variable naming the release in progress
pub const CURRENT_RELEASE: &str = "Current Release";

/// Query access to a project's cards and variables
///
/// A host adapter maps its own failures into [`MacroError`]s:
///
/// ```
/// use std::io;
/// use tracker_macros::error::{ErrorExt, Result};
/// use tracker_macros::project::{ProjectQuery, Query, Record};
///
/// struct HostProject;
///
/// impl HostProject {
///     fn run_mql(&self, _mql: &str) -> io::Result<Vec<Record>> {
///         Err(io::Error::new(io::ErrorKind::TimedOut, "host timed out"))
///     }
/// }
///
/// impl ProjectQuery for HostProject {
///     fn execute(&self, query: &Query) -> Result<Vec<Record>> {
///         self.run_mql(&query.to_string()).to_query_error("host query failed")
///     }
///
///     fn project_variable(&self, name: &str) -> Result<String> {
///         std::env::var(name).to_resolution_error(name)
///     }
/// }
///
/// let err = HostProject.execute(&Query::select(["name"])).unwrap_err();
/// assert_eq!(err.user_message(), "host query failed");
/// ```
///
/// [`MacroError`]: crate::error::MacroError
pub trait ProjectQuery {
    /// Run a filtered fetch; each row is keyed by snake_case column key
    fn execute(&self, query: &Query) -> Result<Vec<Record>>;

    /// Current value of a project-level variable
    fn project_variable(&self, name: &str) -> Result<String>;

    /// The date the host treats as `today` in queries
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}
