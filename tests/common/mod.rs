//! Common test utilities and fixtures

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use tracker_macros::project::InMemoryProject;

/// Release 1 with five completed iterations and one in progress.
///
/// Today is Friday 2011-07-15; Iteration 6 runs Monday 07-11 to Sunday 07-17.
pub const PROJECT_YAML: &str = r##"
today: 2011-07-15
variables:
  Current Release: "#1 Release 1"
  Current Iteration: "#6 Iteration 6"
cards:
  - { type: iteration, name: Iteration 1, Number: 1, release: Release 1, Start Date: 2011-06-06, End Date: 2011-06-12, Velocity: 10 }
  - { type: iteration, name: Iteration 2, Number: 2, release: Release 1, Start Date: 2011-06-13, End Date: 2011-06-19, Velocity: 14 }
  - { type: iteration, name: Iteration 3, Number: 3, release: Release 1, Start Date: 2011-06-20, End Date: 2011-06-26, Velocity: 6 }
  - { type: iteration, name: Iteration 4, Number: 4, release: Release 1, Start Date: 2011-06-27, End Date: 2011-07-03, Velocity: 12 }
  - { type: iteration, name: Iteration 5, Number: 5, release: Release 1, Start Date: 2011-07-04, End Date: 2011-07-10, Velocity: 8 }
  - { type: iteration, name: Iteration 6, Number: 6, release: Release 1, Start Date: 2011-07-11, End Date: 2011-07-17, Velocity: ~ }
  - { type: story, name: Login, Story Points: 5, iteration: Iteration 6, release: Release 1, Date Accepted: 2011-07-12 }
  - { type: story, name: Logout, Story Points: 8, release: Release 1 }
  - { type: story, name: Profile, Story Points: 3, iteration: Iteration 6, release: Release 1 }
  - { type: story, name: Spike, Story Points: ~, release: Release 1 }
  - { type: story, name: Search, Story Points: 13, iteration: Iteration 2, release: Release 1, Date Accepted: 2011-06-17 }
  - { type: story, name: Billing, Story Points: 20, release: Release 2 }
  - { type: story, name: Avatar, Story Points: 3, iteration: Iteration 6, release: Release 1, Date Accepted: 2011-07-14 }
"##;

pub fn project() -> InMemoryProject {
    InMemoryProject::from_yaml_str(PROJECT_YAML).expect("fixture parses")
}

/// Temporary directory holding fixture and run files for CLI tests
pub struct FixtureDir {
    temp_dir: TempDir,
}

impl FixtureDir {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `name` inside the directory
    pub fn write(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn with_project(self) -> Result<Self> {
        self.write("project.yaml", PROJECT_YAML)?;
        Ok(self)
    }

    pub fn project_path(&self) -> PathBuf {
        self.temp_dir.path().join("project.yaml")
    }
}
