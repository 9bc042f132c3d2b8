//! Report macros
//!
//! A macro is built from a [`MacroContext`], computes its metrics through a
//! [`ParameterResolver`] and a project, and renders a markup block.
//! [`Macro::execute`] never fails: errors become an error block.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::{ErrorCode, MacroError, Result};
use crate::params::ParameterResolver;
use crate::render::MarkupRenderer;

pub mod context;
pub mod iteration_burndown;
pub mod release_metrics;
pub mod what_if;

pub use context::{CurrentUser, MacroContext};
pub use iteration_burndown::IterationBurndown;
pub use release_metrics::{Projection, ReleaseMetrics, ReleaseReport};
pub use what_if::{WhatIf, WhatIfInputs};

pub trait Macro {
    fn name(&self) -> &'static str;

    /// Heading of the error block
    fn title(&self) -> &'static str;

    fn resolver(&self) -> &ParameterResolver<'_>;

    fn renderer(&self) -> &MarkupRenderer;

    /// Compute and render, propagating any failure
    fn compute(&self) -> Result<String>;

    /// Compute and render; a failure is logged and rendered as an error block
    fn execute(&self) -> String {
        match self.compute() {
            Ok(block) => {
                debug!(macro_name = self.name(), bytes = block.len(), "macro rendered");
                block
            }
            Err(e) => {
                warn!(
                    macro_name = self.name(),
                    code = e.code(),
                    error = %e,
                    "macro failed, rendering error block"
                );
                self.renderer().render_error(self.title(), &e)
            }
        }
    }

    fn can_be_cached(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacroKind {
    ReleaseMetrics,
    IterationBurndown,
    WhatIf,
}

impl MacroKind {
    pub const ALL: [MacroKind; 3] = [
        MacroKind::ReleaseMetrics,
        MacroKind::IterationBurndown,
        MacroKind::WhatIf,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MacroKind::ReleaseMetrics => "release_metrics",
            MacroKind::IterationBurndown => "iteration_burndown",
            MacroKind::WhatIf => "what_if",
        }
    }

    pub fn build<'a>(&self, ctx: &MacroContext<'a>) -> Result<Box<dyn Macro + 'a>> {
        debug!(kind = self.name(), user = %ctx.user.login, "building macro");
        Ok(match self {
            MacroKind::ReleaseMetrics => Box::new(ReleaseMetrics::new(ctx)?),
            MacroKind::IterationBurndown => Box::new(IterationBurndown::new(ctx)?),
            MacroKind::WhatIf => Box::new(WhatIf::new(ctx)?),
        })
    }
}

impl fmt::Display for MacroKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MacroKind {
    type Err = MacroError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        MacroKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| {
                MacroError::validation_with_code(
                    ErrorCode::VALIDATION_UNKNOWN_MACRO,
                    format!(
                        "unknown macro '{}', expected one of: {}",
                        s,
                        MacroKind::ALL.map(|kind| kind.name()).join(", ")
                    ),
                    Some("macro".to_string()),
                )
            })
    }
}
