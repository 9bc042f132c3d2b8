//! Interactive "what if the velocity were X" calculator
//!
//! Renders a table with a velocity input and a script that projects the end
//! date in the browser. When a `velocity` parameter is passed, the same
//! projection is also done here and shown pre-filled.

use chrono::NaiveDate;
use serde::Serialize;

use super::context::MacroContext;
use super::Macro;
use crate::error::{ErrorCode, MacroError, Result};
use crate::metrics::{add_days, parse_date};
use crate::params::ParameterResolver;
use crate::render::{templates, MarkupRenderer};

pub const DEFAULT_REMAINING_STORY_POINTS: &str = "50";
pub const DEFAULT_LAST_ITERATION_END_DATE: &str = "2011-07-04";
pub const DEFAULT_ITERATION_LENGTH: &str = "7";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhatIfInputs {
    pub remaining_story_points: i64,
    pub last_iteration_end_date: NaiveDate,
    pub iteration_length: i64,
    pub velocity: Option<f64>,
}

impl WhatIfInputs {
    /// End date at `velocity`, in whole days past the last iteration
    ///
    /// Iterations needed are computed before scaling by the iteration length,
    /// in the same order as the browser-side calculation.
    pub fn projected_end_date(&self, velocity: f64) -> Result<NaiveDate> {
        let iterations = self.remaining_story_points as f64 / velocity;
        let days = (self.iteration_length as f64 * iterations).floor();
        if !days.is_finite() {
            return Err(MacroError::calculation(format!(
                "cannot project {} remaining points at a velocity of {}",
                self.remaining_story_points, velocity
            )));
        }
        add_days(self.last_iteration_end_date, Some(days as i64))
    }
}

#[derive(Serialize)]
struct WhatIfView {
    remaining_story_points: i64,
    iteration_length: i64,
    last_iteration_end_date: String,
    velocity: Option<String>,
    projected_end_date: Option<String>,
}

pub struct WhatIf<'a> {
    resolver: ParameterResolver<'a>,
    renderer: MarkupRenderer,
}

impl<'a> WhatIf<'a> {
    pub fn new(ctx: &MacroContext<'a>) -> Result<Self> {
        let resolver = ParameterResolver::builder()
            .literal("remaining_story_points", DEFAULT_REMAINING_STORY_POINTS)
            .literal("last_iteration_end_date", DEFAULT_LAST_ITERATION_END_DATE)
            .literal("iteration_length", DEFAULT_ITERATION_LENGTH)
            .build(ctx.parameters.clone())?;

        Ok(Self {
            resolver,
            renderer: MarkupRenderer::new()?,
        })
    }

    pub fn inputs(&self) -> Result<WhatIfInputs> {
        let velocity = if self.resolver.has_override("velocity") {
            Some(parse_number::<f64>(
                "velocity",
                &self.resolver.get("velocity_parameter")?,
            )?)
        } else {
            None
        };

        Ok(WhatIfInputs {
            remaining_story_points: parse_number(
                "remaining_story_points",
                &self.resolver.get("remaining_story_points_parameter")?,
            )?,
            last_iteration_end_date: parse_date(
                &self.resolver.get("last_iteration_end_date_parameter")?,
            )?,
            iteration_length: parse_number(
                "iteration_length",
                &self.resolver.get("iteration_length_type")?,
            )?,
            velocity,
        })
    }
}

fn parse_number<T: std::str::FromStr>(metric: &str, text: &str) -> Result<T> {
    text.trim().parse().map_err(|_| {
        MacroError::parse(
            ErrorCode::PARSE_INVALID_NUMBER,
            format!("{} must be a number, got '{}'", metric, text),
        )
    })
}

impl Macro for WhatIf<'_> {
    fn name(&self) -> &'static str {
        "what_if"
    }

    fn title(&self) -> &'static str {
        "What-If Calculator"
    }

    fn resolver(&self) -> &ParameterResolver<'_> {
        &self.resolver
    }

    fn renderer(&self) -> &MarkupRenderer {
        &self.renderer
    }

    fn compute(&self) -> Result<String> {
        let inputs = self.inputs()?;
        let projected_end_date = inputs
            .velocity
            .map(|velocity| inputs.projected_end_date(velocity))
            .transpose()?;

        let view = WhatIfView {
            remaining_story_points: inputs.remaining_story_points,
            iteration_length: inputs.iteration_length,
            last_iteration_end_date: inputs.last_iteration_end_date.to_string(),
            velocity: inputs.velocity.map(|v| v.to_string()),
            projected_end_date: projected_end_date.map(|date| date.to_string()),
        };
        self.renderer.render(templates::WHAT_IF, &view)
    }
}
