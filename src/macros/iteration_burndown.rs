//! Burndown chart for a single iteration

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::context::MacroContext;
use super::Macro;
use crate::chart::{LineChart, Series};
use crate::error::helpers::common;
use crate::error::{ErrorCode, MacroError, Result};
use crate::metrics::{
    card_name, iteration_number, parse_date, story_points, to_integer, weekday_labels,
    weekdays_between, Burndown,
};
use crate::params::{key_for, ParameterResolver};
use crate::project::{ProjectQuery, Query, Record, CURRENT_ITERATION};
use crate::render::{templates, MarkupRenderer};

const IDEAL_COLOR: &str = "00FF00";
const ACTUAL_COLOR: &str = "FF0000";

#[derive(Serialize)]
struct BurndownView {
    number: u32,
    weekdays: String,
    total_points: i64,
    remaining_points: i64,
    chart_url: String,
}

pub struct IterationBurndown<'a> {
    project: &'a dyn ProjectQuery,
    resolver: ParameterResolver<'a>,
    renderer: MarkupRenderer,
}

impl<'a> IterationBurndown<'a> {
    pub fn new(ctx: &MacroContext<'a>) -> Result<Self> {
        let project = ctx.project;
        let resolver = ParameterResolver::builder()
            .supplier("iteration", move || project.project_variable(CURRENT_ITERATION))
            .identity("start_date")
            .identity("end_date")
            .identity("date_accepted")
            .identity("story_points")
            .alias("estimate", "story_points")
            .build(ctx.parameters.clone())?;

        Ok(Self {
            project,
            resolver,
            renderer: MarkupRenderer::new()?,
        })
    }

    /// Number and name of the iteration to chart
    fn iteration(&self) -> Result<(u32, String)> {
        let reference = self.resolver.get("iteration_parameter")?;
        let number = iteration_number(&reference).ok_or_else(|| {
            MacroError::parse(
                ErrorCode::PARSE_INVALID_NUMBER,
                format!("'{}' does not name a numbered iteration", reference),
            )
        })?;
        let name = card_name(&reference).unwrap_or(&reference).to_string();
        Ok((number, name))
    }

    /// Compute both burndown lines for the resolved iteration
    pub fn burndown(&self) -> Result<Burndown> {
        let (number, name) = self.iteration()?;
        self.burndown_of(number, &name)
    }

    fn burndown_of(&self, number: u32, name: &str) -> Result<Burndown> {
        let (start, end) = self.date_range(number)?;
        let stories = self.stories(name)?;

        let points_key = key_for(&self.resolver.get("estimate_field")?);
        let accepted_key = key_for(&self.resolver.get("date_accepted_field")?);

        let total = story_points(&stories, &points_key);
        let mut accepted = Vec::new();
        for story in &stories {
            if let Some(date) = story.get(&accepted_key) {
                accepted.push((parse_date(date)?, to_integer(story.get(&points_key))));
            }
        }

        let burndown = Burndown::compute(
            weekdays_between(start, end),
            total,
            &accepted,
            self.project.today(),
        );
        debug!(
            iteration = number,
            total,
            days = burndown.days.len(),
            "computed burndown"
        );
        Ok(burndown)
    }

    fn date_range(&self, number: u32) -> Result<(NaiveDate, NaiveDate)> {
        let fetch = || -> Result<(NaiveDate, NaiveDate)> {
            let start_field = self.resolver.get("start_date_field")?;
            let end_field = self.resolver.get("end_date_field")?;
            let query = Query::select([start_field.clone(), end_field.clone()])
                .card_type("iteration")
                .where_number("Number", number);

            let rows = self.project.execute(&query)?;
            let row = rows.first().ok_or_else(|| {
                common::no_rows(format!("#{} is not a valid iteration", number), "iteration")
            })?;
            Ok((
                parse_date(row.require(&key_for(&start_field))?)?,
                parse_date(row.require(&key_for(&end_field))?)?,
            ))
        };

        fetch().map_err(|e| {
            e.map_message(|inner| format!("error getting data for iteration {}: {}", number, inner))
        })
    }

    fn stories(&self, iteration: &str) -> Result<Vec<Record>> {
        let fetch = || -> Result<Vec<Record>> {
            let query = Query::select([
                self.resolver.get("estimate_field")?,
                self.resolver.get("date_accepted_field")?,
            ])
            .card_type("story")
            .where_eq("iteration", iteration);
            self.project.execute(&query)
        };

        fetch().map_err(|e| {
            e.map_message(|inner| {
                format!(
                    "[error retrieving story info for iteration '{}': {}]",
                    iteration, inner
                )
            })
        })
    }
}

/// Chart with the ideal line in green and the actual line in red
pub fn burndown_chart(burndown: &Burndown) -> LineChart {
    let labels = burndown
        .days
        .iter()
        .map(|day| weekday_labels(std::slice::from_ref(day)))
        .collect();
    let actual = burndown.actual.iter().map(|points| *points as f64).collect();

    LineChart::new("Iteration Burndown")
        .series(Series::indexed("Ideal Line", IDEAL_COLOR, burndown.ideal.clone()))
        .series(Series::indexed("Burndown", ACTUAL_COLOR, actual))
        .x_labels(labels)
        .y_range(burndown.max_points() as f64, 1.0)
}

impl Macro for IterationBurndown<'_> {
    fn name(&self) -> &'static str {
        "iteration_burndown"
    }

    fn title(&self) -> &'static str {
        "Iteration Burndown"
    }

    fn resolver(&self) -> &ParameterResolver<'_> {
        &self.resolver
    }

    fn renderer(&self) -> &MarkupRenderer {
        &self.renderer
    }

    fn compute(&self) -> Result<String> {
        let (number, name) = self.iteration()?;
        let burndown = self.burndown_of(number, &name)?;

        let view = BurndownView {
            number,
            weekdays: weekday_labels(&burndown.days),
            total_points: burndown.total_points,
            remaining_points: burndown
                .actual
                .last()
                .copied()
                .unwrap_or(burndown.total_points),
            chart_url: burndown_chart(&burndown).url(),
        };
        self.renderer.render(templates::ITERATION_BURNDOWN, &view)
    }
}
