//! Release velocity and completion projections
//!
//! Looks at the completed iterations of a release and projects when its
//! remaining stories finish at four different velocities.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::context::MacroContext;
use super::Macro;
use crate::error::helpers::common;
use crate::error::Result;
use crate::metrics::{
    average_velocity, best_velocity, expected_completion_date, iteration_length_in_days,
    last_three, parse_date, release_name, remaining_iterations, story_points, worst_velocity,
};
use crate::params::{key_for, ParameterResolver};
use crate::project::{ProjectQuery, Query, Record, CURRENT_ITERATION, CURRENT_RELEASE};
use crate::render::{templates, MarkupRenderer};

/// Required iterations and end date at one velocity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub velocity: f64,
    pub iterations: i64,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseReport {
    pub release: String,
    pub iteration: String,
    pub completed_iterations: usize,
    pub remaining_story_points: i64,
    pub last_end_date: NaiveDate,
    pub iteration_length: i64,
    /// Average of the last three completed iterations
    pub recent: Projection,
    /// Average of every completed iteration
    pub overall: Projection,
    pub best: Projection,
    pub worst: Projection,
}

#[derive(Serialize)]
struct ProjectionView {
    velocity: String,
    iterations: i64,
    end_date: String,
}

#[derive(Serialize)]
struct ReleaseView<'r> {
    release: &'r str,
    iteration: &'r str,
    completed_iterations: usize,
    remaining_story_points: i64,
    iteration_length: i64,
    recent: ProjectionView,
    overall: ProjectionView,
    best: ProjectionView,
    worst: ProjectionView,
}

impl ProjectionView {
    fn averaged(projection: &Projection) -> Self {
        Self::formatted(projection, format!("{:.2}", projection.velocity))
    }

    fn whole(projection: &Projection) -> Self {
        Self::formatted(projection, format!("{:.1}", projection.velocity))
    }

    fn formatted(projection: &Projection, velocity: String) -> Self {
        Self {
            velocity,
            iterations: projection.iterations,
            end_date: projection.end_date.to_string(),
        }
    }
}

pub struct ReleaseMetrics<'a> {
    project: &'a dyn ProjectQuery,
    resolver: ParameterResolver<'a>,
    renderer: MarkupRenderer,
}

impl<'a> ReleaseMetrics<'a> {
    pub fn new(ctx: &MacroContext<'a>) -> Result<Self> {
        let project = ctx.project;
        let resolver = ParameterResolver::builder()
            .supplier("iteration", move || project.project_variable(CURRENT_ITERATION))
            .supplier("release", move || project.project_variable(CURRENT_RELEASE))
            .identity("start_date")
            .identity("end_date")
            .identity("velocity")
            .identity("story_points")
            .build(ctx.parameters.clone())?;

        Ok(Self {
            project,
            resolver,
            renderer: MarkupRenderer::new()?,
        })
    }

    /// Compute every metric without rendering
    pub fn report(&self) -> Result<ReleaseReport> {
        let release = self.resolver.get("release_parameter")?;
        let iterations = self.completed_iterations(&release)?;
        let latest = &iterations[0];

        let velocity_key = key_for(&self.resolver.get("velocity_field")?);
        let start_key = key_for(&self.resolver.get("start_date_field")?);
        let end_key = key_for(&self.resolver.get("end_date_field")?);

        let stories = self.remaining_stories(&release, &iterations)?;
        let points_key = key_for(&self.resolver.get("story_points_field")?);
        let remaining = story_points(&stories, &points_key);

        let last_end_date = parse_date(latest.require(&end_key)?)?;
        let last_start_date = parse_date(latest.require(&start_key)?)?;
        let iteration_length = iteration_length_in_days(last_start_date, last_end_date);

        let projection_at = |velocity: f64| -> Result<Projection> {
            let iterations = remaining_iterations(velocity, remaining)?;
            Ok(Projection {
                velocity,
                iterations,
                end_date: expected_completion_date(last_end_date, iteration_length, iterations)?,
            })
        };

        let report = ReleaseReport {
            iteration: self.resolver.get("iteration_parameter")?,
            completed_iterations: iterations.len(),
            remaining_story_points: remaining,
            last_end_date,
            iteration_length,
            recent: projection_at(average_velocity(last_three(&iterations), &velocity_key))?,
            overall: projection_at(average_velocity(&iterations, &velocity_key))?,
            best: projection_at(best_velocity(&iterations, &velocity_key))?,
            worst: projection_at(worst_velocity(&iterations, &velocity_key))?,
            release,
        };
        debug!(
            release = %report.release,
            remaining = report.remaining_story_points,
            "computed release metrics"
        );
        Ok(report)
    }

    /// Iterations of the release that ended before today, latest first
    fn completed_iterations(&self, release: &str) -> Result<Vec<Record>> {
        let fetch = || -> Result<Vec<Record>> {
            let end_date = self.resolver.get("end_date_field")?;
            let query = Query::select([
                "name".to_string(),
                self.resolver.get("start_date_field")?,
                end_date.clone(),
                self.resolver.get("velocity_field")?,
            ])
            .card_type("iteration")
            .where_before_today(end_date.clone())
            .where_eq("release", release_name(release))
            .order_by_desc(end_date);

            let rows = self.project.execute(&query)?;
            if rows.is_empty() {
                return Err(common::no_rows(
                    format!("{} is not a valid release", release),
                    "release",
                ));
            }
            Ok(rows)
        };

        fetch().map_err(|e| {
            e.map_message(|inner| {
                format!(
                    "[error retrieving completed iterations for {}: {}]",
                    release, inner
                )
            })
        })
    }

    /// Stories of the release not scheduled in a completed iteration
    fn remaining_stories(&self, release: &str, completed: &[Record]) -> Result<Vec<Record>> {
        let names: Vec<&str> = completed.iter().filter_map(|iter| iter.get("name")).collect();
        let fetch = || -> Result<Vec<Record>> {
            let query = Query::select([self.resolver.get("story_points_field")?])
                .card_type("story")
                .where_eq("release", release_name(release))
                .where_not_in("iteration", names.iter().copied());
            self.project.execute(&query)
        };

        fetch().map_err(|e| {
            e.map_message(|inner| {
                format!(
                    "[error retrieving stories for release '{}': {}]",
                    release, inner
                )
            })
        })
    }
}

impl Macro for ReleaseMetrics<'_> {
    fn name(&self) -> &'static str {
        "release_metrics"
    }

    fn title(&self) -> &'static str {
        "Release Metrics"
    }

    fn resolver(&self) -> &ParameterResolver<'_> {
        &self.resolver
    }

    fn renderer(&self) -> &MarkupRenderer {
        &self.renderer
    }

    fn compute(&self) -> Result<String> {
        let report = self.report()?;
        let view = ReleaseView {
            release: &report.release,
            iteration: &report.iteration,
            completed_iterations: report.completed_iterations,
            remaining_story_points: report.remaining_story_points,
            iteration_length: report.iteration_length,
            recent: ProjectionView::averaged(&report.recent),
            overall: ProjectionView::averaged(&report.overall),
            best: ProjectionView::whole(&report.best),
            worst: ProjectionView::whole(&report.worst),
        };
        self.renderer.render(templates::RELEASE_METRICS, &view)
    }
}
