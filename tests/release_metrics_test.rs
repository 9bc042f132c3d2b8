//! Release metrics against the shared Release 1 fixture

mod common;

use chrono::NaiveDate;
use std::collections::HashMap;
use tracker_macros::macros::{CurrentUser, Macro, MacroContext, MacroKind, ReleaseMetrics};
use tracker_macros::params::ParameterOverrides;
use tracker_macros::project::InMemoryProject;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn params(pairs: &[(&str, &str)]) -> ParameterOverrides {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn run(project: &InMemoryProject, parameters: &ParameterOverrides) -> String {
    let user = CurrentUser::from_login("alice");
    let ctx = MacroContext::new(parameters, project, &user);
    let block = MacroKind::ReleaseMetrics.build(&ctx).unwrap().execute();
    block
}

#[test]
fn test_report_numbers() {
    let project = common::project();
    let parameters = HashMap::new();
    let user = CurrentUser::from_login("alice");
    let ctx = MacroContext::new(&parameters, &project, &user);

    let report = ReleaseMetrics::new(&ctx).unwrap().report().unwrap();

    assert_eq!(report.release, "#1 Release 1");
    assert_eq!(report.iteration, "#6 Iteration 6");
    assert_eq!(report.completed_iterations, 5);
    assert_eq!(report.remaining_story_points, 19);
    assert_eq!(report.last_end_date, date(2011, 7, 10));
    assert_eq!(report.iteration_length, 7);

    assert!((report.recent.velocity - 26.0 / 3.0).abs() < 1e-9);
    assert_eq!(report.recent.iterations, 3);
    assert_eq!(report.recent.end_date, date(2011, 7, 30));

    assert_eq!(report.overall.velocity, 10.0);
    assert_eq!(report.overall.iterations, 2);
    assert_eq!(report.overall.end_date, date(2011, 7, 23));

    assert_eq!(report.best.velocity, 14.0);
    assert_eq!(report.best.iterations, 2);
    assert_eq!(report.best.end_date, date(2011, 7, 23));

    assert_eq!(report.worst.velocity, 6.0);
    assert_eq!(report.worst.iterations, 4);
    assert_eq!(report.worst.end_date, date(2011, 8, 6));
}

#[test]
fn test_rendered_table() {
    let project = common::project();
    let block = run(&project, &HashMap::new());

    assert!(block.starts_with("h2. Metrics for #1 Release 1\n"));
    assert!(block.contains(
        "|_. Current Iteration | #6 Iteration 6 |_. %{color:#EEEEEE}-% |_. Estimated Completion <br> of #1 Release 1 <br> Based on ... |_. Required <br> Iterations |_. Calculated End Date <br> Based on 7 Day Iterations |"
    ));
    assert!(block.contains(
        "|_. Average Velocity <br> (last 3 iterations) | 8.67 |_. %{color:#EEEEEE}-% | Average velocity of <br> last 3 iterations (8.67) | 3 | 2011-07-30 |"
    ));
    assert!(block.contains("|_. Completed Iterations | 5 |"));
    assert!(block.contains("| Average velocity of <br> all iterations (10.00) | 2 | 2011-07-23 |"));
    assert!(block.contains("in a past iteration) | 19 |"));
    assert!(block.contains("| Best velocity (14.0) | 2 | 2011-07-23 |"));
    assert!(block.contains("last iteration completed) | 7 days |"));
    assert!(block.contains("| Worst velocity (6.0) | 4 | 2011-08-06 |"));
}

#[test]
fn test_issues_expected_queries() {
    let project = common::project();
    run(&project, &HashMap::new());

    assert_eq!(
        project.executed_queries(),
        vec![
            "SELECT name, 'Start Date', 'End Date', Velocity WHERE Type = iteration \
             AND 'End Date' < today AND release = 'Release 1' ORDER BY 'End Date' desc"
                .to_string(),
            "SELECT 'Story Points' WHERE Type = story AND release = 'Release 1' AND NOT \
             iteration in ('Iteration 5','Iteration 4','Iteration 3','Iteration 2','Iteration 1')"
                .to_string(),
        ]
    );
}

#[test]
fn test_invalid_release_renders_error_block() {
    let project = common::project();
    let block = run(&project, &params(&[("release", "#9 Release 9")]));

    assert_eq!(
        block,
        "h2. Release Metrics:\n\n\"An Error occurred: [error retrieving completed iterations \
         for #9 Release 9: #9 Release 9 is not a valid release]\"\n"
    );
}

#[test]
fn test_query_failure_is_wrapped() {
    let project = common::project().failing_with("connection reset");
    let block = run(&project, &HashMap::new());

    assert!(block.contains(
        "An Error occurred: [error retrieving completed iterations for #1 Release 1: connection reset]"
    ));
}

#[test]
fn test_story_query_failure_is_wrapped() {
    let project = common::project().failing_from(2, "host gone");
    let block = run(&project, &HashMap::new());

    assert_eq!(
        block,
        "h2. Release Metrics:\n\n\"An Error occurred: \
         [error retrieving stories for release '#1 Release 1': host gone]\"\n"
    );
    assert_eq!(project.executed_queries().len(), 2);
}

#[test]
fn test_overridden_field_names_flow_into_query() {
    let project = common::project();
    let block = run(&project, &params(&[("velocity", "actual_velocity")]));

    let first = &project.executed_queries()[0];
    assert!(first.starts_with("SELECT name, 'Start Date', 'End Date', 'Actual Velocity' WHERE"));
    // no card carries that column, so every velocity reads as zero
    assert_eq!(
        block,
        "h2. Release Metrics:\n\n\"An Error occurred: cannot project 19 remaining points \
         at a velocity of 0\"\n"
    );
}

#[test]
fn test_missing_release_variable() {
    let project = InMemoryProject::new(date(2011, 7, 15));
    let block = run(&project, &HashMap::new());

    assert!(block.contains("project variable 'Current Release' is not defined"));
    assert!(project.executed_queries().is_empty());
}
