//! Iteration burndown against the shared fixture

mod common;

use chrono::NaiveDate;
use std::collections::HashMap;
use tracker_macros::macros::iteration_burndown::burndown_chart;
use tracker_macros::macros::{CurrentUser, IterationBurndown, MacroContext, MacroKind};
use tracker_macros::params::ParameterOverrides;
use tracker_macros::project::InMemoryProject;

fn params(pairs: &[(&str, &str)]) -> ParameterOverrides {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn run(project: &InMemoryProject, parameters: &ParameterOverrides) -> String {
    let user = CurrentUser::from_login("bob");
    let ctx = MacroContext::new(parameters, project, &user);
    let block = MacroKind::IterationBurndown.build(&ctx).unwrap().execute();
    block
}

#[test]
fn test_burndown_lines() {
    let project = common::project();
    let parameters = HashMap::new();
    let user = CurrentUser::from_login("bob");
    let ctx = MacroContext::new(&parameters, &project, &user);

    let burndown = IterationBurndown::new(&ctx).unwrap().burndown().unwrap();

    let first = NaiveDate::from_ymd_opt(2011, 7, 11).unwrap();
    assert_eq!(burndown.days.len(), 5);
    assert_eq!(burndown.days[0], first);
    assert_eq!(burndown.total_points, 11);
    assert_eq!(burndown.ideal, vec![11.0, 8.25, 5.5, 2.75, 0.0]);
    assert_eq!(burndown.actual, vec![11, 6, 6, 3, 3]);

    let url = burndown_chart(&burndown).url();
    assert!(url.contains("chd=t:0,1,2,3,4|11,8.25,5.5,2.75,0|0,1,2,3,4|11,6,6,3,3"));
    assert!(url.contains("chxr=1,0,11,1"));
    assert!(url.ends_with("chxl=0:|7-11|7-12|7-13|7-14|7-15"));
}

#[test]
fn test_rendered_block() {
    let project = common::project();
    let block = run(&project, &HashMap::new());

    assert!(block.starts_with("h2. Iteration #6 Burndown:\n"));
    assert!(block.contains("weekdays = 7-11|7-12|7-13|7-14|7-15 <br>"));
    assert!(block.contains("total story points 11 <br>"));
    assert!(block.contains("remaining story points 3 <br>"));
    assert!(block.contains("<img src='https://chart.googleapis.com/chart?cht=lxy&chs=600x400"));
}

#[test]
fn test_issues_expected_queries() {
    let project = common::project();
    run(&project, &HashMap::new());

    assert_eq!(
        project.executed_queries(),
        vec![
            "SELECT 'Start Date', 'End Date' WHERE Type = iteration AND Number = 6".to_string(),
            "SELECT 'Story Points', 'Date Accepted' WHERE Type = story AND iteration = 'Iteration 6'"
                .to_string(),
        ]
    );
}

#[test]
fn test_estimate_and_acceptance_overrides() {
    let project = common::project();
    run(
        &project,
        &params(&[
            ("story_points", "planning_estimate"),
            ("date_accepted", "accepted_on"),
        ]),
    );

    assert_eq!(
        project.executed_queries()[1],
        "SELECT 'Planning Estimate', 'Accepted On' WHERE Type = story AND iteration = 'Iteration 6'"
    );
}

#[test]
fn test_unknown_iteration() {
    let project = common::project();
    let block = run(&project, &params(&[("iteration", "#42 Iteration 42")]));

    assert_eq!(
        block,
        "h2. Iteration Burndown:\n\n\"An Error occurred: error getting data for iteration 42: \
         #42 is not a valid iteration\"\n"
    );
}

#[test]
fn test_unnumbered_iteration() {
    let project = common::project();
    let block = run(&project, &params(&[("iteration", "Backlog")]));

    assert!(block.contains("'Backlog' does not name a numbered iteration"));
    assert!(project.executed_queries().is_empty());
}

#[test]
fn test_query_failure_is_wrapped() {
    let project = common::project().failing_with("timeout");
    let block = run(&project, &HashMap::new());

    // the date-range query fails first
    assert!(block.contains("error getting data for iteration 6: timeout"));
}

#[test]
fn test_story_query_failure_is_wrapped() {
    let project = common::project().failing_from(2, "host gone");
    let block = run(&project, &HashMap::new());

    assert_eq!(
        block,
        "h2. Iteration Burndown:\n\n\"An Error occurred: \
         [error retrieving story info for iteration 'Iteration 6': host gone]\"\n"
    );
}
