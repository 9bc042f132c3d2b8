//! Ideal and actual burndown lines for one iteration

use chrono::NaiveDate;
use serde::Serialize;

/// Remaining points per working day of an iteration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Burndown {
    pub days: Vec<NaiveDate>,
    pub total_points: i64,
    /// One value per day in `days`
    pub ideal: Vec<f64>,
    /// One value per day up to and including today
    pub actual: Vec<i64>,
}

impl Burndown {
    /// Build both lines.
    ///
    /// `accepted` holds the acceptance date and points of each accepted
    /// story; stories that were never accepted are simply absent.
    pub fn compute(
        days: Vec<NaiveDate>,
        total_points: i64,
        accepted: &[(NaiveDate, i64)],
        today: NaiveDate,
    ) -> Self {
        let ideal = ideal_line(total_points, days.len());
        let actual = days
            .iter()
            .take_while(|day| **day <= today)
            .map(|day| total_points - points_accepted_by(accepted, *day))
            .collect();

        Self {
            days,
            total_points,
            ideal,
            actual,
        }
    }

    /// Largest value on either line, for the chart's y range
    pub fn max_points(&self) -> i64 {
        let actual_max = self.actual.iter().copied().max().unwrap_or(0);
        self.total_points.max(actual_max)
    }
}

/// Straight line from `total` on the first day to zero on the last
pub fn ideal_line(total: i64, day_count: usize) -> Vec<f64> {
    match day_count {
        0 => Vec::new(),
        1 => vec![0.0],
        n => {
            let step = total as f64 / (n - 1) as f64;
            (0..n)
                .map(|i| total as f64 - step * i as f64)
                .collect()
        }
    }
}

fn points_accepted_by(accepted: &[(NaiveDate, i64)], day: NaiveDate) -> i64 {
    accepted
        .iter()
        .filter(|(accepted_on, _)| *accepted_on <= day)
        .map(|(_, points)| points)
        .sum()
}
