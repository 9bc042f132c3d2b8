//! Velocity statistics over completed iterations
//!
//! Iterations arrive most recent first. Velocity and point values are read
//! with host integer coercion, so non-numeric values count as zero.

use super::numbers::to_integer;
use crate::error::{MacroError, Result};
use crate::project::Record;

/// The three most recent iterations
pub fn last_three(iterations: &[Record]) -> &[Record] {
    &iterations[..iterations.len().min(3)]
}

/// Mean velocity; missing values contribute zero.
///
/// An empty slice yields NaN, which [`remaining_iterations`] rejects.
pub fn average_velocity(iterations: &[Record], velocity_key: &str) -> f64 {
    let total: i64 = iterations
        .iter()
        .filter_map(|iter| iter.get(velocity_key))
        .map(|value| to_integer(Some(value)))
        .sum();
    total as f64 / iterations.len() as f64
}

/// Highest velocity, never below 1
pub fn best_velocity(iterations: &[Record], velocity_key: &str) -> f64 {
    iterations.iter().fold(1, |best, iter| match iter.get(velocity_key) {
        Some(value) if to_integer(Some(value)) > best => to_integer(Some(value)),
        _ => best,
    }) as f64
}

/// Lowest positive velocity, starting from the best one
pub fn worst_velocity(iterations: &[Record], velocity_key: &str) -> f64 {
    let best = best_velocity(iterations, velocity_key) as i64;
    iterations.iter().fold(best, |worst, iter| {
        let velocity = to_integer(iter.get(velocity_key));
        if velocity < worst && velocity > 0 {
            velocity
        } else {
            worst
        }
    }) as f64
}

/// Sum of story points over stories that have a value
pub fn story_points(stories: &[Record], points_key: &str) -> i64 {
    stories
        .iter()
        .filter_map(|story| story.get(points_key))
        .map(|value| to_integer(Some(value)))
        .sum()
}

/// Whole iterations needed to burn `remaining_points` at `velocity`
pub fn remaining_iterations(velocity: f64, remaining_points: i64) -> Result<i64> {
    let quotient = remaining_points as f64 / velocity;
    if !quotient.is_finite() {
        return Err(MacroError::calculation(format!(
            "cannot project {} remaining points at a velocity of {}",
            remaining_points, velocity
        )));
    }
    Ok(quotient.ceil() as i64)
}
