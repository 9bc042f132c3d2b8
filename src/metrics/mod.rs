//! Velocity, burndown and projection arithmetic
//!
//! Everything here is a pure function over records and dates; the macros
//! do the querying and call into these.

pub mod burndown;
pub mod dates;
pub mod naming;
pub mod numbers;
pub mod velocity;

pub use burndown::{ideal_line, Burndown};
pub use dates::{
    add_days, expected_completion_date, iteration_length_in_days, parse_date, weekday_labels,
    weekdays_between, WEEKDAYS,
};
pub use naming::{card_name, card_number, iteration_number, release_name, release_number};
pub use numbers::to_integer;
pub use velocity::{
    average_velocity, best_velocity, last_three, remaining_iterations, story_points,
    worst_velocity,
};
