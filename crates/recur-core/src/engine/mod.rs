//! Recurrence engine: calendar helpers and the next-occurrence calculator.

pub mod calendar;
pub mod next;

pub use next::{SEARCH_HORIZON_DAYS, next_occurrence};
