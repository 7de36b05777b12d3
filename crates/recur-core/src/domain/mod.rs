//! Domain model (dates, repeat rules, tasks, errors).
//!
//! ここには副作用のない型だけを置きます。

pub mod date;
pub mod errors;
pub mod rule;
pub mod task;

pub use date::CalendarDate;
pub use errors::{
    CalcError, DateParseError, ErrorKind, MonthRuleField, NextDateError, RuleError, TaskError,
};
pub use rule::{DaySelector, MAX_DAY_INTERVAL, RecurrenceRule};
pub use task::Task;
