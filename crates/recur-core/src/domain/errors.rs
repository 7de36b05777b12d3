//! Errors - エラー型と分類
//!
//! どのエラーも呼び出し元にそのまま返します（ログ出力・リトライ・既定値での置き換えはしない）。
//! 呼び出し側はエラーを `ErrorKind` で分類して、自分の表現（HTTP 400 など）に写像します。

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// ErrorKind はエラーの分類
///
/// 表現ではなく種類だけを表します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidDateFormat,
    MissingParameter,
    EmptyRule,
    UnsupportedRule,
    InvalidDayCount,
    InvalidWeekday,
    InvalidMonthRule,
    SearchExhausted,
    DateOverflow,
    MissingTitle,
}

/// A string that is not a valid date in the expected textual form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date {value:?}")]
pub struct DateParseError {
    value: String,
}

impl DateParseError {
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Which part of a monthly rule (`m <days> [<months>]`) was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthRuleField {
    Days,
    Months,
    TrailingInput,
}

impl fmt::Display for MonthRuleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MonthRuleField::Days => "day of month",
            MonthRuleField::Months => "month",
            MonthRuleField::TrailingInput => "trailing input",
        };
        f.write_str(s)
    }
}

/// Rule text could not be decoded into a `RecurrenceRule`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("repeat rule is empty")]
    EmptyRule,

    #[error("unsupported repeat rule {0:?}")]
    UnsupportedRule(String),

    #[error("invalid day count {value:?}: expected an integer in 1..=400")]
    InvalidDayCount { value: String },

    #[error("invalid weekday {value:?}: expected integers in 1..=7")]
    InvalidWeekday { value: String },

    #[error("invalid {field} {value:?} in monthly rule")]
    InvalidMonthRule { field: MonthRuleField, value: String },
}

impl RuleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RuleError::EmptyRule => ErrorKind::EmptyRule,
            RuleError::UnsupportedRule(_) => ErrorKind::UnsupportedRule,
            RuleError::InvalidDayCount { .. } => ErrorKind::InvalidDayCount,
            RuleError::InvalidWeekday { .. } => ErrorKind::InvalidWeekday,
            RuleError::InvalidMonthRule { .. } => ErrorKind::InvalidMonthRule,
        }
    }
}

/// The calculator could not produce a next occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("no matching date within {horizon_days} days")]
    SearchExhausted { horizon_days: u64 },

    #[error("rule does not recur")]
    UnsupportedRule,

    #[error("next occurrence is outside the representable date range")]
    DateOverflow,
}

impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::SearchExhausted { .. } => ErrorKind::SearchExhausted,
            CalcError::UnsupportedRule => ErrorKind::UnsupportedRule,
            CalcError::DateOverflow => ErrorKind::DateOverflow,
        }
    }
}

/// Failure of the string-level `next_date` boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NextDateError {
    #[error("missing parameter {0:?}")]
    MissingParameter(&'static str),

    #[error("parameter {field:?}: {source}")]
    InvalidDateFormat {
        field: &'static str,
        #[source]
        source: DateParseError,
    },

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    Calc(#[from] CalcError),
}

impl NextDateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NextDateError::MissingParameter(_) => ErrorKind::MissingParameter,
            NextDateError::InvalidDateFormat { .. } => ErrorKind::InvalidDateFormat,
            NextDateError::Rule(e) => e.kind(),
            NextDateError::Calc(e) => e.kind(),
        }
    }
}

/// A task record was rejected by a scheduling policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("task title is empty")]
    MissingTitle,

    #[error(transparent)]
    InvalidDate(#[from] DateParseError),

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    Calc(#[from] CalcError),
}

impl TaskError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TaskError::MissingTitle => ErrorKind::MissingTitle,
            TaskError::InvalidDate(_) => ErrorKind::InvalidDateFormat,
            TaskError::Rule(e) => e.kind(),
            TaskError::Calc(e) => e.kind(),
        }
    }
}
