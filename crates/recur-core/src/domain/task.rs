//! Task record as stored by the task service.
//!
//! `date` と `repeat` は保存されたままの文字列で持ちます。
//! 解釈（パース）は使う側でその都度行います。

use serde::{Deserialize, Serialize};

use super::date::CalendarDate;
use super::errors::{DateParseError, RuleError};
use super::rule::RecurrenceRule;

/// A scheduled task. `id` is assigned by storage and may be empty for new tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Anchor date, `YYYYMMDD`. Empty means "today" on creation.
    #[serde(default)]
    pub date: String,

    pub title: String,

    #[serde(default)]
    pub comment: String,

    /// Repeat rule text; empty for one-off tasks.
    #[serde(default)]
    pub repeat: String,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn with_repeat(mut self, repeat: impl Into<String>) -> Self {
        self.repeat = repeat.into();
        self
    }

    pub fn anchor(&self) -> Result<CalendarDate, DateParseError> {
        self.date.parse()
    }

    /// Empty `repeat` yields `RecurrenceRule::None`.
    pub fn rule(&self) -> Result<RecurrenceRule, RuleError> {
        RecurrenceRule::parse_optional(&self.repeat)
    }
}
