//! TaskScheduler - タスク保存前の正規化と「完了」時の扱い
//!
//! # 方針
//! - 日付が空なら今日
//! - 過去の日付: 繰り返しタスクは次の発生日へ、単発タスクは今日へ
//! - 完了: 単発タスクは削除、繰り返しタスクは次の発生日へ移す
//!
//! ストレージには触りません。結果をどう保存するかは呼び出し側が決めます。

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{CalendarDate, RecurrenceRule, Task, TaskError};
use crate::engine::next_occurrence;
use crate::ports::Clock;

/// What the caller should do with a task that was marked done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "task", rename_all = "snake_case")]
pub enum Completion {
    /// One-off task: delete it.
    Remove,

    /// Recurring task: store it with its new date.
    Reschedule(Task),
}

/// Applies the scheduling policies relative to the clock's "today".
pub struct TaskScheduler<C> {
    clock: C,
}

impl<C: Clock> TaskScheduler<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn today(&self) -> CalendarDate {
        self.clock.today()
    }

    /// Normalizes a task before it is created or updated.
    ///
    /// A non-empty repeat rule is always run through the calculator once,
    /// so a rule that can never produce a date is rejected here.
    pub fn prepare(&self, mut task: Task) -> Result<Task, TaskError> {
        if task.title.trim().is_empty() {
            return Err(TaskError::MissingTitle);
        }

        let today = self.today();
        let date = if task.date.is_empty() {
            today
        } else {
            task.anchor()?
        };
        let rule = task.rule()?;

        let scheduled = if rule.is_recurring() {
            let next = next_occurrence(today, date, &rule)?;
            if date < today { next } else { date }
        } else {
            date.max(today)
        };

        debug!(
            title = %task.title,
            repeat = %task.repeat,
            requested = %task.date,
            scheduled = %scheduled,
            "task prepared"
        );
        task.date = scheduled.to_string();
        Ok(task)
    }

    /// Decides what happens to a task that was marked done today.
    pub fn complete(&self, mut task: Task) -> Result<Completion, TaskError> {
        let rule = task.rule()?;
        if let RecurrenceRule::None = rule {
            debug!(id = %task.id, "one-off task done, removing");
            return Ok(Completion::Remove);
        }

        let anchor = task.anchor()?;
        let next = next_occurrence(self.today(), anchor, &rule)?;
        debug!(id = %task.id, from = %anchor, to = %next, "recurring task rescheduled");
        task.date = next.to_string();
        Ok(Completion::Reschedule(task))
    }
}
