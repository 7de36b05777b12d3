//! recur-core
//!
//! Repeat-rule parsing and next-occurrence calculation for scheduled tasks.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（CalendarDate, RecurrenceRule, Task, errors）
//! - **engine**: 次回日付の計算（calendar, next）。純粋関数のみ
//! - **ports**: 抽象化レイヤー（Clock）
//! - **app**: タスクサービス向けの境界（next_date, TaskScheduler, search）

pub mod app;
pub mod domain;
pub mod engine;
pub mod ports;

pub use app::{Completion, SearchQuery, TaskScheduler, filter_tasks, next_date};
pub use domain::{
    CalcError, CalendarDate, ErrorKind, NextDateError, RecurrenceRule, RuleError, Task, TaskError,
};
pub use engine::{SEARCH_HORIZON_DAYS, next_occurrence};
