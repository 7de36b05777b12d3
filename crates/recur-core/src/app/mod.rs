//! App - タスクサービスから呼ばれる境界
//!
//! - next_date: 文字列（`YYYYMMDD` + ルール文字列）での計算
//! - scheduler: 作成・更新時の正規化、完了時の扱い
//! - search: 検索クエリと絞り込み

pub mod next_date;
pub mod scheduler;
pub mod search;

pub use self::next_date::next_date;
pub use self::scheduler::{Completion, TaskScheduler};
pub use self::search::{DEFAULT_LIST_LIMIT, SearchQuery, filter_tasks};
