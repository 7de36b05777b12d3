//! Task search over an in-memory slice.

use crate::domain::{CalendarDate, Task};

/// Used when the caller passes a limit of 0.
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// A parsed search string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    All,

    /// Search text in `DD.MM.YYYY` form.
    OnDate(CalendarDate),

    /// Lowercased needle matched against title and comment.
    Text(String),
}

impl SearchQuery {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return SearchQuery::All;
        }
        match CalendarDate::parse_dotted(text) {
            Ok(date) => SearchQuery::OnDate(date),
            Err(_) => SearchQuery::Text(text.to_lowercase()),
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            SearchQuery::All => true,
            SearchQuery::OnDate(date) => task.anchor().is_ok_and(|d| d == *date),
            SearchQuery::Text(needle) => {
                task.title.to_lowercase().contains(needle.as_str())
                    || task.comment.to_lowercase().contains(needle.as_str())
            }
        }
    }
}

/// Matching tasks in date order, at most `limit` of them.
pub fn filter_tasks<'a>(tasks: &'a [Task], query: &SearchQuery, limit: usize) -> Vec<&'a Task> {
    let limit = if limit == 0 { DEFAULT_LIST_LIMIT } else { limit };
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    // YYYYMMDD sorts chronologically as text
    sorted.sort_by(|a, b| a.date.cmp(&b.date));
    sorted
        .into_iter()
        .filter(|task| query.matches(task))
        .take(limit)
        .collect()
}
