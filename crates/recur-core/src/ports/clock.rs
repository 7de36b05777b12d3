//! Clock port - 時刻の抽象化
//!
//! 「今日」を決めるのはここだけです。計算エンジン自体は時刻を読みません。

use chrono::{DateTime, NaiveTime, Utc};

use crate::domain::CalendarDate;

/// Clock は現在時刻を提供
///
/// # テスト容易性
/// - trait により時刻を差し替え可能
/// - テストでは FixedClock を使用
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date of `now()` (UTC).
    fn today(&self) -> CalendarDate {
        CalendarDate::from_naive(self.now().date_naive())
    }
}

/// SystemClock はシステム時刻を返す（本番用）
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// FixedClock は常に同じ時刻を返す（テスト用・`RECUR_TODAY` 用）
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Midnight UTC of `date`.
    pub fn on(date: CalendarDate) -> Self {
        Self::new(date.as_naive().and_time(NaiveTime::MIN).and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
