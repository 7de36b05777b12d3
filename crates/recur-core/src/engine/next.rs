//! Next-occurrence calculator.
//!
//! # 設計
//! - 純粋関数（同じ入力なら常に同じ結果、I/O もログもなし）
//! - ルールの種類ごとに探索戦略を切り替える（exhaustive match）
//! - 週次・月次の前方探索は `SEARCH_HORIZON_DAYS` で打ち切る
//!
//! "Next" is always the smallest qualifying date strictly after `now`.

use std::collections::BTreeSet;

use crate::domain::{CalcError, CalendarDate, DaySelector, RecurrenceRule};

use super::calendar::{iso_weekday, last_day_of_month, same_day_in_year};

/// Forward-scan limit for weekly and monthly rules (five years).
///
/// A monthly rule such as `m 30 2` can never match; the scan gives up on
/// candidates more than this many days after `now` and reports `SearchExhausted`.
pub const SEARCH_HORIZON_DAYS: u64 = 1826;

/// Computes the first date after `now` on which a task anchored at `anchor`
/// recurs under `rule`.
///
/// `RecurrenceRule::None` is rejected with `CalcError::UnsupportedRule`;
/// callers handle one-off tasks themselves.
pub fn next_occurrence(
    now: CalendarDate,
    anchor: CalendarDate,
    rule: &RecurrenceRule,
) -> Result<CalendarDate, CalcError> {
    match rule {
        RecurrenceRule::None => Err(CalcError::UnsupportedRule),
        RecurrenceRule::Yearly => yearly(now, anchor),
        RecurrenceRule::EveryNDays(n) => every_n_days(now, anchor, *n),
        RecurrenceRule::WeeklyOn(weekdays) => scan(now, anchor, SEARCH_HORIZON_DAYS, |date| {
            weekdays.contains(&iso_weekday(date))
        }),
        RecurrenceRule::MonthlyOn { days, months } => {
            scan(now, anchor, SEARCH_HORIZON_DAYS, |date| {
                matches_month_day(date, days, months)
            })
        }
    }
}

/// Anchor's month/day in each following year; Feb 29 rolls to Mar 1 in
/// common years. Every candidate is derived from the anchor, so a Feb 29
/// anchor lands on Feb 29 again in the next leap year.
fn yearly(now: CalendarDate, anchor: CalendarDate) -> Result<CalendarDate, CalcError> {
    // Candidates in years before `now`'s year can never be after `now`.
    let mut years = (now.year() - anchor.year()).max(1);
    loop {
        let year = anchor
            .year()
            .checked_add(years)
            .ok_or(CalcError::DateOverflow)?;
        let candidate = same_day_in_year(anchor, year).ok_or(CalcError::DateOverflow)?;
        if candidate > now {
            return Ok(candidate);
        }
        years += 1;
    }
}

/// `anchor + k * n` for the smallest `k >= 1` landing after `now`.
fn every_n_days(
    now: CalendarDate,
    anchor: CalendarDate,
    n: u32,
) -> Result<CalendarDate, CalcError> {
    let step = u64::from(n);
    let elapsed = now.days_since(anchor);
    let periods = if elapsed < 0 {
        1
    } else {
        elapsed as u64 / step + 1
    };
    anchor
        .checked_add_days(periods * step)
        .ok_or(CalcError::DateOverflow)
}

/// Day-by-day scan. Starts the day after the later of `now` and `anchor`;
/// candidates more than `horizon_days` after `now` are never examined.
fn scan(
    now: CalendarDate,
    anchor: CalendarDate,
    horizon_days: u64,
    matches: impl Fn(CalendarDate) -> bool,
) -> Result<CalendarDate, CalcError> {
    let origin = now.max(anchor);
    let mut offset = 1;
    loop {
        let candidate = origin
            .checked_add_days(offset)
            .ok_or(CalcError::DateOverflow)?;
        if candidate.days_since(now) > horizon_days as i64 {
            return Err(CalcError::SearchExhausted { horizon_days });
        }
        if matches(candidate) {
            return Ok(candidate);
        }
        offset += 1;
    }
}

fn matches_month_day(date: CalendarDate, days: &[DaySelector], months: &BTreeSet<u8>) -> bool {
    if !months.is_empty() && !months.contains(&(date.month() as u8)) {
        return false;
    }
    let last_day = last_day_of_month(date);
    days.iter().any(|selector| selector.resolve(last_day) == date.day())
}
