//! Calendar helpers shared by the recurrence strategies.

use chrono::{Datelike, NaiveDate};

use crate::domain::CalendarDate;

/// ISO weekday number: Monday = 1 .. Sunday = 7.
pub fn iso_weekday(date: CalendarDate) -> u8 {
    date.as_naive().weekday().number_from_monday() as u8
}

fn first_of_next_month(date: CalendarDate) -> Option<NaiveDate> {
    if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    }
}

/// Last day of `date`'s month: the first of the next month minus one day.
pub fn last_day_of_month(date: CalendarDate) -> u32 {
    first_of_next_month(date)
        .and_then(|first| first.pred_opt())
        // December of the last representable year
        .map_or(31, |last| last.day())
}

/// `date` moved to `year`. A month/day that does not exist in `year`
/// (Feb 29 outside leap years) rolls forward to the first of the next month.
pub fn same_day_in_year(date: CalendarDate, year: i32) -> Option<CalendarDate> {
    CalendarDate::from_ymd(year, date.month(), date.day()).or_else(|| {
        let shifted = CalendarDate::from_ymd(year, date.month(), 1)?;
        first_of_next_month(shifted).map(CalendarDate::from_naive)
    })
}
