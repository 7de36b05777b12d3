//! String boundary for the calculator (`YYYYMMDD` in, `YYYYMMDD` out).

use crate::domain::{CalendarDate, NextDateError, RecurrenceRule};
use crate::engine::next_occurrence;

fn required<'a>(name: &'static str, value: &'a str) -> Result<&'a str, NextDateError> {
    if value.is_empty() {
        Err(NextDateError::MissingParameter(name))
    } else {
        Ok(value)
    }
}

fn date_param(name: &'static str, value: &str) -> Result<CalendarDate, NextDateError> {
    required(name, value)?
        .parse()
        .map_err(|source| NextDateError::InvalidDateFormat { field: name, source })
}

/// Next date for a task stored as (`date`, `repeat`), as seen from `now`.
///
/// Parameters are checked in the order `now`, `date`, `repeat`; the rule is
/// parsed fresh on every call.
pub fn next_date(now: &str, date: &str, repeat: &str) -> Result<String, NextDateError> {
    let now = date_param("now", now)?;
    let anchor = date_param("date", date)?;
    let rule = RecurrenceRule::parse(required("repeat", repeat)?)?;
    let next = next_occurrence(now, anchor, &rule)?;
    Ok(next.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CalcError, ErrorKind, RuleError};
    use rstest::rstest;

    #[rstest]
    #[case("20240213", "20240213", "d 5", "20240218")]
    #[case("20240301", "20240229", "y", "20250301")]
    #[case("20240126", "20240126", "w 1,3", "20240129")]
    #[case("20240101", "20240101", "m -1", "20240131")]
    #[case("20240101", "20240101", "m 31,-1 4,6", "20240430")]
    fn encodes_the_next_date(
        #[case] now: &str,
        #[case] date: &str,
        #[case] repeat: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(next_date(now, date, repeat).unwrap(), expected);
    }

    #[rstest]
    #[case("", "20240101", "d 1", ErrorKind::MissingParameter)]
    #[case("20240101", "", "d 1", ErrorKind::MissingParameter)]
    #[case("20240101", "20240101", "", ErrorKind::MissingParameter)]
    #[case("2024011", "20240101", "d 1", ErrorKind::InvalidDateFormat)]
    #[case("20240101", "20240192", "d 1", ErrorKind::InvalidDateFormat)]
    #[case("20240101", "28.01.2024", "d 1", ErrorKind::InvalidDateFormat)]
    #[case("20240101", "20240101", "d 500", ErrorKind::InvalidDayCount)]
    #[case("20240101", "20240101", "bogus", ErrorKind::UnsupportedRule)]
    #[case("20240101", "20240101", "w 8", ErrorKind::InvalidWeekday)]
    #[case("20240101", "20240101", "m 1 13", ErrorKind::InvalidMonthRule)]
    #[case("20240101", "20240101", "m 30 2", ErrorKind::SearchExhausted)]
    fn failures_keep_their_kind(
        #[case] now: &str,
        #[case] date: &str,
        #[case] repeat: &str,
        #[case] kind: ErrorKind,
    ) {
        assert_eq!(next_date(now, date, repeat).unwrap_err().kind(), kind);
    }

    #[test]
    fn errors_name_the_offending_parameter() {
        assert_eq!(
            next_date("20240101", "", "y"),
            Err(NextDateError::MissingParameter("date"))
        );
        let err = next_date("2024-01-01", "20240101", "y").unwrap_err();
        assert!(matches!(err, NextDateError::InvalidDateFormat { field: "now", .. }));
    }

    #[test]
    fn wraps_core_errors_unchanged() {
        assert_eq!(
            next_date("20240101", "20240101", "d 500"),
            Err(NextDateError::Rule(RuleError::InvalidDayCount {
                value: "500".to_string()
            }))
        );
        assert!(matches!(
            next_date("20240101", "20240101", "m 31 2"),
            Err(NextDateError::Calc(CalcError::SearchExhausted { .. }))
        ));
    }
}
