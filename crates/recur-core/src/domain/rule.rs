//! Repeat rules and their textual encoding.
//!
//! Grammar (fixed prefixes, no other shapes are accepted):
//! - `y`                          every year on the anchor's month/day
//! - `d <n>`                      every `n` days, `1 <= n <= 400`
//! - `w <d1,d2,...>`              on ISO weekdays (1 = Monday .. 7 = Sunday)
//! - `m <day,...> [<month,...>]`  on days of month (`-1` last, `-2` second to last),
//!   optionally restricted to months 1..=12
//!
//! Parsing never consults the calendar: `m 31 4` is accepted here and simply
//! never matches in April.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::errors::{MonthRuleField, RuleError};

/// Upper bound for `d <n>`.
pub const MAX_DAY_INTERVAL: u32 = 400;

/// One entry of the day list of a monthly rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DaySelector {
    /// Exactly this day of month (1..=31).
    Day(u8),
    /// `-1`
    Last,
    /// `-2`
    SecondToLast,
}

impl DaySelector {
    pub fn from_number(n: i32) -> Option<Self> {
        match n {
            -1 => Some(DaySelector::Last),
            -2 => Some(DaySelector::SecondToLast),
            1..=31 => Some(DaySelector::Day(n as u8)),
            _ => None,
        }
    }

    pub fn number(self) -> i32 {
        match self {
            DaySelector::Day(d) => i32::from(d),
            DaySelector::Last => -1,
            DaySelector::SecondToLast => -2,
        }
    }

    /// Day of month this selector names, given the month's last day.
    pub fn resolve(self, last_day: u32) -> u32 {
        match self {
            DaySelector::Day(d) => u32::from(d),
            DaySelector::Last => last_day,
            DaySelector::SecondToLast => last_day - 1,
        }
    }
}

/// A parsed repeat rule. Carries no date context.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecurrenceRule {
    /// The task does not recur.
    None,

    Yearly,

    EveryNDays(u32),

    /// ISO weekday numbers, never empty.
    WeeklyOn(BTreeSet<u8>),

    /// `days` keeps the order of the rule text; an empty `months` means every month.
    MonthlyOn {
        days: Vec<DaySelector>,
        months: BTreeSet<u8>,
    },
}

impl RecurrenceRule {
    /// Decodes rule text. The empty string is rejected with `EmptyRule`.
    pub fn parse(text: &str) -> Result<Self, RuleError> {
        if text.is_empty() {
            return Err(RuleError::EmptyRule);
        }
        if text == "y" {
            return Ok(RecurrenceRule::Yearly);
        }
        if let Some(rest) = text.strip_prefix("d ") {
            return parse_day_count(rest);
        }
        if let Some(rest) = text.strip_prefix("w ") {
            return parse_weekdays(rest);
        }
        if let Some(rest) = text.strip_prefix("m ") {
            return parse_month_rule(rest);
        }
        Err(RuleError::UnsupportedRule(text.to_string()))
    }

    /// Like [`parse`](Self::parse), but the empty string means "does not recur".
    pub fn parse_optional(text: &str) -> Result<Self, RuleError> {
        if text.is_empty() {
            Ok(RecurrenceRule::None)
        } else {
            Self::parse(text)
        }
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, RecurrenceRule::None)
    }
}

/// Plain decimal digits only; `str::parse` would also take a leading `+`.
fn parse_unsigned<T: FromStr>(text: &str) -> Option<T> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Day-of-month selector number: digits with an optional leading `-`.
fn parse_selector(text: &str) -> Option<DaySelector> {
    let n = match text.strip_prefix('-') {
        Some(digits) => -parse_unsigned::<i32>(digits)?,
        None => parse_unsigned::<i32>(text)?,
    };
    DaySelector::from_number(n)
}

fn parse_day_count(rest: &str) -> Result<RecurrenceRule, RuleError> {
    let invalid = || RuleError::InvalidDayCount {
        value: rest.to_string(),
    };
    let n: u32 = parse_unsigned(rest).ok_or_else(invalid)?;
    if !(1..=MAX_DAY_INTERVAL).contains(&n) {
        return Err(invalid());
    }
    Ok(RecurrenceRule::EveryNDays(n))
}

fn parse_weekdays(rest: &str) -> Result<RecurrenceRule, RuleError> {
    let mut days = BTreeSet::new();
    for part in rest.split(',') {
        let part = part.trim();
        match parse_unsigned::<u8>(part) {
            Some(day @ 1..=7) => {
                days.insert(day);
            }
            _ => {
                return Err(RuleError::InvalidWeekday {
                    value: part.to_string(),
                });
            }
        }
    }
    if days.is_empty() {
        return Err(RuleError::InvalidWeekday {
            value: rest.to_string(),
        });
    }
    Ok(RecurrenceRule::WeeklyOn(days))
}

fn parse_month_rule(rest: &str) -> Result<RecurrenceRule, RuleError> {
    let invalid = |field, value: &str| RuleError::InvalidMonthRule {
        field,
        value: value.to_string(),
    };

    let tokens: Vec<&str> = rest.split_whitespace().collect();
    let (days_token, months_token) = match tokens.as_slice() {
        [days] => (*days, None),
        [days, months] => (*days, Some(*months)),
        [] => return Err(invalid(MonthRuleField::Days, "")),
        [_, _, extra @ ..] => {
            let extra = extra.join(" ");
            return Err(invalid(MonthRuleField::TrailingInput, extra.as_str()));
        }
    };

    let mut days = Vec::new();
    for part in days_token.split(',') {
        let part = part.trim();
        let selector =
            parse_selector(part).ok_or_else(|| invalid(MonthRuleField::Days, part))?;
        days.push(selector);
    }

    let mut months = BTreeSet::new();
    if let Some(months_token) = months_token {
        for part in months_token.split(',') {
            let part = part.trim();
            match parse_unsigned::<u8>(part) {
                Some(month @ 1..=12) => {
                    months.insert(month);
                }
                _ => return Err(invalid(MonthRuleField::Months, part)),
            }
        }
    }

    Ok(RecurrenceRule::MonthlyOn { days, months })
}

impl FromStr for RecurrenceRule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = T>,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Canonical rule text; `None` renders as the empty string.
impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceRule::None => Ok(()),
            RecurrenceRule::Yearly => f.write_str("y"),
            RecurrenceRule::EveryNDays(n) => write!(f, "d {n}"),
            RecurrenceRule::WeeklyOn(days) => {
                f.write_str("w ")?;
                write_joined(f, days)
            }
            RecurrenceRule::MonthlyOn { days, months } => {
                f.write_str("m ")?;
                write_joined(f, days.iter().map(|d| d.number()))?;
                if !months.is_empty() {
                    f.write_str(" ")?;
                    write_joined(f, months)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn set(items: &[u8]) -> BTreeSet<u8> {
        items.iter().copied().collect()
    }

    #[test]
    fn parses_each_rule_kind() {
        assert_eq!(RecurrenceRule::parse("y").unwrap(), RecurrenceRule::Yearly);
        assert_eq!(RecurrenceRule::parse("d 5").unwrap(), RecurrenceRule::EveryNDays(5));
        assert_eq!(
            RecurrenceRule::parse("w 1, 3,3").unwrap(),
            RecurrenceRule::WeeklyOn(set(&[1, 3]))
        );
        assert_eq!(
            RecurrenceRule::parse("m 31,-1 4,6").unwrap(),
            RecurrenceRule::MonthlyOn {
                days: vec![DaySelector::Day(31), DaySelector::Last],
                months: set(&[4, 6]),
            }
        );
        assert_eq!(
            RecurrenceRule::parse("m -2").unwrap(),
            RecurrenceRule::MonthlyOn {
                days: vec![DaySelector::SecondToLast],
                months: BTreeSet::new(),
            }
        );
    }

    #[test]
    fn empty_text_is_an_error_unless_optional() {
        assert_eq!(RecurrenceRule::parse(""), Err(RuleError::EmptyRule));
        assert_eq!(RecurrenceRule::parse_optional("").unwrap(), RecurrenceRule::None);
        assert!(!RecurrenceRule::None.is_recurring());
        assert!(RecurrenceRule::Yearly.is_recurring());
    }

    #[rstest]
    #[case::unknown("bogus")]
    #[case::bare_d("d")]
    #[case::bare_w("w")]
    #[case::bare_m("m")]
    #[case::yearly_with_arg("y 2")]
    #[case::upper("Y")]
    #[case::leading_space(" y")]
    fn rejects_unknown_shapes(#[case] text: &str) {
        let err = RecurrenceRule::parse(text).unwrap_err();
        assert_eq!(err, RuleError::UnsupportedRule(text.to_string()));
    }

    #[rstest]
    #[case("d 500")]
    #[case("d 401")]
    #[case("d 0")]
    #[case("d -1")]
    #[case("d ")]
    #[case("d five")]
    #[case("d 5 6")]
    #[case("d  5")]
    #[case("d +5")]
    fn rejects_bad_day_counts(#[case] text: &str) {
        let err = RecurrenceRule::parse(text).unwrap_err();
        assert!(matches!(err, RuleError::InvalidDayCount { .. }), "{err:?}");
    }

    #[test]
    fn day_count_bounds_are_inclusive() {
        assert_eq!(RecurrenceRule::parse("d 1").unwrap(), RecurrenceRule::EveryNDays(1));
        assert_eq!(RecurrenceRule::parse("d 400").unwrap(), RecurrenceRule::EveryNDays(400));
    }

    #[rstest]
    #[case("w 0")]
    #[case("w 8")]
    #[case("w ")]
    #[case("w 1,,2")]
    #[case("w mon")]
    #[case("w +1")]
    fn rejects_bad_weekdays(#[case] text: &str) {
        let err = RecurrenceRule::parse(text).unwrap_err();
        assert!(matches!(err, RuleError::InvalidWeekday { .. }), "{err:?}");
    }

    #[rstest]
    #[case("m ", MonthRuleField::Days, "")]
    #[case("m 0", MonthRuleField::Days, "0")]
    #[case("m 32", MonthRuleField::Days, "32")]
    #[case("m -3", MonthRuleField::Days, "-3")]
    #[case("m 1,x", MonthRuleField::Days, "x")]
    #[case("m +1", MonthRuleField::Days, "+1")]
    #[case("m --1", MonthRuleField::Days, "--1")]
    #[case("m -", MonthRuleField::Days, "-")]
    #[case("m 1 +2", MonthRuleField::Months, "+2")]
    #[case("m 1 0", MonthRuleField::Months, "0")]
    #[case("m 1 13", MonthRuleField::Months, "13")]
    #[case("m 1 2,", MonthRuleField::Months, "")]
    #[case("m 1 2 3 4", MonthRuleField::TrailingInput, "3 4")]
    fn month_rule_errors_name_the_field(
        #[case] text: &str,
        #[case] field: MonthRuleField,
        #[case] value: &str,
    ) {
        let err = RecurrenceRule::parse(text).unwrap_err();
        assert_eq!(
            err,
            RuleError::InvalidMonthRule {
                field,
                value: value.to_string(),
            }
        );
    }

    #[test]
    fn parser_does_not_check_month_lengths() {
        assert!(RecurrenceRule::parse("m 31 2").is_ok());
        assert!(RecurrenceRule::parse("m 30 2").is_ok());
    }

    #[rstest]
    #[case("y")]
    #[case("d 7")]
    #[case("w 1,3,7")]
    #[case("m 31,-1 4,6")]
    #[case("m -2,15")]
    fn parsing_is_idempotent_and_display_is_canonical(#[case] text: &str) {
        let first = RecurrenceRule::parse(text).unwrap();
        let second = RecurrenceRule::parse(text).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_string(), text);
        assert_eq!(first.to_string().parse::<RecurrenceRule>().unwrap(), first);
    }

    #[test]
    fn display_normalizes_weekday_sets() {
        let rule = RecurrenceRule::parse("w 7, 1,7").unwrap();
        assert_eq!(rule.to_string(), "w 1,7");
        assert_eq!(RecurrenceRule::None.to_string(), "");
    }

    #[test]
    fn selectors_resolve_against_month_length() {
        assert_eq!(DaySelector::Last.resolve(29), 29);
        assert_eq!(DaySelector::SecondToLast.resolve(29), 28);
        assert_eq!(DaySelector::Day(31).resolve(30), 31);
        assert_eq!(DaySelector::from_number(0), None);
        assert_eq!(DaySelector::from_number(-2), Some(DaySelector::SecondToLast));
    }
}
