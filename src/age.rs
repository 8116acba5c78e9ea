//! age.rs
//!
//! Calendar-aware age calculation in the format:
//!     "X years, Y months, Z days"
//!
//! Chrono does not provide a built-in year/month/day diff (unlike Python’s
//! relativedelta), so we consume whole calendar units one at a time:
//! whole years from the birth date, then whole months from that anniversary,
//! then the remaining days.
//!
//! This logic correctly handles:
//!   • month-end clamping (Jan 31 + 1 month = Feb 28/29)
//!   • leap years and Feb 29 birthdays
//!   • varying month lengths

use std::fmt;

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::error::DateError;

/// Elapsed calendar time between a birth date and today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeResult {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl fmt::Display for AgeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} year{}, {} month{}, {} day{}",
            self.years,
            plural(self.years),
            self.months,
            plural(self.months),
            self.days,
            plural(self.days)
        )
    }
}

fn plural(n: u32) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Builds the birth date from validated fields, rejecting dates that do not
/// exist (April 31, Feb 29 in a common year) and dates after `today`.
pub fn compose_date(
    day: u32,
    month: u32,
    year: u32,
    today: NaiveDate,
) -> Result<NaiveDate, DateError> {
    let year = i32::try_from(year).map_err(|_| DateError::InvalidCalendarDate)?;
    let birth =
        NaiveDate::from_ymd_opt(year, month, day).ok_or(DateError::InvalidCalendarDate)?;

    if birth > today {
        return Err(DateError::FutureDate);
    }

    Ok(birth)
}

/// Computes the age on `today` of someone born on `day`/`month`/`year`.
pub fn age_between(
    day: u32,
    month: u32,
    year: u32,
    today: NaiveDate,
) -> Result<AgeResult, DateError> {
    let birth = compose_date(day, month, year, today)?;
    Ok(age_on(birth, today))
}

/// Age on `today` for a birth date that is not after `today`.
fn age_on(birth: NaiveDate, today: NaiveDate) -> AgeResult {
    debug_assert!(birth <= today, "birth date {birth} is after {today}");

    let (years, cursor) = whole_steps(birth, today, 12);
    let (mut months, mut anniversary) = whole_steps(cursor, today, 1);

    // A Feb 29 birth clamps to Feb 28 after the year step. When today is
    // Feb 28 of a leap year that cursor is a full 12 months back, yet the
    // birthday (Feb 29) is still ahead: count the months from the birth
    // date instead.
    if months == 12 {
        let (total, date) = whole_steps(birth, today, 1);
        months = total - years * 12;
        anniversary = date;
    }

    AgeResult {
        years,
        months,
        days: (today - anniversary).num_days() as u32,
    }
}

/// Largest `n` such that `from + n·step months <= to`, with the date it lands
/// on. Month addition clamps the day to the target month's length.
fn whole_steps(from: NaiveDate, to: NaiveDate, step: u32) -> (u32, NaiveDate) {
    let naive = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    let mut n = u32::try_from(naive).unwrap_or(0) / step;

    // The naive count overshoots by at most one step when `to` falls before
    // the anniversary day within its month.
    while n > 0 {
        match from.checked_add_months(Months::new(n * step)) {
            Some(date) if date <= to => return (n, date),
            _ => n -= 1,
        }
    }

    (0, from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn age(years: u32, months: u32, days: u32) -> AgeResult {
        AgeResult {
            years,
            months,
            days,
        }
    }

    #[test]
    fn exact_anniversary() {
        let today = date(2024, 3, 15);
        assert_eq!(age_between(15, 3, 2000, today), Ok(age(24, 0, 0)));
    }

    #[test]
    fn borrows_month_using_february_length() {
        let today = date(2024, 3, 15);
        assert_eq!(age_between(20, 3, 2000, today), Ok(age(23, 11, 24)));
    }

    #[test]
    fn born_today_is_zero() {
        let today = date(2024, 3, 15);
        assert_eq!(age_between(15, 3, 2024, today), Ok(age(0, 0, 0)));
    }

    #[test]
    fn one_year_exactly() {
        let today = date(2024, 3, 15);
        assert_eq!(age_between(15, 3, 2023, today), Ok(age(1, 0, 0)));
    }

    #[test]
    fn leap_day_birthday_in_common_year() {
        // Feb 29 clamps to Feb 28 in common years, so the year is complete.
        assert_eq!(age_between(29, 2, 2000, date(2001, 2, 28)), Ok(age(1, 0, 0)));
        assert_eq!(age_between(29, 2, 2000, date(2001, 2, 27)), Ok(age(0, 11, 29)));
        assert_eq!(age_between(29, 2, 2000, date(2001, 3, 1)), Ok(age(1, 0, 1)));
    }

    #[test]
    fn leap_day_birthday_in_leap_year() {
        assert_eq!(age_between(29, 2, 2000, date(2004, 2, 29)), Ok(age(4, 0, 0)));
        assert_eq!(age_between(29, 2, 2000, date(2004, 2, 28)), Ok(age(3, 11, 30)));
    }

    #[test]
    fn month_end_clamping() {
        // Jan 31 + 1 month lands on Feb 29 in 2000.
        assert_eq!(age_between(31, 1, 2000, date(2000, 3, 30)), Ok(age(0, 1, 30)));
        assert_eq!(age_between(31, 1, 2001, date(2001, 2, 28)), Ok(age(0, 1, 0)));
    }

    #[test]
    fn year_boundary() {
        assert_eq!(age_between(31, 12, 2023, date(2024, 1, 1)), Ok(age(0, 0, 1)));
        assert_eq!(age_between(15, 12, 2020, date(2024, 1, 10)), Ok(age(3, 0, 26)));
    }

    #[test]
    fn rejects_nonexistent_dates() {
        let today = date(2024, 3, 15);
        assert_eq!(age_between(31, 4, 2000, today), Err(DateError::InvalidCalendarDate));
        assert_eq!(age_between(30, 2, 2000, today), Err(DateError::InvalidCalendarDate));
        assert_eq!(age_between(29, 2, 2001, today), Err(DateError::InvalidCalendarDate));
        assert_eq!(age_between(29, 2, 2000, today), Ok(age(24, 0, 15)));
    }

    #[test]
    fn rejects_future_dates() {
        let today = date(2024, 3, 15);
        assert_eq!(age_between(16, 3, 2024, today), Err(DateError::FutureDate));
        assert_eq!(age_between(1, 12, 2024, today), Err(DateError::FutureDate));
    }

    #[test]
    fn idempotent() {
        let today = date(2024, 3, 15);
        assert_eq!(age_between(7, 9, 1987, today), age_between(7, 9, 1987, today));
    }

    /// Years first, then months from the year anniversary, then days, by
    /// plain counting.
    fn stepwise(birth: NaiveDate, today: NaiveDate) -> (u32, u32, u32) {
        let add = |d: NaiveDate, n: u32| d.checked_add_months(Months::new(n)).unwrap();

        let mut years = 0;
        while add(birth, (years + 1) * 12) <= today {
            years += 1;
        }
        let cursor = add(birth, years * 12);

        let mut months = 0;
        while add(cursor, months + 1) <= today {
            months += 1;
        }
        let days = (today - add(cursor, months)).num_days() as u32;

        (years, months, days)
    }

    fn length_of_previous_month(today: NaiveDate) -> u32 {
        today.with_day(1).unwrap().pred_opt().unwrap().day()
    }

    #[test]
    fn matches_stepwise_counting() {
        let todays = [
            date(2024, 3, 15),
            date(2023, 3, 1),
            date(2023, 3, 28),
            date(2023, 3, 30),
            date(2023, 10, 30),
            date(2024, 1, 31),
            date(2024, 2, 28),
            date(2024, 2, 29),
            date(2024, 12, 31),
        ];
        for today in todays {
            let mut birth = date(1995, 1, 1);
            while birth <= today {
                let result = age_on(birth, today);
                let (years, months, days) = stepwise(birth, today);

                if months == 12 {
                    // Feb 29 birth seen on Feb 28 of a leap year.
                    assert_eq!((birth.month(), birth.day()), (2, 29));
                    assert_eq!((today.month(), today.day()), (2, 28));
                    assert!(NaiveDate::from_ymd_opt(today.year(), 2, 29).is_some());
                    assert_eq!((result.years, result.months), (years, 11));
                } else {
                    assert_eq!(
                        (result.years, result.months, result.days),
                        (years, months, days),
                        "{birth} -> {today}"
                    );
                }

                assert!(result.months <= 11, "{birth} -> {today}: {result:?}");
                assert!(result.days <= 30, "{birth} -> {today}: {result:?}");
                let prev_len = length_of_previous_month(today);
                if today.day() < prev_len {
                    assert!(result.days < prev_len, "{birth} -> {today}: {result:?}");
                }

                birth = birth.succ_opt().unwrap();
            }
        }
    }

    #[test]
    fn leap_day_birthday_counts_months_from_clamped_anniversary() {
        assert_eq!(age_between(29, 2, 2000, date(2003, 3, 28)), Ok(age(3, 1, 0)));
        assert_eq!(age_between(29, 2, 2000, date(2003, 4, 29)), Ok(age(3, 2, 1)));
        assert_eq!(age_between(29, 2, 2000, date(2023, 10, 30)), Ok(age(23, 8, 2)));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "is after")]
    fn age_on_requires_birth_not_after_today() {
        age_on(date(2024, 3, 16), date(2024, 3, 15));
    }

    #[test]
    fn human_string() {
        assert_eq!(age(1, 1, 1).to_string(), "1 year, 1 month, 1 day");
        assert_eq!(age(24, 0, 2).to_string(), "24 years, 0 months, 2 days");
    }
}
