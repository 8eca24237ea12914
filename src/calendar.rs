//! Week calendar calculations.
//!
//! Week numbers are 1-based and counted from the week containing January 1st,
//! where a "week" begins on the user's configured start day. Nothing here
//! clamps to 52: late-December dates can land in week 53 and callers may ask
//! for weeks outside the year in either direction.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// Highest week the week header lets the user navigate to.
pub const MAX_DISPLAY_WEEK: i32 = 52;

/// Day a tracked week begins on. Discriminants match the persisted 0–6 value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WeekStartDay {
    Sunday = 0,
    #[default]
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl WeekStartDay {
    pub const ALL: [WeekStartDay; 7] = [
        WeekStartDay::Sunday,
        WeekStartDay::Monday,
        WeekStartDay::Tuesday,
        WeekStartDay::Wednesday,
        WeekStartDay::Thursday,
        WeekStartDay::Friday,
        WeekStartDay::Saturday,
    ];

    /// Days since Sunday (0 = Sunday .. 6 = Saturday)
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            WeekStartDay::Sunday => "Sunday",
            WeekStartDay::Monday => "Monday",
            WeekStartDay::Tuesday => "Tuesday",
            WeekStartDay::Wednesday => "Wednesday",
            WeekStartDay::Thursday => "Thursday",
            WeekStartDay::Friday => "Friday",
            WeekStartDay::Saturday => "Saturday",
        }
    }

    pub fn weekday(self) -> Weekday {
        match self {
            WeekStartDay::Sunday => Weekday::Sun,
            WeekStartDay::Monday => Weekday::Mon,
            WeekStartDay::Tuesday => Weekday::Tue,
            WeekStartDay::Wednesday => Weekday::Wed,
            WeekStartDay::Thursday => Weekday::Thu,
            WeekStartDay::Friday => Weekday::Fri,
            WeekStartDay::Saturday => Weekday::Sat,
        }
    }
}

impl From<WeekStartDay> for u8 {
    fn from(day: WeekStartDay) -> Self {
        day.index()
    }
}

impl TryFrom<u8> for WeekStartDay {
    type Error = TrackerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value).ok_or_else(|| TrackerError::InvalidWeekStartDay(value.to_string()))
    }
}

impl FromStr for WeekStartDay {
    type Err = TrackerError;

    /// Parses the persisted form, a stringified integer 0–6.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(Self::from_index)
            .ok_or_else(|| TrackerError::InvalidWeekStartDay(s.to_string()))
    }
}

impl fmt::Display for WeekStartDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// First day of the week containing `date`: the latest date on or before
/// `date` that falls on `start`. Saturates at `NaiveDate::MIN` when that day
/// lies before chrono's supported range.
pub fn week_start_date(date: NaiveDate, start: WeekStartDay) -> NaiveDate {
    let current = date.weekday().num_days_from_sunday() as u64;
    let start = start.index() as u64;
    let diff = if current >= start {
        current - start
    } else {
        7 - (start - current)
    };
    date.checked_sub_days(Days::new(diff))
        .unwrap_or(NaiveDate::MIN)
}

/// Start of week 1 for `year`. May fall in late December of the previous year.
pub fn first_week_start(year: i32, start: WeekStartDay) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1).map(|jan1| week_start_date(jan1, start))
}

/// 1-based week number of `date` within its calendar year.
pub fn current_week_number(date: NaiveDate, start: WeekStartDay) -> i32 {
    let jan1 = date.with_ordinal(1).unwrap_or(date);
    let first = week_start_date(jan1, start);
    let target = week_start_date(date, start);
    let weeks = (target - first).num_days().div_euclid(7);
    weeks as i32 + 1
}

/// First day of `week` in `year`. Weeks ≤ 0 extrapolate backward.
pub fn week_start_for(week: i32, start: WeekStartDay, year: i32) -> Result<NaiveDate, TrackerError> {
    let out_of_range = || TrackerError::DateOutOfRange { week, year };
    let first = first_week_start(year, start).ok_or_else(out_of_range)?;
    let offset = Duration::days((i64::from(week) - 1) * 7);
    first.checked_add_signed(offset).ok_or_else(out_of_range)
}

/// Inclusive 7-day span covered by `week` in `year`.
pub fn week_date_range(
    week: i32,
    start: WeekStartDay,
    year: i32,
) -> Result<(NaiveDate, NaiveDate), TrackerError> {
    let first_day = week_start_for(week, start, year)?;
    let last_day = first_day
        .checked_add_days(Days::new(6))
        .ok_or(TrackerError::DateOutOfRange { week, year })?;
    Ok((first_day, last_day))
}

/// "Feb 12 - Feb 18" style label for `week` in `year`.
pub fn week_date_range_label(week: i32, start: WeekStartDay, year: i32) -> Result<String, TrackerError> {
    let (first_day, last_day) = week_date_range(week, start, year)?;
    Ok(format_range_label(first_day, last_day))
}

pub(crate) fn format_range_label(first_day: NaiveDate, last_day: NaiveDate) -> String {
    format!("{} - {}", first_day.format("%b %-d"), last_day.format("%b %-d"))
}

pub fn previous_display_week(week: i32) -> i32 {
    (week - 1).max(1)
}

pub fn next_display_week(week: i32) -> i32 {
    (week + 1).min(MAX_DISPLAY_WEEK)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn days_of(year: i32) -> impl Iterator<Item = NaiveDate> {
        date(year, 1, 1).iter_days().take_while(move |d| d.year() == year)
    }

    #[test]
    fn test_week_start_date_thursday_monday_start() {
        // 2024-02-15 is a Thursday
        let result = week_start_date(date(2024, 2, 15), WeekStartDay::Monday);
        assert_eq!(result, date(2024, 2, 12));
        assert_eq!(result.weekday(), Weekday::Mon);
    }

    #[test]
    fn test_week_start_date_wraps_back_a_week() {
        // Monday with a Tuesday start goes back six days
        let result = week_start_date(date(2024, 2, 12), WeekStartDay::Tuesday);
        assert_eq!(result, date(2024, 2, 6));
    }

    #[test]
    fn test_week_start_date_saturates_at_min_date() {
        // Nothing earlier is representable, so every start day clamps
        for start in WeekStartDay::ALL {
            assert_eq!(week_start_date(NaiveDate::MIN, start), NaiveDate::MIN, "{start}");
        }
        let near_min = NaiveDate::MIN + Duration::days(3);
        for start in WeekStartDay::ALL {
            let ws = week_start_date(near_min, start);
            assert!(ws >= NaiveDate::MIN && ws <= near_min, "{start}");
        }
    }

    #[test]
    fn test_week_start_date_properties_hold_for_every_day() {
        for year in [2023, 2024, 2025] {
            for start in WeekStartDay::ALL {
                for day in days_of(year) {
                    let ws = week_start_date(day, start);
                    assert_eq!(ws.weekday(), start.weekday(), "{day} {start}");
                    let back = (day - ws).num_days();
                    assert!((0..=6).contains(&back), "{day} {start} back={back}");
                }
            }
        }
    }

    #[test]
    fn test_current_week_feb_15_2024() {
        assert_eq!(current_week_number(date(2024, 2, 15), WeekStartDay::Monday), 7);
    }

    #[test]
    fn test_jan_1_is_always_week_one() {
        for year in 2020..2030 {
            for start in WeekStartDay::ALL {
                assert_eq!(current_week_number(date(year, 1, 1), start), 1);
            }
        }
    }

    #[test]
    fn test_week_number_monotonic_and_steps_weekly() {
        for start in WeekStartDay::ALL {
            let mut prev = current_week_number(date(2025, 1, 1), start);
            let mut increments = 0;
            for day in days_of(2025).skip(1) {
                let week = current_week_number(day, start);
                assert!(week == prev || week == prev + 1, "{day} {start}");
                if week == prev + 1 {
                    increments += 1;
                    assert_eq!(day.weekday(), start.weekday());
                }
                prev = week;
            }
            assert_eq!(prev, increments + 1);
        }
    }

    #[test]
    fn test_late_december_can_reach_week_53() {
        // 2022-01-01 is a Saturday, so a Saturday start makes it a full week 1
        assert_eq!(current_week_number(date(2022, 12, 31), WeekStartDay::Saturday), 53);
    }

    #[test]
    fn test_week_date_range_label_week_7_2024() {
        assert_eq!(
            week_date_range_label(7, WeekStartDay::Monday, 2024).unwrap(),
            "Feb 12 - Feb 18"
        );
    }

    #[test]
    fn test_label_spanning_year_start() {
        // 2025-01-01 is a Wednesday; with a Sunday start week 1 begins Dec 29
        assert_eq!(
            week_date_range_label(1, WeekStartDay::Sunday, 2025).unwrap(),
            "Dec 29 - Jan 4"
        );
    }

    #[test]
    fn test_range_contains_date_for_its_week() {
        for start in WeekStartDay::ALL {
            for day in days_of(2024) {
                let week = current_week_number(day, start);
                let (first, last) = week_date_range(week, start, 2024).unwrap();
                assert!(first <= day && day <= last, "{day} {start}");
                assert_eq!((last - first).num_days(), 6);
            }
        }
    }

    #[test]
    fn test_non_positive_weeks_extrapolate_backward() {
        assert_eq!(
            week_date_range_label(0, WeekStartDay::Monday, 2024).unwrap(),
            "Dec 25 - Dec 31"
        );
        assert_eq!(
            week_start_for(-1, WeekStartDay::Monday, 2024).unwrap(),
            date(2023, 12, 18)
        );
    }

    #[test]
    fn test_out_of_range_year_is_an_error() {
        let err = week_date_range_label(1, WeekStartDay::Monday, 400_000).unwrap_err();
        assert!(matches!(err, TrackerError::DateOutOfRange { week: 1, year: 400_000 }));
    }

    #[test]
    fn test_week_start_day_parsing() {
        assert_eq!("0".parse::<WeekStartDay>().unwrap(), WeekStartDay::Sunday);
        assert_eq!(" 6 ".parse::<WeekStartDay>().unwrap(), WeekStartDay::Saturday);
        assert!("7".parse::<WeekStartDay>().is_err());
        assert!("monday".parse::<WeekStartDay>().is_err());
        assert!(WeekStartDay::try_from(9u8).is_err());
        assert_eq!(WeekStartDay::default(), WeekStartDay::Monday);
    }

    #[test]
    fn test_week_start_day_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&WeekStartDay::Friday).unwrap(), "5");
        let day: WeekStartDay = serde_json::from_str("3").unwrap();
        assert_eq!(day, WeekStartDay::Wednesday);
        assert!(serde_json::from_str::<WeekStartDay>("8").is_err());
    }

    #[test]
    fn test_display_week_navigation_clamps() {
        assert_eq!(previous_display_week(1), 1);
        assert_eq!(previous_display_week(10), 9);
        assert_eq!(next_display_week(52), 52);
        assert_eq!(next_display_week(51), 52);
    }
}
