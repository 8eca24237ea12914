//! Year overview data for the ratings heatmap.
//!
//! Each month column lists the Sundays falling in that month (at most five),
//! labelled with the tracker week they belong to under the user's week start
//! day. Only stored ratings are shown; synthesized weeks count as unrated.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::calendar::{current_week_number, format_range_label, WeekStartDay};
use crate::store::WeekStore;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MAX_TILES_PER_MONTH: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekTile {
    pub start: NaiveDate,
    pub week: i32,
    pub label: String,
    pub tripti_index: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthColumn {
    pub month: &'static str,
    pub weeks: Vec<WeekTile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearOverview {
    pub year: i32,
    pub months: Vec<MonthColumn>,
}

impl YearOverview {
    pub fn rated_weeks(&self) -> usize {
        self.months
            .iter()
            .flat_map(|m| &m.weeks)
            .filter(|t| t.tripti_index > 0)
            .count()
    }
}

pub fn year_overview(store: &WeekStore, year: i32, start: WeekStartDay) -> YearOverview {
    let months = MONTHS
        .iter()
        .enumerate()
        .map(|(i, &month)| MonthColumn {
            month,
            weeks: sundays_in_month(year, i as u32 + 1)
                .into_iter()
                .map(|sunday| tile(store, sunday, start))
                .collect(),
        })
        .collect();
    YearOverview { year, months }
}

fn tile(store: &WeekStore, sunday: NaiveDate, start: WeekStartDay) -> WeekTile {
    let week = current_week_number(sunday, start);
    let last_day = sunday.checked_add_days(Days::new(6)).unwrap_or(sunday);
    WeekTile {
        start: sunday,
        week,
        label: format_range_label(sunday, last_day),
        tripti_index: store.stored(week).map_or(0, |r| r.tripti_index),
    }
}

fn sundays_in_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let offset = (7 - first.weekday().num_days_from_sunday()) % 7;
    let Some(first_sunday) = first.checked_add_days(Days::new(offset as u64)) else {
        return Vec::new();
    };
    first_sunday
        .iter_weeks()
        .take_while(|d| d.month() == month)
        .take(MAX_TILES_PER_MONTH)
        .collect()
}
