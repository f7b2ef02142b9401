use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

const MONTH_LABELS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Identifies one plannable week. `year` and `week_number` follow the
/// ISO week calendar of the week's Monday, so the lookup key stays
/// stable across a calendar year boundary. `month` is a display label
/// taken from the Monday's calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekRef {
    pub year: i32,
    pub week_number: u32,
    pub month: String,
    pub monday: NaiveDate,
}

impl WeekRef {
    pub fn from_date(date: NaiveDate) -> Self {
        let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
        let iso = monday.iso_week();
        Self {
            year: iso.year(),
            week_number: iso.week(),
            month: MONTH_LABELS[monday.month0() as usize].to_string(),
            monday,
        }
    }

    pub fn shifted(&self, weeks: i64) -> Self {
        Self::from_date(self.monday + Duration::weeks(weeks))
    }

    pub fn previous(&self) -> Self {
        self.shifted(-1)
    }

    pub fn next(&self) -> Self {
        self.shifted(1)
    }
}
