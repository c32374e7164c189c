use std::fmt;

use chrono::{DateTime, Datelike, Utc};

/// Calendar month bucket, ordered chronologically by `(year, month)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(month: u32, year: i32) -> Self {
        Self { year, month }
    }

    pub fn of(timestamp: DateTime<Utc>) -> Self {
        Self {
            year: timestamp.year(),
            month: timestamp.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

/// Month from which the incoming freshman class graduates a year later.
const COHORT_ROLLOVER_MONTH: u32 = 10;

/// Graduation years of the four classes currently enrolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassYearWindow {
    pub freshman: i32,
    pub sophomore: i32,
    pub junior: i32,
    pub senior: i32,
}

impl ClassYearWindow {
    pub fn at(now: DateTime<Utc>) -> Self {
        let freshman = if now.month() >= COHORT_ROLLOVER_MONTH {
            now.year() + 1
        } else {
            now.year()
        };

        Self {
            freshman,
            sophomore: freshman + 1,
            junior: freshman + 2,
            senior: freshman + 3,
        }
    }

    pub fn years(&self) -> [i32; 4] {
        [self.freshman, self.sophomore, self.junior, self.senior]
    }

    pub fn contains(&self, graduation_year: i32) -> bool {
        self.years().contains(&graduation_year)
    }
}
