//! Reporting windows: the calendar dates a summary or export covers.
//!
//! - **Day**: the reference date alone
//! - **Week**: Monday through Sunday of the reference date's week
//! - **Month**: the whole calendar month of the reference date

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
}

impl Granularity {
    pub fn code(self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Ordered dates of the window around `reference`.
pub fn resolve(granularity: Granularity, reference: NaiveDate) -> Vec<NaiveDate> {
    match granularity {
        Granularity::Day => vec![reference],
        Granularity::Week => {
            let monday = reference - Duration::days(reference.weekday().num_days_from_monday() as i64);
            monday.iter_days().take(7).collect()
        }
        Granularity::Month => {
            let first = reference.with_day(1).unwrap_or(reference);
            first.iter_days().take_while(|d| d.month() == first.month()).collect()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportingWindow {
    granularity: Granularity,
    reference: NaiveDate,
    dates: Vec<NaiveDate>,
}

impl ReportingWindow {
    pub fn new(granularity: Granularity, reference: NaiveDate) -> Self {
        Self {
            granularity,
            reference,
            dates: resolve(granularity, reference),
        }
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn start(&self) -> NaiveDate {
        self.dates.first().copied().unwrap_or(self.reference)
    }

    pub fn end(&self) -> NaiveDate {
        self.dates.last().copied().unwrap_or(self.reference)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start() <= date && date <= self.end()
    }

    /// Human readable label, e.g. `Week 2025-01-13 to 2025-01-19`.
    pub fn label(&self) -> String {
        match self.granularity {
            Granularity::Day => self.reference.format("%A, %B %-d, %Y").to_string(),
            Granularity::Week => format!("Week {} to {}", self.start().format("%Y-%m-%d"), self.end().format("%Y-%m-%d")),
            Granularity::Month => self.reference.format("%B %Y").to_string(),
        }
    }

    /// Filename-safe range, e.g. `2025-01-13_2025-01-19`.
    pub fn range_key(&self) -> String {
        if self.start() == self.end() {
            self.start().format("%Y-%m-%d").to_string()
        } else {
            format!("{}_{}", self.start().format("%Y-%m-%d"), self.end().format("%Y-%m-%d"))
        }
    }
}
