//! Shift catalog for the spinning floor.
//!
//! The mill runs three fixed 8-hour shifts. Each shift maps to a constant
//! clock-in/clock-out pair; the table never changes at runtime.
//!
//! ## Usage
//!
//! ```rust
//! use millroll::libs::shift::Shift;
//!
//! let (in_time, out_time) = Shift::First.times();
//! assert_eq!(in_time.format("%H:%M").to_string(), "06:00");
//! assert_eq!(out_time.format("%H:%M").to_string(), "14:00");
//! ```

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of every standard shift, in hours.
pub const SHIFT_HOURS: f64 = 8.0;

/// One of the three standard shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Shift {
    #[serde(rename = "SHIFT_1")]
    First,
    #[serde(rename = "SHIFT_2")]
    Second,
    #[serde(rename = "SHIFT_3")]
    Third,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown shift '{0}', expected SHIFT_1, SHIFT_2 or SHIFT_3")]
pub struct UnknownShift(pub String);

impl Shift {
    pub const ALL: [Shift; 3] = [Shift::First, Shift::Second, Shift::Third];

    /// Standard clock-in and clock-out times.
    ///
    /// `Third` runs overnight, so its out time is earlier than its in time;
    /// the shift still counts as [`SHIFT_HOURS`].
    pub fn times(self) -> (NaiveTime, NaiveTime) {
        let (start, end) = match self {
            Shift::First => (6, 14),
            Shift::Second => (14, 22),
            Shift::Third => (22, 6),
        };
        (hm(start), hm(end))
    }

    pub fn hours(self) -> f64 {
        SHIFT_HOURS
    }

    pub fn code(self) -> &'static str {
        match self {
            Shift::First => "SHIFT_1",
            Shift::Second => "SHIFT_2",
            Shift::Third => "SHIFT_3",
        }
    }

    /// Strict parse used for user input. Accepts `SHIFT_1`, `shift-1`, `1`, ...
    pub fn parse(value: &str) -> Result<Shift, UnknownShift> {
        let normalized = value.trim().to_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "SHIFT_1" | "1" => Ok(Shift::First),
            "SHIFT_2" | "2" => Ok(Shift::Second),
            "SHIFT_3" | "3" => Ok(Shift::Third),
            _ => Err(UnknownShift(value.to_string())),
        }
    }
}

impl FromStr for Shift {
    type Err = UnknownShift;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shift::parse(s)
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

fn hm(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN)
}
