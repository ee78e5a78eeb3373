//! Number and time formatting shared by the console views and exports.
//!
//! ## Formats
//!
//! - Clock times are `HH:MM`; a missing time is shown as `-`
//! - Hours are decimal with two places (`8.50`)
//! - Work days drop a trailing `.0` (`5`, `4.5`)
//! - Amounts always carry two decimals (`4000.00`)
//!
//! ## Examples
//!
//! ```rust
//! use millroll::libs::formatter::{format_days, format_hours, format_amount};
//!
//! assert_eq!(format_hours(8.5), "8.50");
//! assert_eq!(format_days(4.5), "4.5");
//! assert_eq!(format_amount(4000.0), "4000.00");
//! ```

use chrono::NaiveTime;

pub fn format_time(time: Option<NaiveTime>) -> String {
    time.map(|t| t.format("%H:%M").to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn format_hours(hours: f64) -> String {
    format!("{:.2}", hours.max(0.0))
}

pub fn format_days(days: f64) -> String {
    if days.fract() == 0.0 {
        format!("{}", days as i64)
    } else {
        format!("{:.1}", days)
    }
}

pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}
