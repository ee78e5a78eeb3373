//! Per-employee aggregates over a reporting window.
//!
//! ## Wage formula
//!
//! ```text
//! hourly rate = shift rate / 8
//! wages       = round2(hourly rate * total hours)
//! ```
//!
//! Rounding happens once, on the window total. A window with no work days
//! and no overtime pays nothing and reports zero hours, whatever stray
//! hours the records might carry.

use crate::libs::attendance::AttendanceMap;
use crate::libs::employee::{Employee, EmployeeId};
use crate::libs::glyph::Mark;
use crate::libs::shift::SHIFT_HOURS;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeWindowSummary {
    pub employee_id: EmployeeId,
    pub work_days: f64,
    pub total_hours: f64,
    pub total_overtime_hours: f64,
    pub wages: f64,
}

/// Rounds to two decimal places, currency style.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn summarize(map: &AttendanceMap, dates: &[NaiveDate], employee: &Employee) -> EmployeeWindowSummary {
    let mut work_days = 0.0;
    let mut total_hours = 0.0;
    let mut total_overtime_hours = 0.0;

    for &date in dates {
        let Some(record) = map.get(date, employee.id) else {
            continue;
        };
        work_days += record.status.weight();
        if !record.is_absent() {
            total_hours += record.total_hours;
            total_overtime_hours += record.overtime_hours;
        }
    }

    if work_days == 0.0 && total_overtime_hours == 0.0 {
        return EmployeeWindowSummary {
            employee_id: employee.id,
            work_days,
            total_hours: 0.0,
            total_overtime_hours,
            wages: 0.0,
        };
    }

    let hourly_rate = employee.shift_rate.max(0.0) / SHIFT_HOURS;
    EmployeeWindowSummary {
        employee_id: employee.id,
        work_days,
        total_hours,
        total_overtime_hours,
        wages: round2(hourly_rate * total_hours),
    }
}

/// Summaries for a whole roster, in roster order.
pub fn summarize_all(map: &AttendanceMap, dates: &[NaiveDate], employees: &[Employee]) -> Vec<EmployeeWindowSummary> {
    employees.iter().map(|employee| summarize(map, dates, employee)).collect()
}

/// Footer totals over a set of summaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowTotals {
    pub work_days: f64,
    pub total_hours: f64,
    pub total_overtime_hours: f64,
    pub wages: f64,
}

impl WindowTotals {
    pub fn of(summaries: &[EmployeeWindowSummary]) -> Self {
        let totals = summaries.iter().fold(Self::default(), |acc, s| Self {
            work_days: acc.work_days + s.work_days,
            total_hours: acc.total_hours + s.total_hours,
            total_overtime_hours: acc.total_overtime_hours + s.total_overtime_hours,
            wages: acc.wages + s.wages,
        });
        Self {
            wages: round2(totals.wages),
            ..totals
        }
    }
}

/// Cell counts per mark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub present: usize,
    pub half_day: usize,
    pub leave: usize,
    pub absent: usize,
}

impl StatusCounts {
    pub fn add(&mut self, mark: Mark) {
        match mark {
            Mark::Present => self.present += 1,
            Mark::HalfDay => self.half_day += 1,
            Mark::Leave => self.leave += 1,
            Mark::Absent => self.absent += 1,
        }
    }

    pub fn get(&self, mark: Mark) -> usize {
        match mark {
            Mark::Present => self.present,
            Mark::HalfDay => self.half_day,
            Mark::Leave => self.leave,
            Mark::Absent => self.absent,
        }
    }

    pub fn total(&self) -> usize {
        self.present + self.half_day + self.leave + self.absent
    }

    pub fn from_map(map: &AttendanceMap, dates: &[NaiveDate], employees: &[Employee]) -> Self {
        let mut counts = Self::default();
        for &date in dates {
            for employee in employees {
                if let Some(record) = map.get(date, employee.id) {
                    counts.add(Mark::of(record));
                }
            }
        }
        counts
    }
}

impl FromIterator<Mark> for StatusCounts {
    fn from_iter<T: IntoIterator<Item = Mark>>(iter: T) -> Self {
        let mut counts = Self::default();
        for mark in iter {
            counts.add(mark);
        }
        counts
    }
}
