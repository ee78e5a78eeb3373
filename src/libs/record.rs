//! Per-employee, per-day attendance records.
//!
//! A [`DayRecord`] carries both the entered fields (shift, clock times,
//! overtime) and the derived ones (total hours, status). Every change goes
//! through [`DayRecord::apply`], a single reducer that re-derives the
//! computed fields and then settles the record so that these rules always
//! hold:
//!
//! - an `ABSENT` shift has no clock times, no overtime and zero hours
//! - an `ABSENT` status has zero overtime and zero hours
//! - total hours are never negative
//!
//! A time edit credits the clocked duration and drops overtime. An overtime
//! edit credits a full shift plus the overtime, whatever the clock says.
//!
//! Rows coming from the attendance store are normalised with
//! [`DayRecord::from_raw`], which applies the same rules, so a record looks
//! the same whether it was fetched or edited.

use crate::libs::employee::EmployeeId;
use crate::libs::shift::{Shift, UnknownShift, SHIFT_HOURS};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

const TIME_FORMAT: &str = "%H:%M";
const LEAVE_CODE: &str = "LEAVE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Present,
    HalfDay,
    #[default]
    Absent,
}

impl AttendanceStatus {
    /// Work-day credit for one day in this status.
    pub fn weight(self) -> f64 {
        match self {
            AttendanceStatus::Present => 1.0,
            AttendanceStatus::HalfDay => 0.5,
            AttendanceStatus::Absent => 0.0,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "PRESENT",
            AttendanceStatus::HalfDay => "HALF_DAY",
            AttendanceStatus::Absent => "ABSENT",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// What the shift field of a record holds.
///
/// `Manual` marks clock times typed by hand instead of taken from the
/// shift catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShiftSelection {
    #[default]
    Absent,
    Manual,
    Standard(Shift),
}

impl ShiftSelection {
    pub fn code(self) -> &'static str {
        match self {
            ShiftSelection::Absent => "ABSENT",
            ShiftSelection::Manual => "MANUAL",
            ShiftSelection::Standard(shift) => shift.code(),
        }
    }

    /// Strict parse for user input: a shift code, `absent` or `manual`.
    pub fn parse(value: &str) -> Result<Self, UnknownShift> {
        match value.trim().to_uppercase().as_str() {
            "ABSENT" => Ok(ShiftSelection::Absent),
            "MANUAL" => Ok(ShiftSelection::Manual),
            _ => Shift::parse(value).map(ShiftSelection::Standard),
        }
    }

    /// Lenient parse for store rows. `None` means the row had no shift at all;
    /// an unrecognised value is logged and treated as absent.
    pub fn from_raw(value: Option<&str>) -> Option<Self> {
        let value = value.map(str::trim).filter(|v| !v.is_empty())?;
        match ShiftSelection::parse(value) {
            Ok(selection) => Some(selection),
            Err(err) => {
                tracing::warn!(shift = value, "{err}; treating the day as absent");
                Some(ShiftSelection::Absent)
            }
        }
    }
}

impl fmt::Display for ShiftSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Attendance row as exchanged with the attendance store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAttendanceRow {
    pub employee_id: EmployeeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub shift: Option<String>,
    #[serde(default)]
    pub in_time: Option<String>,
    #[serde(default)]
    pub out_time: Option<String>,
    #[serde(default)]
    pub overtime_hours: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_hours: Option<f64>,
}

/// One edit applied to a record by [`DayRecord::apply`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordEdit {
    Shift(ShiftSelection),
    InTime(Option<NaiveTime>),
    OutTime(Option<NaiveTime>),
    Times {
        in_time: Option<NaiveTime>,
        out_time: Option<NaiveTime>,
    },
    Overtime(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayRecord {
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub shift: ShiftSelection,
    pub in_time: Option<NaiveTime>,
    pub out_time: Option<NaiveTime>,
    pub overtime_hours: f64,
    pub total_hours: f64,
    pub status: AttendanceStatus,
    /// The store reported the absence as leave. Only ever set on absent days.
    pub on_leave: bool,
}

impl DayRecord {
    /// The record synthesised for a cell without any source data.
    pub fn absent(employee_id: EmployeeId, date: NaiveDate) -> Self {
        Self {
            employee_id,
            date,
            shift: ShiftSelection::Absent,
            in_time: None,
            out_time: None,
            overtime_hours: 0.0,
            total_hours: 0.0,
            status: AttendanceStatus::Absent,
            on_leave: false,
        }
    }

    /// Normalises a store row into a consistent record.
    ///
    /// Stored `totalHours` are ignored and re-derived; an unknown status or
    /// shift degrades to absent with a warning.
    pub fn from_raw(date: NaiveDate, row: &RawAttendanceRow) -> Self {
        let (status, on_leave) = parse_status(row.status.as_deref(), row.employee_id, date);
        let mut in_time = parse_time(row.in_time.as_deref(), row.employee_id, date);
        let mut out_time = parse_time(row.out_time.as_deref(), row.employee_id, date);

        let shift = match ShiftSelection::from_raw(row.shift.as_deref()) {
            Some(selection) => selection,
            None if in_time.is_some() || out_time.is_some() => ShiftSelection::Manual,
            None => ShiftSelection::Absent,
        };

        if let ShiftSelection::Standard(standard) = shift {
            let (shift_in, shift_out) = standard.times();
            in_time = in_time.or(Some(shift_in));
            out_time = out_time.or(Some(shift_out));
        }

        if shift == ShiftSelection::Absent && status != AttendanceStatus::Absent {
            tracing::debug!(employee_id = row.employee_id, %date, %status, "absent shift overrides reported status");
        }

        Self {
            employee_id: row.employee_id,
            date,
            shift,
            in_time,
            out_time,
            overtime_hours: row.overtime_hours.unwrap_or(0.0),
            total_hours: 0.0,
            status,
            on_leave,
        }
        .settle()
    }

    /// Applies one edit and returns the updated record with all derived
    /// fields recomputed.
    pub fn apply(mut self, edit: RecordEdit) -> Self {
        self.on_leave = false;
        match edit {
            RecordEdit::Shift(ShiftSelection::Absent) => {
                self.shift = ShiftSelection::Absent;
                self.status = AttendanceStatus::Absent;
            }
            RecordEdit::Shift(ShiftSelection::Standard(shift)) => {
                let (in_time, out_time) = shift.times();
                self.shift = ShiftSelection::Standard(shift);
                self.in_time = Some(in_time);
                self.out_time = Some(out_time);
                self.status = AttendanceStatus::Present;
            }
            RecordEdit::Shift(ShiftSelection::Manual) => {
                self.shift = ShiftSelection::Manual;
                self.status = self.status_from_clock();
            }
            RecordEdit::InTime(in_time) => {
                self.in_time = in_time;
                self.switch_to_manual();
            }
            RecordEdit::OutTime(out_time) => {
                self.out_time = out_time;
                self.switch_to_manual();
            }
            RecordEdit::Times { in_time, out_time } => {
                self.in_time = in_time;
                self.out_time = out_time;
                self.switch_to_manual();
            }
            RecordEdit::Overtime(hours) => {
                if self.shift == ShiftSelection::Absent {
                    tracing::warn!(employee_id = self.employee_id, date = %self.date, "overtime ignored on a day without a shift");
                } else {
                    self.overtime_hours = non_negative(hours);
                    self.status = AttendanceStatus::Present;
                }
            }
        }
        self.settle()
    }

    /// Hours between the clock times, clamped at zero. Missing times count
    /// as no time worked.
    pub fn clocked_hours(&self) -> f64 {
        match (self.in_time, self.out_time) {
            (Some(in_time), Some(out_time)) => non_negative((out_time - in_time).num_minutes() as f64 / 60.0),
            _ => 0.0,
        }
    }

    pub fn is_absent(&self) -> bool {
        self.status == AttendanceStatus::Absent
    }

    /// Converts the record back into the row shape the store accepts.
    pub fn to_raw(&self) -> RawAttendanceRow {
        let status = if self.on_leave { LEAVE_CODE } else { self.status.code() };
        RawAttendanceRow {
            employee_id: self.employee_id,
            date: Some(self.date),
            shift: match self.shift {
                ShiftSelection::Absent => None,
                selection => Some(selection.code().to_string()),
            },
            in_time: self.in_time.map(|t| t.format(TIME_FORMAT).to_string()),
            out_time: self.out_time.map(|t| t.format(TIME_FORMAT).to_string()),
            overtime_hours: Some(self.overtime_hours),
            status: Some(status.to_string()),
            total_hours: Some(self.total_hours),
        }
    }

    fn switch_to_manual(&mut self) {
        self.shift = ShiftSelection::Manual;
        self.overtime_hours = 0.0;
        self.status = self.status_from_clock();
    }

    fn status_from_clock(&self) -> AttendanceStatus {
        if self.clocked_hours() > 0.0 {
            AttendanceStatus::Present
        } else {
            AttendanceStatus::Absent
        }
    }

    /// Hours credited before overtime. A manual entry carries overtime only
    /// after an overtime edit, which credits a full shift.
    fn base_hours(&self) -> f64 {
        match self.shift {
            ShiftSelection::Absent => 0.0,
            ShiftSelection::Manual if self.overtime_hours > 0.0 => SHIFT_HOURS,
            ShiftSelection::Manual => self.clocked_hours(),
            ShiftSelection::Standard(shift) if self.status == AttendanceStatus::HalfDay => shift.hours() / 2.0,
            ShiftSelection::Standard(shift) => shift.hours(),
        }
    }

    fn settle(mut self) -> Self {
        self.overtime_hours = non_negative(self.overtime_hours);

        if self.shift == ShiftSelection::Manual && self.clocked_hours() <= 0.0 && self.overtime_hours <= 0.0 {
            self.status = AttendanceStatus::Absent;
        }
        if self.shift == ShiftSelection::Absent {
            self.status = AttendanceStatus::Absent;
        }

        if self.status == AttendanceStatus::Absent {
            // Typed clock times survive on a manual entry so the editor can finish them.
            if self.shift != ShiftSelection::Manual {
                self.shift = ShiftSelection::Absent;
                self.in_time = None;
                self.out_time = None;
            }
            self.overtime_hours = 0.0;
            self.total_hours = 0.0;
        } else {
            self.on_leave = false;
            self.total_hours = self.base_hours() + self.overtime_hours;
        }
        self
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn parse_status(value: Option<&str>, employee_id: EmployeeId, date: NaiveDate) -> (AttendanceStatus, bool) {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return (AttendanceStatus::Absent, false);
    };
    match value.to_uppercase().replace(['-', ' '], "_").as_str() {
        "PRESENT" => (AttendanceStatus::Present, false),
        "HALF_DAY" | "HALFDAY" => (AttendanceStatus::HalfDay, false),
        "ABSENT" => (AttendanceStatus::Absent, false),
        LEAVE_CODE => (AttendanceStatus::Absent, true),
        _ => {
            tracing::warn!(employee_id, %date, status = value, "unrecognised attendance status; treating the day as absent");
            (AttendanceStatus::Absent, false)
        }
    }
}

fn parse_time(value: Option<&str>, employee_id: EmployeeId, date: NaiveDate) -> Option<NaiveTime> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| tracing::warn!(employee_id, %date, time = value, "unparsable clock time ignored"))
        .ok()
}

pub fn time_from_str(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).ok()
}
