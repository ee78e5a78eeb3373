//! Offline attendance store backed by a JSON file.

use super::{AttendanceStore, StoreError};
use crate::libs::employee::Employee;
use crate::libs::record::{DayRecord, RawAttendanceRow};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Read-only store over a JSON snapshot of the backend.
///
/// ```json
/// {
///   "employees": [{ "id": 1, "name": "R. Kumar", "tokenNumber": "T-014", "shiftRate": 800.0 }],
///   "attendance": {
///     "2025-01-13": [{ "employeeId": 1, "shift": "SHIFT_1", "status": "PRESENT" }]
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotStore {
    #[serde(default)]
    employees: Vec<Employee>,
    #[serde(default)]
    attendance: BTreeMap<NaiveDate, Vec<RawAttendanceRow>>,
}

impl SnapshotStore {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self {
            employees,
            attendance: BTreeMap::new(),
        }
    }

    pub fn with_rows(mut self, date: NaiveDate, rows: Vec<RawAttendanceRow>) -> Self {
        self.attendance.entry(date).or_default().extend(rows);
        self
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl AttendanceStore for SnapshotStore {
    async fn fetch_by_date(&self, date: NaiveDate) -> Result<Vec<RawAttendanceRow>, StoreError> {
        Ok(self.attendance.get(&date).cloned().unwrap_or_default())
    }

    async fn fetch_employees(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.employees.clone())
    }

    async fn submit_attendance(&self, _date: NaiveDate, _records: &[DayRecord]) -> Result<(), StoreError> {
        Err(StoreError::ReadOnly)
    }
}
