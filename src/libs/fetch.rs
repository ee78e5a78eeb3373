//! Fetching the attendance snapshot a window is computed from.
//!
//! - **Window views** fetch the whole range in one call. A failure is
//!   returned to the caller: an empty summary would be misleading.
//! - **Exports** fetch each date on its own, concurrently. A failed date is
//!   recorded as unavailable and its cells fall back to absent, so the
//!   export still completes.

use crate::api::{AttendanceStore, StoreError};
use crate::libs::attendance::AttendanceMap;
use crate::libs::employee::{DepartmentFilter, Employee};
use crate::libs::record::{DayRecord, RawAttendanceRow};
use crate::libs::summary::{summarize_all, EmployeeWindowSummary};
use crate::libs::window::ReportingWindow;
use chrono::NaiveDate;
use futures::future::join_all;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct WindowSnapshot {
    pub window: ReportingWindow,
    pub department: DepartmentFilter,
    pub employees: Vec<Employee>,
    pub records: Vec<DayRecord>,
    /// Dates whose attendance could not be fetched.
    pub unavailable: BTreeSet<NaiveDate>,
}

impl WindowSnapshot {
    pub async fn fetch<S: AttendanceStore>(store: &S, window: ReportingWindow, department: DepartmentFilter) -> Result<Self, StoreError> {
        let employees = department.apply(store.fetch_employees().await?);
        let rows = store.fetch_range(window.start(), window.end()).await?;

        let records = rows
            .iter()
            .filter_map(|row| match row.date {
                Some(date) => Some(DayRecord::from_raw(date, row)),
                None => {
                    tracing::warn!(employee_id = row.employee_id, "attendance row without a date skipped");
                    None
                }
            })
            .collect();

        Ok(Self {
            window,
            department,
            employees,
            records,
            unavailable: BTreeSet::new(),
        })
    }

    pub async fn fetch_for_export<S: AttendanceStore>(
        store: &S,
        window: ReportingWindow,
        department: DepartmentFilter,
    ) -> Result<Self, StoreError> {
        let employees = department.apply(store.fetch_employees().await?);

        let results = join_all(window.dates().iter().map(|&date| async move { (date, store.fetch_by_date(date).await) })).await;

        let mut records = Vec::new();
        let mut unavailable = BTreeSet::new();
        for (date, result) in results {
            match result {
                Ok(rows) => records.extend(records_for_date(date, &rows)),
                Err(err) => {
                    tracing::warn!(%date, error = %err, "attendance unavailable, exporting the date as absent");
                    unavailable.insert(date);
                }
            }
        }

        Ok(Self {
            window,
            department,
            employees,
            records,
            unavailable,
        })
    }

    pub fn attendance_map(&self) -> AttendanceMap {
        AttendanceMap::build(self.window.dates(), &self.employees, self.records.iter().cloned())
    }

    pub fn summaries(&self, map: &AttendanceMap) -> Vec<EmployeeWindowSummary> {
        summarize_all(map, self.window.dates(), &self.employees)
    }
}

fn records_for_date(date: NaiveDate, rows: &[RawAttendanceRow]) -> Vec<DayRecord> {
    rows.iter().map(|row| DayRecord::from_raw(date, row)).collect()
}
