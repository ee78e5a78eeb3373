//! Dense attendance grid over a reporting window.
//!
//! The map is rebuilt from scratch whenever the window or the roster changes.
//! Every `(date, employee)` pair of the window holds exactly one record;
//! cells without source data get an absent record.

use crate::libs::employee::{Employee, EmployeeId};
use crate::libs::record::DayRecord;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceMap {
    cells: BTreeMap<NaiveDate, HashMap<EmployeeId, DayRecord>>,
}

impl AttendanceMap {
    pub fn build<I>(dates: &[NaiveDate], employees: &[Employee], known_records: I) -> Self
    where
        I: IntoIterator<Item = DayRecord>,
    {
        let mut known: HashMap<(NaiveDate, EmployeeId), DayRecord> = HashMap::new();
        for record in known_records {
            let (date, employee_id) = (record.date, record.employee_id);
            if known.insert((date, employee_id), record).is_some() {
                tracing::debug!(employee_id, %date, "duplicate attendance record, keeping the last one");
            }
        }

        let mut cells = BTreeMap::new();
        for &date in dates {
            let row: HashMap<EmployeeId, DayRecord> = employees
                .iter()
                .map(|employee| {
                    let record = known.remove(&(date, employee.id)).unwrap_or_else(|| DayRecord::absent(employee.id, date));
                    (employee.id, record)
                })
                .collect();
            cells.insert(date, row);
        }

        if !known.is_empty() {
            tracing::debug!(dropped = known.len(), "records outside the window or roster were dropped");
        }

        Self { cells }
    }

    pub fn get(&self, date: NaiveDate, employee_id: EmployeeId) -> Option<&DayRecord> {
        self.cells.get(&date).and_then(|row| row.get(&employee_id))
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.cells.keys().copied()
    }

    /// Records for one date.
    pub fn day(&self, date: NaiveDate) -> impl Iterator<Item = &DayRecord> {
        self.cells.get(&date).into_iter().flat_map(|row| row.values())
    }

    pub fn cells(&self) -> impl Iterator<Item = &DayRecord> {
        self.cells.values().flat_map(|row| row.values())
    }

    /// Number of cells in the grid.
    pub fn len(&self) -> usize {
        self.cells.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes an edited record back into its cell.
    ///
    /// Only existing cells are replaced, so the grid stays dense over the
    /// same dates and roster. Returns `false` when the cell is not part of
    /// the map.
    pub fn merge(&mut self, record: DayRecord) -> bool {
        match self.cells.get_mut(&record.date).and_then(|row| row.get_mut(&record.employee_id)) {
            Some(cell) => {
                *cell = record;
                true
            }
            None => false,
        }
    }
}
