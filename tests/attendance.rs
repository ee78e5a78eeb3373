#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use millroll::libs::attendance::AttendanceMap;
    use millroll::libs::employee::Employee;
    use millroll::libs::record::{AttendanceStatus, DayRecord, RecordEdit, ShiftSelection};
    use millroll::libs::shift::Shift;
    use millroll::libs::window::{resolve, Granularity};

    fn roster() -> Vec<Employee> {
        vec![
            Employee::new(1, "Anand", "T-001", 800.0),
            Employee::new(2, "Bhavani", "T-002", 760.0),
            Employee::new(3, "Chitra", "T-003", 720.0),
        ]
    }

    fn week() -> Vec<NaiveDate> {
        resolve(Granularity::Week, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
    }

    fn present(employee_id: i64, date: NaiveDate) -> DayRecord {
        DayRecord::absent(employee_id, date).apply(RecordEdit::Shift(ShiftSelection::Standard(Shift::First)))
    }

    #[test]
    fn test_map_is_dense() {
        let dates = week();
        let employees = roster();
        let map = AttendanceMap::build(&dates, &employees, vec![present(1, dates[0]), present(2, dates[3])]);

        assert_eq!(map.len(), dates.len() * employees.len());
        for &date in &dates {
            for employee in &employees {
                let record = map.get(date, employee.id).unwrap();
                assert_eq!(record.date, date);
                assert_eq!(record.employee_id, employee.id);
            }
        }
    }

    #[test]
    fn test_missing_cells_are_absent() {
        let dates = week();
        let map = AttendanceMap::build(&dates, &roster(), Vec::new());

        assert!(map.cells().all(|record| *record == DayRecord::absent(record.employee_id, record.date)));
    }

    #[test]
    fn test_known_records_are_used() {
        let dates = week();
        let map = AttendanceMap::build(&dates, &roster(), vec![present(2, dates[1])]);

        assert_eq!(map.get(dates[1], 2).unwrap().status, AttendanceStatus::Present);
        assert_eq!(map.get(dates[1], 1).unwrap().status, AttendanceStatus::Absent);
    }

    #[test]
    fn test_duplicate_records_keep_the_last() {
        let dates = week();
        let late = present(1, dates[0]).apply(RecordEdit::Overtime(2.0));
        let map = AttendanceMap::build(&dates, &roster(), vec![present(1, dates[0]), late.clone()]);

        assert_eq!(map.get(dates[0], 1), Some(&late));
        assert_eq!(map.len(), 21);
    }

    #[test]
    fn test_records_outside_window_or_roster_are_dropped() {
        let dates = week();
        let outside = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let map = AttendanceMap::build(&dates, &roster(), vec![present(1, outside), present(99, dates[0])]);

        assert_eq!(map.len(), 21);
        assert!(map.get(outside, 1).is_none());
        assert!(map.get(dates[0], 99).is_none());
    }

    #[test]
    fn test_empty_roster_gives_empty_map() {
        let dates = week();
        let map = AttendanceMap::build(&dates, &[], Vec::new());

        assert!(map.is_empty());
        assert_eq!(map.dates().count(), 7);
    }

    #[test]
    fn test_day_lists_every_employee() {
        let dates = week();
        let map = AttendanceMap::build(&dates, &roster(), Vec::new());

        assert_eq!(map.day(dates[2]).count(), 3);
    }

    #[test]
    fn test_merge_replaces_existing_cell_only() {
        let dates = week();
        let mut map = AttendanceMap::build(&dates, &roster(), Vec::new());

        assert!(map.merge(present(3, dates[4])));
        assert_eq!(map.get(dates[4], 3).unwrap().total_hours, 8.0);

        assert!(!map.merge(present(42, dates[4])));
        assert_eq!(map.len(), 21);
    }
}
