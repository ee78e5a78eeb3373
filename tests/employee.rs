#[cfg(test)]
mod tests {
    use millroll::libs::employee::{DepartmentFilter, Employee};
    use std::collections::HashSet;

    fn roster() -> Vec<Employee> {
        vec![
            Employee::new(3, "Chitra", "T-010", 720.0).with_department("Ring Frame"),
            Employee::new(1, "Anand", "T-002", 800.0).with_department("Carding"),
            Employee::new(2, "Bhavani", "T-002", 760.0).with_department("carding "),
            Employee::new(4, "Dinesh", "T-001", 700.0),
        ]
    }

    #[test]
    fn test_no_filter_keeps_everyone_in_token_order() {
        let ids: Vec<i64> = DepartmentFilter::new(None).apply(roster()).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4, 1, 2, 3]);
    }

    #[test]
    fn test_all_means_no_filter() {
        assert_eq!(DepartmentFilter::new(Some("All")), DepartmentFilter::default());
        assert_eq!(DepartmentFilter::new(Some("  ")), DepartmentFilter::default());
    }

    #[test]
    fn test_filter_matches_case_insensitively() {
        let ids: Vec<i64> = DepartmentFilter::new(Some("CARDING")).apply(roster()).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_labels_and_slugs() {
        let all = DepartmentFilter::new(None);
        assert_eq!(all.label(), "All departments");
        assert_eq!(all.slug(), "all-departments");

        let ring = DepartmentFilter::new(Some("Ring Frame"));
        assert_eq!(ring.department(), Some("Ring Frame"));
        assert_eq!(ring.slug(), "ring-frame");
        assert_eq!(DepartmentFilter::new(Some(" ring frame ")).slug(), "ring-frame");

        let doffing = DepartmentFilter::new(Some("Ring Frame / Doffing"));
        assert!(doffing.slug().starts_with("ring-frame-doffing-"));
    }

    #[test]
    fn test_distinct_departments_get_distinct_slugs() {
        let names = ["நூற்பு", "சீவுதல்", "Spinning (A)", "Spinning A", "Spinning-A", "Carding", "Winding"];
        let slugs: HashSet<String> = names.iter().map(|name| DepartmentFilter::new(Some(name)).slug()).collect();

        assert_eq!(slugs.len(), names.len());
        assert_eq!(DepartmentFilter::new(Some("நூற்பு")).slug(), "நூற்பு");
        assert_eq!(DepartmentFilter::new(Some("Spinning (A)")).slug(), DepartmentFilter::new(Some("Spinning (A)")).slug());
    }

    #[test]
    fn test_employee_json_uses_camel_case() {
        let employee: Employee =
            serde_json::from_str(r#"{ "id": 9, "name": "Kumar", "tokenNumber": "T-009", "shiftRate": 820.5, "department": "Winding" }"#)
                .unwrap();
        assert_eq!(employee.token_number, "T-009");
        assert_eq!(employee.shift_rate, 820.5);
        assert!(employee.in_department("winding"));
        assert_eq!(employee.join_date, None);
    }
}
