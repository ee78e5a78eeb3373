#[cfg(test)]
mod tests {
    use chrono::{Datelike, NaiveDate, Weekday};
    use millroll::libs::window::{resolve, Granularity, ReportingWindow};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_day_window() {
        assert_eq!(resolve(Granularity::Day, d(2025, 1, 15)), vec![d(2025, 1, 15)]);
    }

    #[test]
    fn test_week_starts_on_monday() {
        // Wednesday
        let dates = resolve(Granularity::Week, d(2025, 1, 15));

        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0], d(2025, 1, 13));
        assert_eq!(dates[0].weekday(), Weekday::Mon);
        assert_eq!(dates[6], d(2025, 1, 19));
    }

    #[test]
    fn test_week_of_a_monday_and_a_sunday() {
        assert_eq!(resolve(Granularity::Week, d(2025, 1, 13))[0], d(2025, 1, 13));
        assert_eq!(resolve(Granularity::Week, d(2025, 1, 19))[0], d(2025, 1, 13));
    }

    #[test]
    fn test_week_across_year_boundary() {
        let dates = resolve(Granularity::Week, d(2025, 1, 1));

        assert_eq!(dates[0], d(2024, 12, 30));
        assert_eq!(dates[6], d(2025, 1, 5));
    }

    #[test]
    fn test_month_lengths() {
        assert_eq!(resolve(Granularity::Month, d(2025, 1, 20)).len(), 31);
        assert_eq!(resolve(Granularity::Month, d(2025, 2, 10)).len(), 28);
        assert_eq!(resolve(Granularity::Month, d(2024, 2, 10)).len(), 29);
        assert_eq!(resolve(Granularity::Month, d(2025, 4, 30)).len(), 30);
    }

    #[test]
    fn test_month_is_ordered_and_contiguous() {
        let dates = resolve(Granularity::Month, d(2025, 12, 31));

        assert_eq!(dates.first(), Some(&d(2025, 12, 1)));
        assert_eq!(dates.last(), Some(&d(2025, 12, 31)));
        assert!(dates.windows(2).all(|pair| pair[1] == pair[0].succ_opt().unwrap()));
    }

    #[test]
    fn test_reporting_window_bounds() {
        let window = ReportingWindow::new(Granularity::Week, d(2025, 1, 15));

        assert_eq!(window.start(), d(2025, 1, 13));
        assert_eq!(window.end(), d(2025, 1, 19));
        assert!(window.contains(d(2025, 1, 19)));
        assert!(!window.contains(d(2025, 1, 20)));
        assert_eq!(window.reference(), d(2025, 1, 15));
    }

    #[test]
    fn test_labels() {
        assert_eq!(ReportingWindow::new(Granularity::Day, d(2025, 1, 15)).label(), "Wednesday, January 15, 2025");
        assert_eq!(ReportingWindow::new(Granularity::Week, d(2025, 1, 15)).label(), "Week 2025-01-13 to 2025-01-19");
        assert_eq!(ReportingWindow::new(Granularity::Month, d(2025, 2, 3)).label(), "February 2025");
    }

    #[test]
    fn test_range_keys() {
        assert_eq!(ReportingWindow::new(Granularity::Day, d(2025, 1, 15)).range_key(), "2025-01-15");
        assert_eq!(ReportingWindow::new(Granularity::Month, d(2025, 2, 3)).range_key(), "2025-02-01_2025-02-28");
    }
}
