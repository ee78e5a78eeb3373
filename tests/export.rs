#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use millroll::libs::config::ExportConfig;
    use millroll::libs::employee::{DepartmentFilter, Employee};
    use millroll::libs::export::{
        column_layout, default_file_name, file_stem, ColumnKind, DocumentHeader, ExportFormat, ExportTable, Exporter, FlatSheet,
        PageSetup, PrintDocument, A4_LANDSCAPE_PRINTABLE_WIDTH,
    };
    use millroll::libs::fetch::WindowSnapshot;
    use millroll::libs::glyph::{GlyphMode, Mark};
    use millroll::libs::record::{AttendanceStatus, DayRecord, RecordEdit, ShiftSelection};
    use millroll::libs::shift::Shift;
    use millroll::libs::summary::StatusCounts;
    use millroll::libs::window::{Granularity, ReportingWindow};
    use std::collections::BTreeSet;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ExportTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            ExportTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn on_shift(employee_id: i64, date: NaiveDate) -> DayRecord {
        DayRecord::absent(employee_id, date).apply(RecordEdit::Shift(ShiftSelection::Standard(Shift::First)))
    }

    fn roster(size: i64) -> Vec<Employee> {
        (1..=size)
            .map(|id| Employee::new(id, &format!("Worker {id}"), &format!("T-{id:03}"), 800.0).with_department("Carding"))
            .collect()
    }

    /// Week of 2025-01-13: employee 1 works Mon-Fri, employee 2 is on leave Monday
    /// and works a half day Tuesday.
    fn snapshot() -> WindowSnapshot {
        let mut half_day = on_shift(2, d(14));
        half_day.status = AttendanceStatus::HalfDay;
        half_day.total_hours = 4.0;
        let mut leave = DayRecord::absent(2, d(13));
        leave.on_leave = true;

        let mut records: Vec<DayRecord> = (13..=17).map(|day| on_shift(1, d(day))).collect();
        records.extend([half_day, leave]);

        WindowSnapshot {
            window: ReportingWindow::new(Granularity::Week, d(15)),
            department: DepartmentFilter::new(Some("Carding")),
            employees: roster(2),
            records,
            unavailable: BTreeSet::new(),
        }
    }

    fn header(snapshot: &WindowSnapshot) -> DocumentHeader {
        DocumentHeader::new("Attendance Register", &snapshot.window, &snapshot.department)
    }

    fn scan_counts(document: &PrintDocument, date_count: usize) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for page in &document.pages {
            for row in &page.rows {
                for cell in &row[3..3 + date_count] {
                    match cell.as_str() {
                        "P" => counts.add(Mark::Present),
                        "H" => counts.add(Mark::HalfDay),
                        "L" => counts.add(Mark::Leave),
                        "A" => counts.add(Mark::Absent),
                        other => panic!("unexpected glyph {other}"),
                    }
                }
            }
        }
        counts
    }

    #[test]
    fn test_count_panel_matches_table() {
        let snapshot = snapshot();
        let table = ExportTable::from_snapshot(&snapshot);
        let document = PrintDocument::render(&table, header(&snapshot), &PageSetup::default(), GlyphMode::Short);

        assert_eq!(document.counts, scan_counts(&document, 7));
        assert_eq!(document.counts.present, 5);
        assert_eq!(document.counts.half_day, 1);
        assert_eq!(document.counts.leave, 1);
        assert_eq!(document.counts.absent, 7);
    }

    #[test]
    fn test_table_rows_carry_summaries() {
        let table = ExportTable::from_snapshot(&snapshot());

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].token_number, "T-001");
        assert_eq!(table.rows[0].summary.work_days, 5.0);
        assert_eq!(table.rows[0].summary.wages, 4000.0);
        assert_eq!(table.rows[1].marks[0], Mark::Leave);
        assert_eq!(table.rows[1].marks[1], Mark::HalfDay);
        assert_eq!(table.rows[1].summary.work_days, 0.5);
        assert_eq!(table.totals().wages, 4400.0);
    }

    #[test]
    fn test_column_widths_fill_print_width() {
        let dates: Vec<NaiveDate> = (1..=31).map(d).collect();
        let columns = column_layout(&dates, A4_LANDSCAPE_PRINTABLE_WIDTH);

        assert_eq!(columns.len(), 3 + 31 + 4);
        let total: f64 = columns.iter().map(|c| c.width).sum();
        assert!((total - A4_LANDSCAPE_PRINTABLE_WIDTH).abs() < 1e-6);

        let name = columns.iter().find(|c| c.kind == ColumnKind::Name).unwrap();
        let date = columns.iter().find(|c| matches!(c.kind, ColumnKind::Date(_))).unwrap();
        assert!((name.width / date.width - 3.0 / 0.55).abs() < 1e-9);
        assert!(columns
            .iter()
            .filter(|c| matches!(c.kind, ColumnKind::Date(_)))
            .all(|c| (c.width - date.width).abs() < 1e-9));
    }

    #[test]
    fn test_header_on_every_page() {
        let mut snapshot = snapshot();
        snapshot.employees = roster(30);
        let table = ExportTable::from_snapshot(&snapshot);
        let setup = PageSetup {
            rows_per_page: 25,
            ..PageSetup::default()
        };
        let document = PrintDocument::render(&table, header(&snapshot), &setup, GlyphMode::Short);

        assert_eq!(document.pages.len(), 2);
        assert_eq!(document.pages[0].rows.len(), 25);
        assert_eq!(document.pages[1].rows.len(), 5);
        for page in &document.pages {
            assert_eq!(page.header.title, "Attendance Register");
            assert_eq!(page.header.window_label, "Week 2025-01-13 to 2025-01-19");
            assert_eq!(page.header.department_label, "Department: Carding");
        }

        let text = document.to_text();
        assert_eq!(text.matches("Week 2025-01-13 to 2025-01-19").count(), 2);
        assert!(text.contains("Page 2 of 2"));
    }

    #[test]
    fn test_empty_roster_renders_one_page() {
        let mut snapshot = snapshot();
        snapshot.employees.clear();
        let table = ExportTable::from_snapshot(&snapshot);
        let document = PrintDocument::render(&table, header(&snapshot), &PageSetup::default(), GlyphMode::Short);

        assert_eq!(document.pages.len(), 1);
        assert!(document.pages[0].rows.is_empty());
        assert_eq!(document.counts.total(), 0);
    }

    #[test]
    fn test_unavailable_dates_render_absent() {
        let mut snapshot = snapshot();
        snapshot.records.retain(|r| r.date != d(15));
        snapshot.unavailable.insert(d(15));
        let table = ExportTable::from_snapshot(&snapshot);
        let document = PrintDocument::render(&table, header(&snapshot), &PageSetup::default(), GlyphMode::Short);

        assert!(table.rows.iter().all(|row| row.marks[2] == Mark::Absent));
        assert!(document.notes.iter().any(|note| note.contains("2025-01-15")));
        assert_eq!(document.counts, scan_counts(&document, 7));
    }

    #[test]
    fn test_full_glyphs() {
        let table = ExportTable::from_snapshot(&snapshot());
        let sheet = FlatSheet::from_table(&table, GlyphMode::Full);

        assert_eq!(sheet.rows[0][3], "Present");
        assert_eq!(sheet.rows[1][3], "Leave");
        assert_eq!(sheet.rows[1][4], "Half Day");
        assert_eq!(sheet.rows[1][5], "Absent");
    }

    #[test]
    fn test_file_names_are_deterministic() {
        let snapshot = snapshot();

        assert_eq!(
            file_stem(&snapshot.window, &snapshot.department),
            "attendance_week_2025-01-13_2025-01-19_carding"
        );
        assert_eq!(
            default_file_name(ExportFormat::Print, &snapshot.window, &snapshot.department),
            "attendance_week_2025-01-13_2025-01-19_carding_print.pdf"
        );
        assert_eq!(
            default_file_name(ExportFormat::Csv, &snapshot.window, &DepartmentFilter::new(None)),
            "attendance_week_2025-01-13_2025-01-19_all-departments.csv"
        );
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_csv(ctx: &mut ExportTestContext) {
        let snapshot = snapshot();
        let output_path = ctx.temp_dir.path().join("register.csv");
        let exporter = Exporter::new(ExportFormat::Csv, Some(output_path.clone()), &snapshot, &ExportConfig::default());

        exporter.export(&snapshot).unwrap();

        let content = std::fs::read_to_string(&output_path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Token,Name,Department,2025-01-13,2025-01-14,2025-01-15,2025-01-16,2025-01-17,2025-01-18,2025-01-19,Work Days,Overtime Hours,Total Hours,Wages"
        );
        assert_eq!(lines.next().unwrap(), "T-001,Worker 1,Carding,P,P,P,P,P,A,A,5,0.00,40.00,4000.00");
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_print_and_excel(ctx: &mut ExportTestContext) {
        let snapshot = snapshot();
        let config = ExportConfig {
            output_dir: Some(ctx.temp_dir.path().to_path_buf()),
            ..ExportConfig::default()
        };

        for format in [ExportFormat::Print, ExportFormat::Excel] {
            let exporter = Exporter::new(format, None, &snapshot, &config);
            exporter.export(&snapshot).unwrap();

            let expected = ctx.temp_dir.path().join(default_file_name(format, &snapshot.window, &snapshot.department));
            assert_eq!(exporter.output_path(), expected.as_path());
            assert!(expected.exists());
            assert!(std::fs::metadata(&expected).unwrap().len() > 0);
        }

        let pdf = ctx.temp_dir.path().join(default_file_name(ExportFormat::Print, &snapshot.window, &snapshot.department));
        assert!(std::fs::read(&pdf).unwrap().starts_with(b"%PDF"));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_print_pdf_has_one_page_per_print_page(ctx: &mut ExportTestContext) {
        let mut snapshot = snapshot();
        snapshot.employees = roster(30);
        let output_path = ctx.temp_dir.path().join("register.pdf");
        let exporter = Exporter::new(ExportFormat::Print, Some(output_path.clone()), &snapshot, &ExportConfig::default())
            .with_rows_per_page(12);

        let table = exporter.export(&snapshot).unwrap();
        let document = exporter.print_document(&snapshot, &table);
        assert_eq!(document.pages.len(), 3);

        let pdf = lopdf::Document::load(&output_path).unwrap();
        assert_eq!(pdf.get_pages().len(), 3);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_print_pdf_for_empty_roster_has_a_page(ctx: &mut ExportTestContext) {
        let mut snapshot = snapshot();
        snapshot.employees.clear();
        snapshot.records.clear();
        let output_path = ctx.temp_dir.path().join("empty.pdf");

        Exporter::new(ExportFormat::Print, Some(output_path.clone()), &snapshot, &ExportConfig::default())
            .export(&snapshot)
            .unwrap();

        let pdf = lopdf::Document::load(&output_path).unwrap();
        assert_eq!(pdf.get_pages().len(), 1);
    }

    #[test]
    fn test_department_is_part_of_the_file_stem() {
        let window = ReportingWindow::new(Granularity::Month, d(15));
        let stems: BTreeSet<String> = ["நூற்பு", "சீவுதல்", "Spinning (A)", "Spinning A"]
            .iter()
            .map(|name| file_stem(&window, &DepartmentFilter::new(Some(name))))
            .collect();

        assert_eq!(stems.len(), 4);
        assert!(stems.contains("attendance_month_2025-01-01_2025-01-31_நூற்பு"));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_json(ctx: &mut ExportTestContext) {
        let snapshot = snapshot();
        let output_path = ctx.temp_dir.path().join("register.json");
        let exporter = Exporter::new(ExportFormat::Json, Some(output_path.clone()), &snapshot, &ExportConfig::default())
            .with_glyphs(GlyphMode::Full);

        exporter.export(&snapshot).unwrap();

        let content = std::fs::read_to_string(&output_path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["window"], "Week 2025-01-13 to 2025-01-19");
        assert_eq!(json["rows"][0]["tokenNumber"], "T-001");
        assert_eq!(json["rows"][0]["marks"]["2025-01-13"], "Present");
        assert_eq!(json["rows"][1]["marks"]["2025-01-13"], "Leave");
        assert_eq!(json["counts"]["present"], 5);
        assert_eq!(json["totals"]["wages"], 4400.0);
    }
}
