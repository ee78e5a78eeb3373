//! Console tables for summaries, single records and the shift catalog.

use super::attendance::AttendanceMap;
use super::employee::Employee;
use super::formatter::{format_amount, format_days, format_hours, format_time};
use super::glyph::{glyph, GlyphMode, Mark};
use super::record::DayRecord;
use super::shift::Shift;
use super::summary::{EmployeeWindowSummary, StatusCounts, WindowTotals};
use anyhow::Result;
use chrono::NaiveDate;
use prettytable::{row, Cell, Row, Table};

pub struct View {}

impl View {
    /// One line per employee for a single date, with clock times.
    pub fn day(employees: &[Employee], map: &AttendanceMap, date: NaiveDate, summaries: &[EmployeeWindowSummary]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["TOKEN", "NAME", "SHIFT", "IN", "OUT", "OT", "HOURS", "STATUS", "WAGES"]);
        for employee in employees {
            let Some(record) = map.get(date, employee.id) else {
                continue;
            };
            let wages = summaries
                .iter()
                .find(|s| s.employee_id == employee.id)
                .map(|s| format_amount(s.wages))
                .unwrap_or_default();
            table.add_row(row![
                employee.token_number,
                employee.name,
                record.shift,
                format_time(record.in_time),
                format_time(record.out_time),
                format_hours(record.overtime_hours),
                format_hours(record.total_hours),
                glyph(Mark::of(record), GlyphMode::Full),
                wages
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Glyph grid over the window followed by the summary columns.
    pub fn grid(
        employees: &[Employee],
        dates: &[NaiveDate],
        map: &AttendanceMap,
        summaries: &[EmployeeWindowSummary],
        mode: GlyphMode,
    ) -> Result<()> {
        let mut table = Table::new();

        let mut titles = vec![Cell::new("TOKEN"), Cell::new("NAME")];
        titles.extend(dates.iter().map(|d| Cell::new(&d.format("%d").to_string())));
        titles.extend(["DAYS", "OT", "HOURS", "WAGES"].map(Cell::new));
        table.set_titles(Row::new(titles));

        for (employee, summary) in employees.iter().zip(summaries) {
            let mut cells = vec![Cell::new(&employee.token_number), Cell::new(&employee.name)];
            cells.extend(dates.iter().map(|&date| {
                let mark = map.get(date, employee.id).map(Mark::of).unwrap_or(Mark::Absent);
                Cell::new(glyph(mark, mode))
            }));
            cells.extend([
                Cell::new(&format_days(summary.work_days)),
                Cell::new(&format_hours(summary.total_overtime_hours)),
                Cell::new(&format_hours(summary.total_hours)),
                Cell::new(&format_amount(summary.wages)),
            ]);
            table.add_row(Row::new(cells));
        }
        table.printstd();

        Ok(())
    }

    pub fn totals(totals: &WindowTotals) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["WORK DAYS", "OVERTIME", "HOURS", "WAGES"]);
        table.add_row(row![
            format_days(totals.work_days),
            format_hours(totals.total_overtime_hours),
            format_hours(totals.total_hours),
            format_amount(totals.wages)
        ]);
        table.printstd();

        Ok(())
    }

    pub fn counts(counts: &StatusCounts) -> Result<()> {
        let mut table = Table::new();

        table.add_row(Row::new(Mark::ALL.iter().map(|&m| Cell::new(glyph(m, GlyphMode::Full))).collect()));
        table.add_row(Row::new(Mark::ALL.iter().map(|&m| Cell::new(&counts.get(m).to_string())).collect()));
        table.printstd();

        Ok(())
    }

    pub fn record(record: &DayRecord) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["SHIFT", "IN", "OUT", "OT", "HOURS", "STATUS"]);
        table.add_row(row![
            record.shift,
            format_time(record.in_time),
            format_time(record.out_time),
            format_hours(record.overtime_hours),
            format_hours(record.total_hours),
            glyph(Mark::of(record), GlyphMode::Full)
        ]);
        table.printstd();

        Ok(())
    }

    pub fn shifts() -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["SHIFT", "IN", "OUT", "HOURS"]);
        for shift in Shift::ALL {
            let (start, end) = shift.times();
            table.add_row(row![shift, format_time(Some(start)), format_time(Some(end)), format_hours(shift.hours())]);
        }
        table.printstd();

        Ok(())
    }
}
