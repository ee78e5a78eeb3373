//! Attendance register export.
//!
//! Two layouts are rendered from the same [`ExportTable`], one row per
//! employee:
//!
//! - **Print register**: a paginated document with a fixed-ratio column
//!   layout. The title, window and department header repeats on every page.
//!   It is written as an A4 landscape PDF, and a text preview is available.
//! - **Flat sheet**: a header row and one row per employee, written as CSV,
//!   Excel or JSON.
//!
//! The count panel above the register is computed from the table's own
//! cells, so it always matches the grid.
//!
//! ## File Naming
//!
//! Names depend only on the window and the department, so exporting the
//! same window twice produces the same file:
//!
//! ```text
//! attendance_week_2025-01-13_2025-01-19_carding_print.pdf
//! attendance_month_2025-02-01_2025-02-28_all-departments.csv
//! ```

use crate::libs::attendance::AttendanceMap;
use crate::libs::config::ExportConfig;
use crate::libs::employee::{DepartmentFilter, Employee};
use crate::libs::fetch::WindowSnapshot;
use crate::libs::formatter::{format_amount, format_days, format_hours};
use crate::libs::glyph::{glyph, legend, GlyphMode, Mark};
use crate::libs::messages::Message;
use crate::libs::summary::{EmployeeWindowSummary, StatusCounts, WindowTotals};
use crate::libs::window::ReportingWindow;
use crate::msg_success;
use anyhow::Result;
use chrono::NaiveDate;
use prettytable::{Cell, Row, Table};
use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point};
use rust_xlsxwriter::{Color, Format, Workbook};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// A4 landscape (842pt) minus 28pt margins on both sides.
pub const A4_LANDSCAPE_PRINTABLE_WIDTH: f64 = 786.0;
pub const DEFAULT_ROWS_PER_PAGE: usize = 25;

/// A4 landscape in points.
const A4_LANDSCAPE_WIDTH: f64 = 842.0;
const A4_LANDSCAPE_HEIGHT: f64 = 595.0;
const PAGE_MARGIN: f64 = 28.0;
/// Space kept above the bottom margin for the legend and notes.
const NOTES_BAND: f64 = 30.0;
const MAX_ROW_HEIGHT: f64 = 16.0;
const CELL_FONT_SIZE: f64 = 8.0;
const CELL_PADDING: f64 = 2.0;
const MM_PER_POINT: f64 = 25.4 / 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Paginated print register (A4 landscape PDF)
    Print,
    Csv,
    Excel,
    Json,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Print => "pdf",
            ExportFormat::Excel => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Column of the print register.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnKind {
    Token,
    Name,
    Department,
    Date(NaiveDate),
    WorkDays,
    Overtime,
    TotalHours,
    Wages,
}

impl ColumnKind {
    /// Relative share of the printable width.
    pub fn weight(self) -> f64 {
        match self {
            ColumnKind::Token => 1.2,
            ColumnKind::Name => 3.0,
            ColumnKind::Department => 1.6,
            ColumnKind::Date(_) => 0.55,
            ColumnKind::WorkDays | ColumnKind::Overtime | ColumnKind::TotalHours | ColumnKind::Wages => 1.0,
        }
    }

    pub fn title(self) -> String {
        match self {
            ColumnKind::Token => "Token".to_string(),
            ColumnKind::Name => "Name".to_string(),
            ColumnKind::Department => "Dept".to_string(),
            ColumnKind::Date(date) => date.format("%d").to_string(),
            ColumnKind::WorkDays => "Days".to_string(),
            ColumnKind::Overtime => "OT Hrs".to_string(),
            ColumnKind::TotalHours => "Total Hrs".to_string(),
            ColumnKind::Wages => "Wages".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    pub kind: ColumnKind,
    /// Width in points.
    pub width: f64,
}

/// Column order and widths of the register.
///
/// Weights are normalised to sum to 1 and scaled to `printable_width`, so a
/// 28-day and a 31-day month fill the page alike.
pub fn column_layout(dates: &[NaiveDate], printable_width: f64) -> Vec<ColumnLayout> {
    let kinds: Vec<ColumnKind> = [ColumnKind::Token, ColumnKind::Name, ColumnKind::Department]
        .into_iter()
        .chain(dates.iter().map(|&d| ColumnKind::Date(d)))
        .chain([ColumnKind::WorkDays, ColumnKind::Overtime, ColumnKind::TotalHours, ColumnKind::Wages])
        .collect();

    let total_weight: f64 = kinds.iter().map(|k| k.weight()).sum();
    kinds
        .into_iter()
        .map(|kind| ColumnLayout {
            kind,
            width: kind.weight() / total_weight * printable_width,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub token_number: String,
    pub name: String,
    pub department: String,
    #[serde(skip)]
    pub marks: Vec<Mark>,
    pub summary: EmployeeWindowSummary,
}

/// The shared input of every export layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<ExportRow>,
    pub unavailable: BTreeSet<NaiveDate>,
}

impl ExportTable {
    pub fn build(employees: &[Employee], dates: &[NaiveDate], map: &AttendanceMap, summaries: &[EmployeeWindowSummary]) -> Self {
        let rows = employees
            .iter()
            .map(|employee| {
                let marks = dates
                    .iter()
                    .map(|&date| map.get(date, employee.id).map(Mark::of).unwrap_or(Mark::Absent))
                    .collect();
                let summary = summaries
                    .iter()
                    .find(|s| s.employee_id == employee.id)
                    .cloned()
                    .unwrap_or_else(|| crate::libs::summary::summarize(map, dates, employee));
                ExportRow {
                    token_number: employee.token_number.clone(),
                    name: employee.name.clone(),
                    department: employee.department.clone().unwrap_or_default(),
                    marks,
                    summary,
                }
            })
            .collect();

        Self {
            dates: dates.to_vec(),
            rows,
            unavailable: BTreeSet::new(),
        }
    }

    pub fn from_snapshot(snapshot: &WindowSnapshot) -> Self {
        let map = snapshot.attendance_map();
        let summaries = snapshot.summaries(&map);
        Self {
            unavailable: snapshot.unavailable.clone(),
            ..Self::build(&snapshot.employees, snapshot.window.dates(), &map, &summaries)
        }
    }

    /// Counts obtained by scanning the table cells.
    pub fn status_counts(&self) -> StatusCounts {
        self.rows.iter().flat_map(|row| row.marks.iter().copied()).collect()
    }

    pub fn totals(&self) -> WindowTotals {
        let summaries: Vec<EmployeeWindowSummary> = self.rows.iter().map(|row| row.summary.clone()).collect();
        WindowTotals::of(&summaries)
    }

    fn cells(&self, row: &ExportRow, mode: GlyphMode) -> Vec<String> {
        let mut cells = vec![row.token_number.clone(), row.name.clone(), row.department.clone()];
        cells.extend(row.marks.iter().map(|&mark| glyph(mark, mode).to_string()));
        cells.extend(summary_cells(&row.summary));
        cells
    }

    fn totals_cells(&self) -> Vec<String> {
        let totals = self.totals();
        let mut cells = vec!["".to_string(), "Total".to_string(), "".to_string()];
        cells.extend(self.dates.iter().map(|_| "".to_string()));
        cells.extend([
            format_days(totals.work_days),
            format_hours(totals.total_overtime_hours),
            format_hours(totals.total_hours),
            format_amount(totals.wages),
        ]);
        cells
    }

    fn notes(&self) -> Vec<String> {
        let mut notes = vec![legend()];
        if !self.unavailable.is_empty() {
            let dates = self.unavailable.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect::<Vec<_>>().join(", ");
            notes.push(Message::ExportDatesUnavailable(dates).to_string());
        }
        notes
    }
}

fn summary_cells(summary: &EmployeeWindowSummary) -> [String; 4] {
    [
        format_days(summary.work_days),
        format_hours(summary.total_overtime_hours),
        format_hours(summary.total_hours),
        format_amount(summary.wages),
    ]
}

fn counts_line(counts: &StatusCounts) -> String {
    Mark::ALL
        .iter()
        .map(|&mark| format!("{}: {}", glyph(mark, GlyphMode::Full), counts.get(mark)))
        .collect::<Vec<_>>()
        .join("   ")
}

/// Header repeated on every printed page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHeader {
    pub title: String,
    pub window_label: String,
    pub department_label: String,
}

impl DocumentHeader {
    pub fn new(title: &str, window: &ReportingWindow, department: &DepartmentFilter) -> Self {
        Self {
            title: title.to_string(),
            window_label: window.label(),
            department_label: format!("Department: {}", department.label()),
        }
    }

    pub fn lines(&self) -> [&str; 3] {
        [self.title.as_str(), self.window_label.as_str(), self.department_label.as_str()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    /// Printable width in points.
    pub printable_width: f64,
    pub rows_per_page: usize,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            printable_width: A4_LANDSCAPE_PRINTABLE_WIDTH,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintPage {
    pub number: usize,
    pub header: DocumentHeader,
    pub rows: Vec<Vec<String>>,
}

/// Paginated print layout of the register.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintDocument {
    pub header: DocumentHeader,
    pub counts: StatusCounts,
    pub columns: Vec<ColumnLayout>,
    pub pages: Vec<PrintPage>,
    pub totals: Vec<String>,
    pub notes: Vec<String>,
}

impl PrintDocument {
    pub fn render(table: &ExportTable, header: DocumentHeader, setup: &PageSetup, mode: GlyphMode) -> Self {
        let rows_per_page = setup.rows_per_page.max(1);
        let rows: Vec<Vec<String>> = table.rows.iter().map(|row| table.cells(row, mode)).collect();

        let mut pages: Vec<PrintPage> = rows
            .chunks(rows_per_page)
            .enumerate()
            .map(|(i, chunk)| PrintPage {
                number: i + 1,
                header: header.clone(),
                rows: chunk.to_vec(),
            })
            .collect();
        if pages.is_empty() {
            pages.push(PrintPage {
                number: 1,
                header: header.clone(),
                rows: Vec::new(),
            });
        }

        Self {
            counts: table.status_counts(),
            columns: column_layout(&table.dates, setup.printable_width),
            header,
            pages,
            totals: table.totals_cells(),
            notes: table.notes(),
        }
    }

    pub fn column_titles(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.kind.title()).collect()
    }

    /// Plain-text preview, one table per page.
    pub fn to_text(&self) -> String {
        let page_count = self.pages.len();
        let mut out = String::new();
        for page in &self.pages {
            for line in page.header.lines() {
                out.push_str(line);
                out.push('\n');
            }
            out.push_str(&counts_line(&self.counts));
            out.push('\n');

            let mut table = Table::new();
            table.set_titles(Row::new(self.column_titles().iter().map(|t| Cell::new(t)).collect()));
            for cells in &page.rows {
                table.add_row(Row::new(cells.iter().map(|c| Cell::new(c)).collect()));
            }
            if page.number == page_count {
                table.add_row(Row::new(self.totals.iter().map(|c| Cell::new(c)).collect()));
            }
            out.push_str(&table.to_string());
            out.push_str(&format!("Page {} of {}\n\n", page.number, page_count));
        }
        for note in &self.notes {
            out.push_str(note);
            out.push('\n');
        }
        out
    }

    /// Writes the register as an A4 landscape PDF, one page per [`PrintPage`].
    ///
    /// Column widths come straight from the ratio layout. The header, the
    /// count panel and the column titles are drawn on every page; the totals
    /// row and the notes close the last page.
    pub fn write_pdf(&self, path: &Path) -> Result<()> {
        let (doc, first_page, first_layer) = PdfDocument::new(self.header.title.as_str(), mm(A4_LANDSCAPE_WIDTH), mm(A4_LANDSCAPE_HEIGHT), "Register");
        let fonts = PdfFonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
        };

        let page_count = self.pages.len();
        for (i, page) in self.pages.iter().enumerate() {
            let layer = if i == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page_index, layer_index) = doc.add_page(mm(A4_LANDSCAPE_WIDTH), mm(A4_LANDSCAPE_HEIGHT), "Register");
                doc.get_page(page_index).get_layer(layer_index)
            };
            self.draw_page(&layer, &fonts, page, page_count);
        }

        doc.save(&mut BufWriter::new(File::create(path)?))?;
        Ok(())
    }

    fn draw_page(&self, layer: &PdfLayerReference, fonts: &PdfFonts, page: &PrintPage, page_count: usize) {
        let left = PAGE_MARGIN;
        let right = A4_LANDSCAPE_WIDTH - PAGE_MARGIN;
        let is_last = page.number == page_count;

        let mut y = A4_LANDSCAPE_HEIGHT - PAGE_MARGIN - 14.0;
        layer.use_text(page.header.title.as_str(), 14.0, mm(left), mm(y), &fonts.bold);
        for line in [&page.header.window_label, &page.header.department_label] {
            y -= 14.0;
            layer.use_text(line.as_str(), 10.0, mm(left), mm(y), &fonts.regular);
        }
        y -= 14.0;
        layer.use_text(counts_line(&self.counts), 9.0, mm(left), mm(y), &fonts.regular);
        y -= 8.0;

        // Title row, the page's rows and, on the last page, the totals row
        let body_rows = self.pages.iter().map(|p| p.rows.len()).max().unwrap_or(0) + 2;
        let available = y - PAGE_MARGIN - NOTES_BAND;
        let row_height = (available / body_rows as f64).min(MAX_ROW_HEIGHT);
        let font_size = (row_height * 0.6).clamp(4.0, CELL_FONT_SIZE);

        let titles = self.column_titles();
        let mut rows: Vec<(&[String], bool)> = Vec::new();
        rows.push((titles.as_slice(), true));
        rows.extend(page.rows.iter().map(|cells| (cells.as_slice(), false)));
        if is_last {
            rows.push((self.totals.as_slice(), true));
        }

        layer.set_outline_thickness(0.5);
        let table_top = y;
        draw_rule(layer, left, right, y);
        for (cells, bold) in rows {
            let baseline = y - row_height + (row_height - font_size) / 2.0 + 1.0;
            let mut x = left;
            for (column, value) in self.columns.iter().zip(cells) {
                let font = if bold { &fonts.bold } else { &fonts.regular };
                let text = fit_to_width(value, column.width - 2.0 * CELL_PADDING, font_size);
                layer.use_text(text, font_size as f32, mm(x + CELL_PADDING), mm(baseline), font);
                x += column.width;
            }
            y -= row_height;
            draw_rule(layer, left, right, y);
        }

        let mut x = left;
        draw_column_rule(layer, x, table_top, y);
        for column in &self.columns {
            x += column.width;
            draw_column_rule(layer, x, table_top, y);
        }

        if is_last {
            let mut note_y = PAGE_MARGIN + NOTES_BAND - 10.0;
            for note in &self.notes {
                layer.use_text(note.as_str(), 8.0, mm(left), mm(note_y), &fonts.regular);
                note_y -= 10.0;
            }
        }

        let footer = format!("Page {} of {}", page.number, page_count);
        let footer_x = A4_LANDSCAPE_WIDTH / 2.0 - text_width(&footer, 8.0) / 2.0;
        layer.use_text(footer, 8.0, mm(footer_x), mm(PAGE_MARGIN / 2.0), &fonts.regular);
    }
}

struct PdfFonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn mm(points: f64) -> Mm {
    Mm((points * MM_PER_POINT) as f32)
}

fn draw_rule(layer: &PdfLayerReference, from_x: f64, to_x: f64, y: f64) {
    layer.add_line(Line {
        points: vec![(Point::new(mm(from_x), mm(y)), false), (Point::new(mm(to_x), mm(y)), false)],
        is_closed: false,
    });
}

fn draw_column_rule(layer: &PdfLayerReference, x: f64, top: f64, bottom: f64) {
    layer.add_line(Line {
        points: vec![(Point::new(mm(x), mm(top)), false), (Point::new(mm(x), mm(bottom)), false)],
        is_closed: false,
    });
}

/// Rough Helvetica advance, enough to keep text inside its cell.
fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * 0.5
}

fn fit_to_width(text: &str, width: f64, font_size: f64) -> String {
    if text_width(text, font_size) <= width {
        return text.to_string();
    }
    let keep = ((width / (font_size * 0.5)) as usize).saturating_sub(1);
    let mut fitted: String = text.chars().take(keep).collect();
    fitted.push('.');
    fitted
}

/// Flat grid: a header row and one row per employee.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatSheet {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl FlatSheet {
    pub fn from_table(table: &ExportTable, mode: GlyphMode) -> Self {
        let mut header = vec!["Token".to_string(), "Name".to_string(), "Department".to_string()];
        header.extend(table.dates.iter().map(|d| d.format("%Y-%m-%d").to_string()));
        header.extend(["Work Days", "Overtime Hours", "Total Hours", "Wages"].map(String::from));

        Self {
            header,
            rows: table.rows.iter().map(|row| table.cells(row, mode)).collect(),
        }
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(&self.header)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn write_xlsx(&self, path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let header_format = Format::new().set_bold().set_background_color(Color::Gray);

        for (col, title) in self.header.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, title, &header_format)?;
        }
        for (i, cells) in self.rows.iter().enumerate() {
            let row = i as u32 + 1;
            for (col, value) in cells.iter().enumerate() {
                worksheet.write_string(row, col as u16, value)?;
            }
        }

        worksheet.autofit();
        workbook.save(path)?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonExport<'a> {
    title: &'a str,
    window: &'a str,
    department: &'a str,
    counts: StatusCounts,
    rows: Vec<JsonExportRow<'a>>,
    totals: WindowTotals,
    unavailable_dates: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonExportRow<'a> {
    #[serde(flatten)]
    row: &'a ExportRow,
    marks: BTreeMap<String, &'static str>,
}

/// Deterministic file stem for a window and department.
pub fn file_stem(window: &ReportingWindow, department: &DepartmentFilter) -> String {
    format!("attendance_{}_{}_{}", window.granularity(), window.range_key(), department.slug())
}

pub fn default_file_name(format: ExportFormat, window: &ReportingWindow, department: &DepartmentFilter) -> String {
    let suffix = if format == ExportFormat::Print { "_print" } else { "" };
    format!("{}{}.{}", file_stem(window, department), suffix, format.extension())
}

/// Writes one export of a fetched window.
pub struct Exporter {
    format: ExportFormat,
    mode: GlyphMode,
    setup: PageSetup,
    title: String,
    output_path: PathBuf,
}

impl Exporter {
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>, snapshot: &WindowSnapshot, config: &ExportConfig) -> Self {
        let output_path = output_path.unwrap_or_else(|| {
            let name = default_file_name(format, &snapshot.window, &snapshot.department);
            match &config.output_dir {
                Some(dir) => dir.join(name),
                None => PathBuf::from(name),
            }
        });

        Self {
            format,
            mode: config.glyphs,
            setup: PageSetup {
                rows_per_page: config.rows_per_page,
                ..PageSetup::default()
            },
            title: config.title.clone(),
            output_path,
        }
    }

    pub fn with_glyphs(mut self, mode: GlyphMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_rows_per_page(mut self, rows_per_page: usize) -> Self {
        self.setup.rows_per_page = rows_per_page;
        self
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn print_document(&self, snapshot: &WindowSnapshot, table: &ExportTable) -> PrintDocument {
        let header = DocumentHeader::new(&self.title, &snapshot.window, &snapshot.department);
        PrintDocument::render(table, header, &self.setup, self.mode)
    }

    pub fn export(&self, snapshot: &WindowSnapshot) -> Result<ExportTable> {
        let table = ExportTable::from_snapshot(snapshot);

        match self.format {
            ExportFormat::Print => self.print_document(snapshot, &table).write_pdf(&self.output_path)?,
            ExportFormat::Csv => FlatSheet::from_table(&table, self.mode).write_csv(&self.output_path)?,
            ExportFormat::Excel => FlatSheet::from_table(&table, self.mode).write_xlsx(&self.output_path)?,
            ExportFormat::Json => self.export_json(snapshot, &table)?,
        }

        msg_success!(Message::ExportCompleted(self.output_path.display().to_string()));
        Ok(table)
    }

    fn export_json(&self, snapshot: &WindowSnapshot, table: &ExportTable) -> Result<()> {
        let header = DocumentHeader::new(&self.title, &snapshot.window, &snapshot.department);
        let export = JsonExport {
            title: &header.title,
            window: &header.window_label,
            department: &header.department_label,
            counts: table.status_counts(),
            rows: table
                .rows
                .iter()
                .map(|row| JsonExportRow {
                    row,
                    marks: table
                        .dates
                        .iter()
                        .zip(&row.marks)
                        .map(|(date, &mark)| (date.format("%Y-%m-%d").to_string(), glyph(mark, self.mode)))
                        .collect(),
                })
                .collect(),
            totals: table.totals(),
            unavailable_dates: table.unavailable.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect(),
        };

        let json = serde_json::to_string_pretty(&export)?;
        File::create(&self.output_path)?.write_all(json.as_bytes())?;
        Ok(())
    }
}

