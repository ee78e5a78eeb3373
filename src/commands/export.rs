use super::parse_date;
use crate::{
    api::Store,
    libs::{
        config::Config,
        employee::DepartmentFilter,
        export::{ExportFormat, Exporter},
        fetch::WindowSnapshot,
        glyph::GlyphMode,
        messages::Message,
        window::{Granularity, ReportingWindow},
    },
    msg_bail_anyhow, msg_info, msg_print, msg_warning,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(value_enum, default_value = "month")]
    granularity: Granularity,

    #[arg(short, long, value_enum, default_value = "print")]
    format: ExportFormat,

    #[arg(short, long, default_value = "today", help = "Any date inside the window")]
    date: String,

    #[arg(long, help = "Department to export; all departments when omitted")]
    department: Option<String>,

    #[arg(short, long, value_enum)]
    glyphs: Option<GlyphMode>,

    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, help = "Employees per printed page")]
    rows_per_page: Option<usize>,

    #[arg(long, help = "Print a text preview of the paginated register")]
    preview: bool,

    #[arg(long, help = "Read from a JSON snapshot instead of the attendance API")]
    snapshot: Option<PathBuf>,
}

pub async fn cmd(args: ExportArgs) -> Result<()> {
    let config = Config::read()?;
    let settings = config.export_settings();
    let window = ReportingWindow::new(args.granularity, parse_date(&args.date)?);
    let department = DepartmentFilter::new(args.department.as_deref());

    let mut exporter_rows = settings.rows_per_page;
    if let Some(rows) = args.rows_per_page {
        if rows == 0 {
            msg_bail_anyhow!(Message::InvalidRowsPerPage);
        }
        exporter_rows = rows;
    }

    msg_info!(Message::ExportingData(format!("{:?}", args.format).to_lowercase()));

    let store = Store::open(args.snapshot.as_deref(), &config)?;
    let snapshot = WindowSnapshot::fetch_for_export(&store, window, department).await?;
    if snapshot.employees.is_empty() {
        msg_warning!(Message::NoEmployees);
    }

    let exporter = Exporter::new(args.format, args.output, &snapshot, &settings)
        .with_glyphs(args.glyphs.unwrap_or(settings.glyphs))
        .with_rows_per_page(exporter_rows);
    let table = exporter.export(&snapshot)?;

    if !table.unavailable.is_empty() {
        let dates = table.unavailable.iter().map(|d| d.to_string()).collect::<Vec<_>>().join(", ");
        msg_warning!(Message::ExportDatesUnavailable(dates));
    }

    if args.preview {
        msg_print!(exporter.print_document(&snapshot, &table).to_text());
    }

    Ok(())
}
