use super::parse_date;
use crate::{
    api::Store,
    libs::{
        config::Config,
        employee::DepartmentFilter,
        fetch::WindowSnapshot,
        glyph::GlyphMode,
        messages::Message,
        summary::{StatusCounts, WindowTotals},
        view::View,
        window::{Granularity, ReportingWindow},
    },
    msg_print, msg_warning,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SumArgs {
    #[arg(value_enum, default_value = "month")]
    granularity: Granularity,

    #[arg(short, long, default_value = "today", help = "Any date inside the window")]
    date: String,

    #[arg(long, help = "Department to report on; all departments when omitted")]
    department: Option<String>,

    #[arg(short, long, value_enum)]
    glyphs: Option<GlyphMode>,

    #[arg(long, help = "Read from a JSON snapshot instead of the attendance API")]
    snapshot: Option<PathBuf>,
}

pub async fn cmd(args: SumArgs) -> Result<()> {
    let config = Config::read()?;
    let window = ReportingWindow::new(args.granularity, parse_date(&args.date)?);
    let department = DepartmentFilter::new(args.department.as_deref());
    let mode = args.glyphs.unwrap_or(config.export_settings().glyphs);

    let store = Store::open(args.snapshot.as_deref(), &config)?;
    let snapshot = WindowSnapshot::fetch(&store, window, department).await?;

    msg_print!(Message::SummaryHeader(snapshot.window.label()), true);
    msg_print!(Message::DepartmentHeader(snapshot.department.label()));
    if snapshot.employees.is_empty() {
        msg_warning!(Message::NoEmployees);
        return Ok(());
    }

    let map = snapshot.attendance_map();
    let summaries = snapshot.summaries(&map);
    let dates = snapshot.window.dates();

    match snapshot.window.granularity() {
        Granularity::Day => View::day(&snapshot.employees, &map, snapshot.window.reference(), &summaries)?,
        Granularity::Week | Granularity::Month => View::grid(&snapshot.employees, dates, &map, &summaries, mode)?,
    }

    msg_print!(Message::StatusCountsHeader, true);
    View::counts(&StatusCounts::from_map(&map, dates, &snapshot.employees))?;

    msg_print!(Message::SummaryTotalsHeader, true);
    View::totals(&WindowTotals::of(&summaries))?;

    Ok(())
}
