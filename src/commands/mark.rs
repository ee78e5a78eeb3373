use super::parse_date;
use crate::{
    api::{AttendanceStore, Store},
    libs::{
        config::Config,
        employee::EmployeeId,
        messages::Message,
        record::{time_from_str, DayRecord, RecordEdit, ShiftSelection},
        view::View,
    },
    msg_bail_anyhow, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::NaiveTime;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct MarkArgs {
    #[arg(short, long, help = "Employee id")]
    employee: EmployeeId,

    #[arg(short, long, default_value = "today")]
    date: String,

    #[arg(short, long, help = "SHIFT_1, SHIFT_2, SHIFT_3, absent or manual")]
    shift: Option<String>,

    #[arg(long = "in", help = "Clock-in time HH:MM, '-' to clear")]
    in_time: Option<String>,

    #[arg(long = "out", help = "Clock-out time HH:MM, '-' to clear")]
    out_time: Option<String>,

    #[arg(long, help = "Overtime hours")]
    overtime: Option<f64>,

    #[arg(long, help = "Read from a JSON snapshot (implies no submission)")]
    snapshot: Option<PathBuf>,

    #[arg(long, help = "Show the resulting record without submitting it")]
    dry_run: bool,
}

pub async fn cmd(args: MarkArgs) -> Result<()> {
    let config = Config::read()?;
    let date = parse_date(&args.date)?;
    let edits = edits(&args)?;
    if edits.is_empty() {
        msg_bail_anyhow!(Message::RecordNoEdits);
    }

    let store = Store::open(args.snapshot.as_deref(), &config)?;
    let employees = store.fetch_employees().await?;
    let Some(employee) = employees.into_iter().find(|e| e.id == args.employee) else {
        msg_bail_anyhow!(Message::EmployeeNotFound(args.employee));
    };

    let current = store
        .fetch_by_date(date)
        .await?
        .iter()
        .filter(|row| row.employee_id == employee.id)
        .last()
        .map(|row| DayRecord::from_raw(date, row))
        .unwrap_or_else(|| DayRecord::absent(employee.id, date));

    let record = edits.into_iter().fold(current, DayRecord::apply);

    msg_print!(Message::RecordPreview(employee.name.clone(), date.to_string()), true);
    View::record(&record)?;

    if args.dry_run || args.snapshot.is_some() {
        msg_info!(Message::RecordDryRun);
        return Ok(());
    }

    store.submit_attendance(date, std::slice::from_ref(&record)).await?;
    msg_success!(Message::RecordSubmitted(employee.name, date.to_string()));

    Ok(())
}

/// Edits in the order a clerk fills the form: shift, clock times, overtime.
fn edits(args: &MarkArgs) -> Result<Vec<RecordEdit>> {
    let mut edits = Vec::new();

    if let Some(shift) = &args.shift {
        edits.push(RecordEdit::Shift(ShiftSelection::parse(shift)?));
    }

    match (&args.in_time, &args.out_time) {
        (Some(in_time), Some(out_time)) => edits.push(RecordEdit::Times {
            in_time: parse_clock(in_time)?,
            out_time: parse_clock(out_time)?,
        }),
        (Some(in_time), None) => edits.push(RecordEdit::InTime(parse_clock(in_time)?)),
        (None, Some(out_time)) => edits.push(RecordEdit::OutTime(parse_clock(out_time)?)),
        (None, None) => {}
    }

    if let Some(hours) = args.overtime {
        edits.push(RecordEdit::Overtime(hours));
    }

    Ok(edits)
}

fn parse_clock(value: &str) -> Result<Option<NaiveTime>> {
    let value = value.trim();
    if value.is_empty() || value == "-" {
        return Ok(None);
    }
    match time_from_str(value) {
        Some(time) => Ok(Some(time)),
        None => msg_bail_anyhow!(Message::InvalidTime(value.to_string())),
    }
}
