//! Command-line interface.
//!
//! ```text
//! millroll init                                  # configure store and export settings
//! millroll sum week --date 2025-01-15            # weekly grid with wages
//! millroll mark -e 7 --shift 1 --overtime 2      # edit and submit a day record
//! millroll export month --format print           # paginated register
//! millroll shifts                                # standard shift catalog
//! ```
//!
//! Read commands accept `--snapshot <file>` to work from a JSON snapshot of
//! the store instead of the API.

pub mod export;
pub mod init;
pub mod mark;
pub mod shifts;
pub mod sum;

use crate::libs::messages::Message;
use crate::msg_bail_anyhow;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Attendance and wage summary for a day, week or month")]
    Sum(sum::SumArgs),
    #[command(about = "Edit one employee's attendance for a date and submit it")]
    Mark(mark::MarkArgs),
    #[command(about = "Export the attendance register")]
    Export(export::ExportArgs),
    #[command(about = "List the standard shifts")]
    Shifts,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Sum(args) => sum::cmd(args).await,
            Commands::Mark(args) => mark::cmd(args).await,
            Commands::Export(args) => export::cmd(args).await,
            Commands::Shifts => shifts::cmd(),
        }
    }
}

/// Parses `YYYY-MM-DD`, or `today` for the local date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    if value.trim().eq_ignore_ascii_case("today") {
        return Ok(Local::now().date_naive());
    }
    match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(_) => msg_bail_anyhow!(Message::InvalidDate(value.to_string())),
    }
}
