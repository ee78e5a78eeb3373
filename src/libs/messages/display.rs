//! Text of every [`Message`] variant.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let s = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleStore => "Attendance store settings".to_string(),
            Message::ConfigModuleExport => "Export settings".to_string(),
            Message::PromptSelectModules => "Select modules to configure (space to toggle, enter to confirm)".to_string(),
            Message::PromptStoreApiUrl => "Enter the attendance API URL".to_string(),
            Message::PromptStoreAuthToken => "Enter the API token (leave empty for none)".to_string(),
            Message::PromptExportTitle => "Enter the register title".to_string(),
            Message::PromptExportRowsPerPage => "Employees per printed page".to_string(),
            Message::PromptExportGlyphs => "Status glyphs".to_string(),
            Message::PromptExportOutputDir => "Export directory (leave empty for the current one)".to_string(),

            // === SUMMARY MESSAGES ===
            Message::SummaryHeader(label) => format!("Attendance for {}", label),
            Message::DepartmentHeader(label) => format!("Department: {}", label),
            Message::SummaryTotalsHeader => "Totals".to_string(),
            Message::StatusCountsHeader => "Status counts".to_string(),
            Message::ShiftCatalogHeader => "Standard shifts".to_string(),
            Message::NoEmployees => "No employees match the selected department".to_string(),

            // === RECORD MESSAGES ===
            Message::EmployeeNotFound(id) => format!("Employee {} not found", id),
            Message::RecordPreview(name, date) => format!("{} on {}", name, date),
            Message::RecordSubmitted(name, date) => format!("Attendance for {} on {} submitted", name, date),
            Message::RecordDryRun => "Dry run, nothing was submitted".to_string(),
            Message::RecordNoEdits => "No changes given; use --shift, --in, --out or --overtime".to_string(),

            // === EXPORT MESSAGES ===
            Message::ExportingData(format) => format!("Exporting attendance as {}...", format),
            Message::ExportCompleted(path) => format!("Register exported to: {}", path),
            Message::ExportDatesUnavailable(dates) => format!("Attendance unavailable, shown as absent: {}", dates),

            // === INPUT ERRORS ===
            Message::InvalidDate(value) => format!("Invalid date '{}', expected YYYY-MM-DD or 'today'", value),
            Message::InvalidTime(value) => format!("Invalid time '{}', expected HH:MM", value),
            Message::InvalidRowsPerPage => "Rows per page must be at least 1".to_string(),
        };
        write!(f, "{}", s)
    }
}
