//! Every user-facing message, grouped by area. The text lives in `display.rs`.

#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleStore,
    ConfigModuleExport,
    PromptSelectModules,
    PromptStoreApiUrl,
    PromptStoreAuthToken,
    PromptExportTitle,
    PromptExportRowsPerPage,
    PromptExportGlyphs,
    PromptExportOutputDir,

    // === SUMMARY MESSAGES ===
    SummaryHeader(String),    // window label
    DepartmentHeader(String), // department label
    SummaryTotalsHeader,
    StatusCountsHeader,
    ShiftCatalogHeader,
    NoEmployees,

    // === RECORD MESSAGES ===
    EmployeeNotFound(i64),
    RecordPreview(String, String), // employee name, date
    RecordSubmitted(String, String),
    RecordDryRun,
    RecordNoEdits,

    // === EXPORT MESSAGES ===
    ExportingData(String), // format
    ExportCompleted(String),
    ExportDatesUnavailable(String),

    // === INPUT ERRORS ===
    InvalidDate(String),
    InvalidTime(String),
    InvalidRowsPerPage,
}
