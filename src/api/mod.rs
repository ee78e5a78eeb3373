//! Boundary to the mill's attendance and employee store.
//!
//! The engine only needs three calls: attendance rows for a date, the
//! employee roster, and a bulk upsert of edited records. [`AttendanceStore`]
//! captures that contract; [`mill::MillApi`] speaks to the REST backend and
//! [`snapshot::SnapshotStore`] serves a JSON snapshot for offline use.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use millroll::api::{AttendanceStore, Store};
//! use millroll::libs::config::Config;
//! use chrono::NaiveDate;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let store = Store::open(None, &Config::read()?)?;
//! let rows = store.fetch_by_date(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()).await?;
//! # Ok(())
//! # }
//! ```

use crate::libs::config::Config;
use crate::libs::employee::Employee;
use crate::libs::record::{DayRecord, RawAttendanceRow};
use chrono::NaiveDate;
use std::path::Path;
use thiserror::Error;

pub mod mill;
pub mod snapshot;

pub use mill::{MillApi, StoreConfig};
pub use snapshot::SnapshotStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request to the attendance store failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("attendance store answered {status} for {url}")]
    Status { status: reqwest::StatusCode, url: String },
    #[error("could not decode attendance data: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("could not read attendance snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("attendance for {0} is unavailable")]
    Unavailable(NaiveDate),
    #[error("the snapshot store is read-only")]
    ReadOnly,
    #[error("no attendance store configured; run `millroll init` or pass --snapshot")]
    NotConfigured,
}

#[allow(async_fn_in_trait)]
pub trait AttendanceStore {
    async fn fetch_by_date(&self, date: NaiveDate) -> Result<Vec<RawAttendanceRow>, StoreError>;

    async fn fetch_employees(&self) -> Result<Vec<Employee>, StoreError>;

    async fn submit_attendance(&self, date: NaiveDate, records: &[DayRecord]) -> Result<(), StoreError>;

    /// Rows for an inclusive date range, each tagged with its date.
    ///
    /// Falls back to one `fetch_by_date` per day; stores with a range
    /// endpoint override it to answer in a single request.
    async fn fetch_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<RawAttendanceRow>, StoreError> {
        let mut rows = Vec::new();
        for date in start.iter_days().take_while(|d| *d <= end) {
            rows.extend(self.fetch_by_date(date).await?.into_iter().map(|row| RawAttendanceRow {
                date: Some(date),
                ..row
            }));
        }
        Ok(rows)
    }
}

/// The store selected for a CLI run.
pub enum Store {
    Mill(MillApi),
    Snapshot(SnapshotStore),
}

impl Store {
    /// Opens the snapshot file when given, otherwise the configured API.
    ///
    /// `MILLROLL_API_URL` and `MILLROLL_API_TOKEN` override the saved
    /// store settings.
    pub fn open(snapshot: Option<&Path>, config: &Config) -> Result<Self, StoreError> {
        if let Some(path) = snapshot {
            return Ok(Store::Snapshot(SnapshotStore::load(path)?));
        }
        let store_config = StoreConfig::from_env(config.store.clone()).ok_or(StoreError::NotConfigured)?;
        Ok(Store::Mill(MillApi::new(&store_config)?))
    }
}

impl AttendanceStore for Store {
    async fn fetch_by_date(&self, date: NaiveDate) -> Result<Vec<RawAttendanceRow>, StoreError> {
        match self {
            Store::Mill(api) => api.fetch_by_date(date).await,
            Store::Snapshot(snapshot) => snapshot.fetch_by_date(date).await,
        }
    }

    async fn fetch_employees(&self) -> Result<Vec<Employee>, StoreError> {
        match self {
            Store::Mill(api) => api.fetch_employees().await,
            Store::Snapshot(snapshot) => snapshot.fetch_employees().await,
        }
    }

    async fn submit_attendance(&self, date: NaiveDate, records: &[DayRecord]) -> Result<(), StoreError> {
        match self {
            Store::Mill(api) => api.submit_attendance(date, records).await,
            Store::Snapshot(snapshot) => snapshot.submit_attendance(date, records).await,
        }
    }

    async fn fetch_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<RawAttendanceRow>, StoreError> {
        match self {
            Store::Mill(api) => api.fetch_range(start, end).await,
            Store::Snapshot(snapshot) => snapshot.fetch_range(start, end).await,
        }
    }
}
