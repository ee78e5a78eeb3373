//! REST client for the mill attendance backend.
//!
//! Requests carry a bearer token and are retried a few times before the
//! error is returned. `MILLROLL_API_URL` and `MILLROLL_API_TOKEN` override
//! the saved settings.

use super::{AttendanceStore, StoreError};
use crate::libs::config::ConfigModule;
use crate::libs::employee::Employee;
use crate::libs::messages::Message;
use crate::libs::record::{DayRecord, RawAttendanceRow};
use crate::msg_print;
use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Input};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

// Include generated package metadata
include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

const MAX_RETRY_COUNT: u32 = 3;
const ATTENDANCE_URL: &str = "attendance";
const BULK_URL: &str = "attendance/bulk";
const EMPLOYEES_URL: &str = "employees";
const DATE_FORMAT: &str = "%Y-%m-%d";

pub const API_URL_ENV: &str = "MILLROLL_API_URL";
pub const API_TOKEN_ENV: &str = "MILLROLL_API_TOKEN";

#[derive(Serialize)]
struct BulkSubmission {
    date: String,
    records: Vec<RawAttendanceRow>,
}

/// REST client for the mill backend.
#[derive(Debug)]
pub struct MillApi {
    client: Client,
    config: StoreConfig,
}

impl MillApi {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .user_agent(format!("{}/{}", APP_METADATA_NAME, APP_METADATA_VERSION))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_url.trim_end_matches('/'), path)
    }

    /// Sends a request, retrying connection failures and 5xx answers.
    async fn send<F>(&self, build: F) -> Result<Response, StoreError>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let request = build();
            let request = match self.config.auth_token.is_empty() {
                true => request,
                false => request.bearer_auth(&self.config.auth_token),
            };

            match request.send().await {
                Ok(res) if res.status().is_server_error() && attempt < MAX_RETRY_COUNT => {
                    tracing::warn!(status = %res.status(), attempt, "attendance store error, retrying");
                }
                Ok(res) if !res.status().is_success() => {
                    return Err(StoreError::Status {
                        status: res.status(),
                        url: res.url().to_string(),
                    });
                }
                Ok(res) => return Ok(res),
                Err(err) if (err.is_connect() || err.is_timeout()) && attempt < MAX_RETRY_COUNT => {
                    tracing::warn!(error = %err, attempt, "attendance store unreachable, retrying");
                }
                Err(err) => return Err(err.into()),
            }
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, StoreError> {
        let url = self.url(path);
        let res = self.send(|| self.client.get(&url).query(query)).await?;
        let body = res.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl AttendanceStore for MillApi {
    async fn fetch_by_date(&self, date: NaiveDate) -> Result<Vec<RawAttendanceRow>, StoreError> {
        tracing::debug!(%date, "fetching attendance");
        self.get_json(ATTENDANCE_URL, &[("date", date.format(DATE_FORMAT).to_string())]).await
    }

    async fn fetch_employees(&self) -> Result<Vec<Employee>, StoreError> {
        self.get_json(EMPLOYEES_URL, &[]).await
    }

    async fn submit_attendance(&self, date: NaiveDate, records: &[DayRecord]) -> Result<(), StoreError> {
        let url = self.url(BULK_URL);
        let body = BulkSubmission {
            date: date.format(DATE_FORMAT).to_string(),
            records: records.iter().map(DayRecord::to_raw).collect(),
        };
        self.send(|| self.client.post(&url).json(&body)).await?;
        Ok(())
    }

    async fn fetch_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<RawAttendanceRow>, StoreError> {
        tracing::debug!(%start, %end, "fetching attendance range");
        self.get_json(
            ATTENDANCE_URL,
            &[("from", start.format(DATE_FORMAT).to_string()), ("to", end.format(DATE_FORMAT).to_string())],
        )
        .await
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StoreConfig {
    pub api_url: String,
    #[serde(default)]
    pub auth_token: String,
}

impl StoreConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "store".to_string(),
            name: "Attendance store".to_string(),
        }
    }

    /// Saved settings with `MILLROLL_API_URL` / `MILLROLL_API_TOKEN` applied on top.
    pub fn from_env(saved: Option<Self>) -> Option<Self> {
        let api_url = env::var(API_URL_ENV).ok().or_else(|| saved.as_ref().map(|c| c.api_url.clone()))?;
        if api_url.trim().is_empty() {
            return None;
        }
        let auth_token = env::var(API_TOKEN_ENV)
            .ok()
            .or_else(|| saved.map(|c| c.auth_token))
            .unwrap_or_default();
        Some(Self { api_url, auth_token })
    }

    pub fn init(config: &Option<Self>) -> Result<Self> {
        let config = config.clone().unwrap_or(Self {
            api_url: "".to_string(),
            auth_token: "".to_string(),
        });
        msg_print!(Message::ConfigModuleStore);
        Ok(Self {
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptStoreApiUrl.to_string())
                .default(config.api_url)
                .interact_text()?,
            auth_token: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptStoreAuthToken.to_string())
                .default(config.auth_token)
                .allow_empty(true)
                .interact_text()?,
        })
    }
}
