//! # Millroll - attendance register and wage engine
//!
//! Turns the daily attendance of a spinning mill floor into day, week and
//! month summaries, computes shift-rate wages and renders print-ready
//! registers.
//!
//! ## Features
//!
//! - **Shift catalog**: three standard 8-hour shifts plus manual clock times
//! - **Day records**: every edit re-derives hours and status from one reducer
//! - **Windows**: day, Monday-to-Sunday week and calendar month
//! - **Summaries**: weighted work days, hours, overtime and wages
//! - **Exports**: paginated print register, CSV, Excel and JSON
//!
//! ## Usage
//!
//! ```rust,no_run
//! use millroll::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
