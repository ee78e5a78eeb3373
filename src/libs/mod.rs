//! Attendance engine and its supporting modules.
//!
//! The engine flows bottom-up: [`shift`] and [`record`] model a single
//! day, [`window`] picks the dates, [`attendance`] builds the dense grid,
//! [`summary`] aggregates it and [`export`] renders it.

pub mod attendance;
pub mod config;
pub mod data_storage;
pub mod employee;
pub mod export;
pub mod fetch;
pub mod formatter;
pub mod glyph;
pub mod messages;
pub mod record;
pub mod shift;
pub mod summary;
pub mod view;
pub mod window;
