//! Google Sheets client and row placement for form submissions.
//!
//! This crate provides:
//! - A REST client for the Sheets v4 API authorised with a service account
//! - Sheet lookup by numeric id (`gid`)
//! - Header-to-column resolution against a designated header row
//! - First-empty-row detection and sparse row writes
//! - Row deletion by first-column value
//!
//! # Usage
//!
//! ```no_run
//! use sheets::{PlacedValue, ServiceAccountAuth, ServiceAccountKey, SheetRef, SheetsClient};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), sheets::SheetsError> {
//! let key = ServiceAccountKey::from_file("Keys.json")?;
//! let client = SheetsClient::new(Arc::new(ServiceAccountAuth::new(key)?))?;
//!
//! let sheet = SheetRef::locate(&client, "1AbC...", 0).await?;
//! let row = sheet.first_empty_row().await?;
//! sheet
//!     .write_row(row, &[PlacedValue::new(2, "hello")])
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Every remote call can fail

pub mod a1;
pub mod auth;
pub mod client;
pub mod error;
pub mod layout;
pub mod locator;
pub mod models;
pub mod sheet;

pub use auth::{AccessTokenSource, ServiceAccountAuth, ServiceAccountKey, StaticToken};
pub use client::{SheetsClient, SpreadsheetApi};
pub use error::SheetsError;
pub use layout::{ColumnMatch, PlacedValue};
pub use locator::{sheet_title, sheet_titles};
pub use sheet::{SheetRef, WrittenRange};
