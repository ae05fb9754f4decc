//! Form webhook relay.
//!
//! Receives form submissions over HTTP, writes each one as a row of the
//! Google Sheets tab named in the submission, and posts a summary to a chat.
//!
//! # Endpoints
//!
//! - `POST /webhook`: form submission (`params.answer` holds the answers)
//! - `GET /health`: liveness
//!
//! # Configuration
//!
//! See [`config::Config`] for the environment variables read at startup.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod error;
pub mod fields;
pub mod payload;
pub mod pipeline;
pub mod server;

pub use config::{Config, HeaderRows};
pub use error::{PayloadError, RelayError};
pub use fields::{extract_fields, format_answer, Answer, AnswerKind, Field};
pub use payload::{parse_webhook, Submission};
pub use pipeline::{Outcome, Relay, Target};
pub use server::{build_router, AppState};
