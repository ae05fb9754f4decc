//! The relay itself: submission → sheet row → chat summary.

use std::collections::HashMap;

use notify::{Delivery, Notifier, SubmissionSummary};
use sheets::layout::cell_at;
use sheets::{PlacedValue, SheetRef, SpreadsheetApi, WrittenRange};
use tracing::{debug, info, instrument};

use crate::config::HeaderRows;
use crate::error::RelayError;
use crate::fields::{extract_fields, Field};
use crate::payload::Submission;

/// Reserved header carrying the spreadsheet id.
pub const SPREADSHEET_ID_HEADER: &str = "sid";
/// Reserved header carrying the sheet (tab) id.
pub const SHEET_ID_HEADER: &str = "gid";
/// Reserved header carrying the chat id for the summary.
pub const CHAT_ID_HEADER: &str = "tgGroupId";
/// Pseudo-header the submission timestamp is offered under.
pub const CREATED_HEADER: &str = "created";

/// Where a submission goes, taken from its reserved fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub spreadsheet_id: String,
    pub sheet_id: i64,
    pub chat_id: Option<String>,
}

impl Target {
    /// Pull the reserved fields out of `fields`, leaving only data fields.
    pub fn split(fields: Vec<Field>) -> Result<(Self, Vec<Field>), RelayError> {
        let mut reserved = HashMap::new();
        let mut data = Vec::with_capacity(fields.len());

        for field in fields {
            match field.header.as_str() {
                SPREADSHEET_ID_HEADER | SHEET_ID_HEADER | CHAT_ID_HEADER => {
                    reserved.insert(field.header, field.value.trim().to_string());
                }
                _ => data.push(field),
            }
        }

        let mut take = |header: &str| reserved.remove(header).filter(|v| !v.is_empty());

        let spreadsheet_id =
            take(SPREADSHEET_ID_HEADER).ok_or(RelayError::MissingField(SPREADSHEET_ID_HEADER))?;
        let sheet_id = take(SHEET_ID_HEADER).ok_or(RelayError::MissingField(SHEET_ID_HEADER))?;
        let sheet_id = sheet_id
            .parse()
            .map_err(|_| RelayError::InvalidSheetId(sheet_id))?;
        let chat_id = take(CHAT_ID_HEADER);

        Ok((
            Self {
                spreadsheet_id,
                sheet_id,
                chat_id,
            },
            data,
        ))
    }
}

/// What a relayed submission produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub written: WrittenRange,
    pub link: String,
    /// Whether at least one channel accepted the summary or its fallback.
    pub notified: bool,
}

/// Relays submissions using borrowed clients; one is built per request.
pub struct Relay<'a> {
    api: &'a dyn SpreadsheetApi,
    notifier: &'a Notifier,
    rows: HeaderRows,
}

impl<'a> Relay<'a> {
    #[must_use]
    pub fn new(api: &'a dyn SpreadsheetApi, notifier: &'a Notifier, rows: HeaderRows) -> Self {
        Self {
            api,
            notifier,
            rows,
        }
    }

    /// Write `submission` to its sheet and announce it.
    ///
    /// Chat delivery problems never surface here; only missing data and
    /// spreadsheet failures do.
    #[instrument(skip_all)]
    pub async fn process(&self, submission: &Submission) -> Result<Outcome, RelayError> {
        let answers = submission.answers().ok_or(RelayError::MissingAnswers)?;
        let (target, mut fields) = Target::split(extract_fields(answers))?;

        // A form question named `created` keeps its answer.
        if !fields.iter().any(|f| f.header == CREATED_HEADER) {
            if let Some(created) = submission.created_display() {
                fields.push(Field {
                    header: CREATED_HEADER.to_string(),
                    value: created,
                });
            }
        }

        debug!(
            spreadsheet_id = %target.spreadsheet_id,
            sheet_id = target.sheet_id,
            fields = fields.len(),
            "Relaying submission"
        );

        let sheet =
            SheetRef::locate(self.api, target.spreadsheet_id.as_str(), target.sheet_id).await?;

        let headers: Vec<&str> = fields.iter().map(|f| f.header.as_str()).collect();
        let mut matches = sheet.resolve_columns(self.rows.canonical, &headers).await?;
        if matches.is_empty() {
            return Err(RelayError::NoMatchingColumns {
                row: self.rows.canonical,
            });
        }
        matches.sort_by_key(|m| m.column);

        let values: HashMap<&str, &str> = fields
            .iter()
            .map(|f| (f.header.as_str(), f.value.as_str()))
            .collect();
        let placed: Vec<PlacedValue> = matches
            .iter()
            .map(|m| {
                let value = values.get(m.header.as_str()).copied().unwrap_or_default();
                PlacedValue::new(m.column, value)
            })
            .collect();

        let labels = sheet.header_row(self.rows.localized).await?;
        let row = sheet.first_empty_row().await?;
        let written = sheet.write_row(row, &placed).await?;
        let link = sheet.link_to(&written);

        info!(
            sheet = %sheet.title(),
            row = written.row,
            columns = placed.len(),
            "Submission written"
        );

        let summary = matches.iter().zip(&placed).fold(
            SubmissionSummary::new(link.as_str()),
            |summary, (m, value)| {
                let label = cell_at(&labels, m.column).unwrap_or(m.header.as_str());
                summary.with_field(label, value.value.as_str())
            },
        );

        let notified = match target.chat_id.as_deref() {
            Some(chat_id) => {
                let deliveries = self.notifier.deliver(chat_id, &summary).await;
                for (channel, delivery) in &deliveries {
                    debug!(channel = *channel, ?delivery, "Summary delivery finished");
                }
                deliveries.iter().any(|(_, d)| *d != Delivery::Failed)
            }
            None => {
                debug!("No chat id in submission, skipping notification");
                false
            }
        };

        Ok(Outcome {
            written,
            link,
            notified,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(header: &str, value: &str) -> Field {
        Field {
            header: header.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_split_target() {
        let (target, data) = Target::split(vec![
            field("sid", "abc"),
            field("name", "Анна"),
            field("gid", " 42 "),
            field("tgGroupId", "-100"),
        ])
        .unwrap();

        assert_eq!(
            target,
            Target {
                spreadsheet_id: "abc".to_string(),
                sheet_id: 42,
                chat_id: Some("-100".to_string()),
            }
        );
        assert_eq!(data, vec![field("name", "Анна")]);
    }

    #[test]
    fn test_split_without_chat() {
        let (target, _) = Target::split(vec![field("sid", "abc"), field("gid", "0")]).unwrap();
        assert_eq!(target.chat_id, None);
    }

    #[test]
    fn test_split_missing_fields() {
        assert!(matches!(
            Target::split(vec![field("gid", "1")]),
            Err(RelayError::MissingField("sid"))
        ));
        assert!(matches!(
            Target::split(vec![field("sid", "abc"), field("gid", "")]),
            Err(RelayError::MissingField("gid"))
        ));
        assert!(matches!(
            Target::split(vec![field("sid", "abc"), field("gid", "first")]),
            Err(RelayError::InvalidSheetId(ref gid)) if gid == "first"
        ));
    }
}
