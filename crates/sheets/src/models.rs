//! Wire types for the Sheets v4 REST API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SheetsError;

/// Spreadsheet metadata (`GET /spreadsheets/{id}`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spreadsheet {
    #[serde(default)]
    pub spreadsheet_id: String,
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

/// One tab of a spreadsheet.
#[derive(Debug, Clone, Deserialize)]
pub struct Sheet {
    pub properties: SheetProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    /// Numeric id, the `gid` in spreadsheet URLs.
    pub sheet_id: i64,
    pub title: String,
    #[serde(default)]
    pub index: i64,
}

/// A block of cell values addressed by an A1 range.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub range: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    /// Trailing empty rows and cells are omitted by the API.
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

impl ValueRange {
    /// Flatten the values into display strings.
    #[must_use]
    pub fn into_text_rows(self) -> Vec<Vec<String>> {
        self.values
            .into_iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect()
    }
}

/// Render one cell value as the text shown in the sheet.
#[must_use]
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// How written values are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueInputOption {
    /// Values are parsed as if typed into the UI (formulas, dates, `'` prefixes).
    UserEntered,
}

impl ValueInputOption {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserEntered => "USER_ENTERED",
        }
    }
}

/// Response of `values.update`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateValuesResponse {
    #[serde(default)]
    pub spreadsheet_id: String,
    pub updated_range: Option<String>,
    pub updated_rows: Option<u64>,
    pub updated_columns: Option<u64>,
    pub updated_cells: Option<u64>,
}

/// Body of `spreadsheets.batchUpdate`.
#[derive(Debug, Clone, Serialize)]
pub struct BatchUpdateRequest {
    pub requests: Vec<Request>,
}

/// A single structural edit inside a batch update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    DeleteDimension { range: DimensionRange },
}

impl Request {
    /// Delete one 1-based row of a sheet. Row 0 is rejected.
    pub fn delete_row(sheet_id: i64, row: usize) -> Result<Self, SheetsError> {
        let start_index = row.checked_sub(1).ok_or(SheetsError::InvalidRow(row))?;

        Ok(Self::DeleteDimension {
            range: DimensionRange {
                sheet_id,
                dimension: Dimension::Rows,
                start_index,
                end_index: row,
            },
        })
    }
}

/// Half-open, 0-based span of rows or columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRange {
    pub sheet_id: i64,
    pub dimension: Dimension,
    pub start_index: usize,
    pub end_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dimension {
    Rows,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_spreadsheet_deserialize() {
        let raw = json!({
            "spreadsheetId": "abc",
            "sheets": [
                { "properties": { "sheetId": 0, "title": "Лист1", "index": 0 } },
                { "properties": { "sheetId": 1_577_236_425, "title": "Заявки", "index": 1 } }
            ]
        });
        let spreadsheet: Spreadsheet = serde_json::from_value(raw).unwrap();
        assert_eq!(spreadsheet.sheets.len(), 2);
        assert_eq!(spreadsheet.sheets[1].properties.sheet_id, 1_577_236_425);
        assert_eq!(spreadsheet.sheets[1].properties.title, "Заявки");
    }

    #[test]
    fn test_value_range_without_values() {
        let range: ValueRange = serde_json::from_str(r#"{"range": "A1:B2"}"#).unwrap();
        assert!(range.into_text_rows().is_empty());
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&json!("x")), "x");
        assert_eq!(cell_text(&json!(12)), "12");
        assert_eq!(cell_text(&json!(true)), "true");
        assert_eq!(cell_text(&Value::Null), "");
    }

    #[test]
    fn test_delete_row_request_shape() {
        let body = serde_json::to_value(BatchUpdateRequest {
            requests: vec![Request::delete_row(42, 7).unwrap()],
        })
        .unwrap();

        assert_eq!(
            body,
            json!({
                "requests": [{
                    "deleteDimension": {
                        "range": {
                            "sheetId": 42,
                            "dimension": "ROWS",
                            "startIndex": 6,
                            "endIndex": 7
                        }
                    }
                }]
            })
        );
    }

    #[test]
    fn test_delete_row_zero_is_rejected() {
        assert!(matches!(
            Request::delete_row(0, 0),
            Err(SheetsError::InvalidRow(0))
        ));
    }
}
