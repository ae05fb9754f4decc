//! Sheet lookup by numeric id.

use tracing::debug;

use crate::client::SpreadsheetApi;
use crate::error::SheetsError;

/// Resolve the title of the sheet whose id is `sheet_id`.
///
/// Ranges are addressed by title, so every range operation starts here.
pub async fn sheet_title(
    api: &dyn SpreadsheetApi,
    spreadsheet_id: &str,
    sheet_id: i64,
) -> Result<String, SheetsError> {
    let spreadsheet = api.get_metadata(spreadsheet_id).await?;

    let title = spreadsheet
        .sheets
        .into_iter()
        .find(|sheet| sheet.properties.sheet_id == sheet_id)
        .map(|sheet| sheet.properties.title)
        .ok_or_else(|| {
            SheetsError::NotFound(format!(
                "sheet with gid {sheet_id} not found in spreadsheet {spreadsheet_id}"
            ))
        })?;

    debug!(sheet_id, title = %title, "Resolved sheet title");
    Ok(title)
}

/// Titles of every sheet in the spreadsheet, in tab order.
pub async fn sheet_titles(
    api: &dyn SpreadsheetApi,
    spreadsheet_id: &str,
) -> Result<Vec<String>, SheetsError> {
    let mut sheets = api.get_metadata(spreadsheet_id).await?.sheets;
    sheets.sort_by_key(|sheet| sheet.properties.index);
    Ok(sheets.into_iter().map(|sheet| sheet.properties.title).collect())
}
