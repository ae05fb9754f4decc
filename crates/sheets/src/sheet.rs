//! Operations on one located sheet.

use tracing::{debug, info, instrument, warn};

use crate::a1;
use crate::client::SpreadsheetApi;
use crate::error::SheetsError;
use crate::layout::{self, ColumnMatch, PlacedValue};
use crate::locator::sheet_title;
use crate::models::Request;

/// Base URL of the spreadsheet web UI.
const SPREADSHEET_WEB_URL: &str = "https://docs.google.com/spreadsheets/d";

/// A sheet resolved from `(spreadsheet id, gid)`, bound to the client used to reach it.
///
/// One is built per request; nothing here outlives the request that made it.
pub struct SheetRef<'a> {
    api: &'a dyn SpreadsheetApi,
    spreadsheet_id: String,
    sheet_id: i64,
    title: String,
}

/// Where a row write landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenRange {
    /// A1 range including the sheet name.
    pub range: String,
    /// 1-based row number.
    pub row: usize,
    /// Number of columns written, starting from A.
    pub width: usize,
}

impl<'a> SheetRef<'a> {
    /// Look up the sheet title for `sheet_id` and bind it.
    pub async fn locate(
        api: &'a dyn SpreadsheetApi,
        spreadsheet_id: impl Into<String>,
        sheet_id: i64,
    ) -> Result<SheetRef<'a>, SheetsError> {
        let spreadsheet_id = spreadsheet_id.into();
        let title = sheet_title(api, &spreadsheet_id, sheet_id).await?;

        Ok(Self {
            api,
            spreadsheet_id,
            sheet_id,
            title,
        })
    }

    #[must_use]
    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    #[must_use]
    pub fn sheet_id(&self) -> i64 {
        self.sheet_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    async fn read(&self, range: &str) -> Result<Vec<Vec<String>>, SheetsError> {
        self.api.read_range(&self.spreadsheet_id, range).await
    }

    /// Cells of one row. A blank row yields an empty list.
    pub async fn header_row(&self, row: usize) -> Result<Vec<String>, SheetsError> {
        let values = self.read(&a1::row_range(&self.title, row)).await?;
        Ok(values.into_iter().next().unwrap_or_default())
    }

    /// Columns of `headers` within header row `row`; absent headers are omitted.
    pub async fn resolve_columns<S: AsRef<str> + Sync>(
        &self,
        row: usize,
        headers: &[S],
    ) -> Result<Vec<ColumnMatch>, SheetsError> {
        if headers.is_empty() {
            return Ok(Vec::new());
        }

        let header_row = self.header_row(row).await?;
        let matches = layout::resolve_columns(&header_row, headers);

        debug!(
            row,
            requested = headers.len(),
            matched = matches.len(),
            "Resolved header columns"
        );
        Ok(matches)
    }

    /// 1-based column of the first cell in `row` equal to `value`.
    pub async fn column_in_row(&self, row: usize, value: &str) -> Result<Option<usize>, SheetsError> {
        let matches = self.resolve_columns(row, &[value]).await?;
        Ok(matches.first().map(|m| m.column))
    }

    /// 1-based row of the first cell in column A equal to `value`.
    pub async fn find_row_in_first_column(&self, value: &str) -> Result<Option<usize>, SheetsError> {
        let values = self.read(&a1::column_range(&self.title, 1)).await?;
        Ok(layout::rows_with_first_cell(&values, value).first().copied())
    }

    /// First row with no content, or one past the last used row.
    #[instrument(skip(self), fields(sheet = %self.title))]
    pub async fn first_empty_row(&self) -> Result<usize, SheetsError> {
        let values = self.read(&a1::whole_sheet(&self.title)).await?;
        let row = layout::first_empty_row(&values);
        debug!(row, used_rows = values.len(), "Found first empty row");
        Ok(row)
    }

    /// Write `values` as a single row starting at column A of `row`.
    #[instrument(skip(self, values), fields(sheet = %self.title))]
    pub async fn write_row(
        &self,
        row: usize,
        values: &[PlacedValue],
    ) -> Result<WrittenRange, SheetsError> {
        let cells = layout::assemble_row(values);
        if cells.is_empty() {
            return Err(SheetsError::EmptyRow);
        }

        let width = cells.len();
        let range = a1::row_span(&self.title, row, width);

        let response = self
            .api
            .write_range(&self.spreadsheet_id, &range, vec![cells])
            .await?;

        info!(
            range = %range,
            updated_cells = response.updated_cells.unwrap_or_default(),
            "Row written"
        );

        Ok(WrittenRange { range, row, width })
    }

    /// Text of a single cell such as `B3`; `None` when the cell is empty.
    pub async fn read_cell(&self, address: &str) -> Result<Option<String>, SheetsError> {
        let values = self.read(&a1::cell(&self.title, address)).await?;
        Ok(values
            .into_iter()
            .next()
            .and_then(|row| row.into_iter().next())
            .filter(|text| !text.is_empty()))
    }

    /// Overwrite a single cell such as `B3`.
    pub async fn write_cell(&self, address: &str, value: &str) -> Result<(), SheetsError> {
        let range = a1::cell(&self.title, address);
        self.api
            .write_range(&self.spreadsheet_id, &range, vec![vec![value.to_string()]])
            .await?;
        debug!(range = %range, "Cell written");
        Ok(())
    }

    /// Delete one 1-based row.
    pub async fn delete_row(&self, row: usize) -> Result<(), SheetsError> {
        self.api
            .batch_update(
                &self.spreadsheet_id,
                vec![Request::delete_row(self.sheet_id, row)?],
            )
            .await
    }

    /// Delete every row whose column A equals `value`.
    ///
    /// Rows go bottom-up so earlier deletions do not shift the ones still
    /// pending. The first failure stops the sweep. Returns the deleted rows
    /// in deletion order.
    #[instrument(skip(self), fields(sheet = %self.title))]
    pub async fn delete_rows_by_value(&self, value: &str) -> Result<Vec<usize>, SheetsError> {
        let values = self.read(&a1::column_range(&self.title, 1)).await?;
        let mut rows = layout::rows_with_first_cell(&values, value);

        if rows.is_empty() {
            warn!("No rows found with the requested value");
            return Ok(rows);
        }

        rows.reverse();
        for &row in &rows {
            self.delete_row(row).await?;
            info!(row, "Deleted row");
        }

        Ok(rows)
    }

    /// Browser link to this sheet, optionally selecting `range` (without sheet name).
    #[must_use]
    pub fn link(&self, range: Option<&str>) -> String {
        let base = format!(
            "{SPREADSHEET_WEB_URL}/{}/edit#gid={}",
            self.spreadsheet_id, self.sheet_id
        );
        match range {
            Some(range) => format!("{base}&range={range}"),
            None => base,
        }
    }

    /// Browser link selecting a written row.
    #[must_use]
    pub fn link_to(&self, written: &WrittenRange) -> String {
        let cells = format!(
            "A{row}:{}{row}",
            a1::column_letter(written.width),
            row = written.row
        );
        self.link(Some(&cells))
    }
}
