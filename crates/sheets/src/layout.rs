//! Pure row and column placement over already-fetched cell values.

/// A header found in a header row, with its 1-based column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMatch {
    pub header: String,
    pub column: usize,
}

/// A value destined for a 1-based column of the row being written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedValue {
    pub column: usize,
    pub value: String,
}

impl PlacedValue {
    #[must_use]
    pub fn new(column: usize, value: impl Into<String>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }
}

/// Locate each header in `row`. Headers that do not appear are left out.
#[must_use]
pub fn resolve_columns<S: AsRef<str>>(row: &[String], headers: &[S]) -> Vec<ColumnMatch> {
    headers
        .iter()
        .filter_map(|header| {
            let header = header.as_ref();
            row.iter()
                .position(|cell| cell == header)
                .map(|index| ColumnMatch {
                    header: header.to_string(),
                    column: index + 1,
                })
        })
        .collect()
}

/// Non-empty cell text at a 1-based column.
#[must_use]
pub fn cell_at(row: &[String], column: usize) -> Option<&str> {
    column
        .checked_sub(1)
        .and_then(|index| row.get(index))
        .map(String::as_str)
        .filter(|text| !text.is_empty())
}

/// First row whose cells are all empty, or one past the last row.
#[must_use]
pub fn first_empty_row(rows: &[Vec<String>]) -> usize {
    rows.iter()
        .position(|row| row.iter().all(String::is_empty))
        .map_or(rows.len() + 1, |index| index + 1)
}

/// Lay values out as one row, padding unplaced columns with empty strings.
///
/// Column `0` is not addressable and is skipped. When two values target the
/// same column the later one wins.
#[must_use]
pub fn assemble_row(values: &[PlacedValue]) -> Vec<String> {
    let width = values.iter().map(|v| v.column).max().unwrap_or(0);
    let mut row = vec![String::new(); width];

    for placed in values.iter().filter(|v| v.column > 0) {
        row[placed.column - 1].clone_from(&placed.value);
    }

    row
}

/// 1-based rows whose first cell equals `value`, in ascending order.
#[must_use]
pub fn rows_with_first_cell(rows: &[Vec<String>], value: &str) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row.first().is_some_and(|cell| cell == value))
        .map(|(index, _)| index + 1)
        .collect()
}
