//! A1 notation helpers.

/// Convert a 1-based column number to its letter (`1 → A`, `27 → AA`).
#[must_use]
pub fn column_letter(column: usize) -> String {
    let mut letters = Vec::new();
    let mut rest = column;

    while rest > 0 {
        let offset = (rest - 1) % 26;
        // offset < 26, so the cast cannot truncate
        #[allow(clippy::cast_possible_truncation)]
        letters.push(char::from(b'A' + offset as u8));
        rest = (rest - offset) / 26;
    }

    letters.iter().rev().collect()
}

/// Quote a sheet title for use in a range.
///
/// Titles are always quoted: an unquoted `A1` or `R1C1` would read as a cell.
#[must_use]
pub fn quote_sheet_name(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// The whole sheet.
#[must_use]
pub fn whole_sheet(title: &str) -> String {
    quote_sheet_name(title)
}

/// One full row, e.g. `'Sheet'!3:3`.
#[must_use]
pub fn row_range(title: &str, row: usize) -> String {
    format!("{}!{row}:{row}", quote_sheet_name(title))
}

/// One full column, e.g. `'Sheet'!A:A`.
#[must_use]
pub fn column_range(title: &str, column: usize) -> String {
    let letter = column_letter(column);
    format!("{}!{letter}:{letter}", quote_sheet_name(title))
}

/// The first `width` cells of a row, e.g. `'Sheet'!A5:D5`.
#[must_use]
pub fn row_span(title: &str, row: usize, width: usize) -> String {
    format!(
        "{}!A{row}:{}{row}",
        quote_sheet_name(title),
        column_letter(width.max(1))
    )
}

/// A single cell address inside the sheet, e.g. `'Sheet'!B3`.
#[must_use]
pub fn cell(title: &str, address: &str) -> String {
    format!("{}!{address}", quote_sheet_name(title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(1), "A");
        assert_eq!(column_letter(26), "Z");
        assert_eq!(column_letter(27), "AA");
        assert_eq!(column_letter(52), "AZ");
        assert_eq!(column_letter(703), "AAA");
        assert_eq!(column_letter(0), "");
    }

    #[test]
    fn test_quote_sheet_name() {
        assert_eq!(quote_sheet_name("Sheet1"), "'Sheet1'");
        assert_eq!(quote_sheet_name("Заявки"), "'Заявки'");
        assert_eq!(quote_sheet_name("My Sheet"), "'My Sheet'");
        assert_eq!(quote_sheet_name("Bob's"), "'Bob''s'");
    }

    #[test]
    fn test_cell_like_titles_are_quoted() {
        assert_eq!(row_range("A1", 2), "'A1'!2:2");
        assert_eq!(cell("R1C1", "B3"), "'R1C1'!B3");
    }

    #[test]
    fn test_ranges() {
        assert_eq!(row_range("Data", 3), "'Data'!3:3");
        assert_eq!(column_range("Data", 1), "'Data'!A:A");
        assert_eq!(row_span("Data", 5, 4), "'Data'!A5:D5");
        assert_eq!(row_span("Form responses", 2, 28), "'Form responses'!A2:AB2");
        assert_eq!(cell("Data", "B3"), "'Data'!B3");
    }
}
