//! Splitting file text into a header and data rows.

use csv::{ReaderBuilder, StringRecord};

use qartod_model::Dialect;

/// A file split into fields, before any validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// First line exactly as written, minus BOM and trailing whitespace.
    pub header_line: Option<String>,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Split `text` with `dialect`. Blank and whitespace-only lines are skipped;
/// the first remaining record is the header.
pub fn split_table(text: &str, dialect: Dialect) -> Table {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let header_line = text
        .lines()
        .find(|line| !is_blank(line))
        .map(|line| line.trim_end().to_string());

    let mut records = match dialect {
        Dialect::Csv => split_csv(text),
        Dialect::Psv => split_psv(text),
    }
    .into_iter();

    let header = records.next().unwrap_or_default();
    Table {
        header_line,
        header,
        rows: records.collect(),
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn split_csv(text: &str) -> Vec<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(b',')
        .quote(b'"')
        .from_reader(text.as_bytes());

    // In-memory UTF-8 with flexible record lengths: the reader has no failure path.
    reader
        .records()
        .flatten()
        .filter(|record| !is_blank_record(record))
        .map(|record| record.iter().map(str::to_string).collect())
        .collect()
}

fn is_blank_record(record: &StringRecord) -> bool {
    record.len() == 1 && record.get(0).is_some_and(is_blank)
}

fn split_psv(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .filter(|line| !is_blank(line))
        .map(|line| line.split('|').map(str::to_string).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_honours_quotes() {
        let text = ",\"[1, 1]\"\n\"[0, 10]\",\"[nan, nan]\"\n";
        let table = split_table(text, Dialect::Csv);
        assert_eq!(table.header_line.as_deref(), Some(",\"[1, 1]\""));
        assert_eq!(table.header, vec!["", "[1, 1]"]);
        assert_eq!(table.rows, vec![vec!["[0, 10]", "[nan, nan]"]]);
    }

    #[test]
    fn psv_splits_literally() {
        let text = "a|b\r\n\"x|y\"|z\r\n\r\n1|2\r\n";
        let table = split_table(text, Dialect::Psv);
        assert_eq!(table.header_line.as_deref(), Some("a|b"));
        assert_eq!(
            table.rows,
            vec![vec!["\"x", "y\"", "z"], vec!["1", "2"]]
        );
    }

    #[test]
    fn strips_bom_and_handles_empty_text() {
        let table = split_table("\u{feff}a,b\n", Dialect::Csv);
        assert_eq!(table.header, vec!["a", "b"]);
        assert!(table.rows.is_empty());

        let empty = split_table("", Dialect::Csv);
        assert_eq!(empty.header_line, None);
        assert!(empty.header.is_empty());
    }

    #[test]
    fn whitespace_only_lines_are_skipped() {
        let text = "a,b\n  \n1,2\n\t\r\n3,4\n";
        let table = split_table(text, Dialect::Csv);
        assert_eq!(table.rows, vec![vec!["1", "2"], vec!["3", "4"]]);

        let table = split_table("   \na|b\n \n1|2\n", Dialect::Psv);
        assert_eq!(table.header_line.as_deref(), Some("a|b"));
        assert_eq!(table.rows, vec![vec!["1", "2"]]);
    }
}
