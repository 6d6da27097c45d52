use super::model::Row;

/// Column names that mark a row as the sheet header
pub const HEADER_TOKENS: &[&str] = &["thai", "chinese_pinyin", "tts_key"];

/// A row is a header iff any of its lowercased fields is a known column name
pub fn looks_like_header(row: &Row) -> bool {
    row.fields
        .iter()
        .any(|field| HEADER_TOKENS.contains(&field.to_lowercase().as_str()))
}

/// Drop the first row when it is a header. Later rows are never inspected.
pub fn strip_header(mut rows: Vec<Row>) -> Vec<Row> {
    if rows.first().is_some_and(looks_like_header) {
        rows.remove(0);
    }
    rows
}
