//! Lenient CSV reader for hand-edited phrase sheets.
//!
//! Quoting is never an error: an unescaped `"` toggles the in-quotes state,
//! `""` inside quotes is a literal quote, and a quote left open at line end is
//! closed there. Every field is trimmed. Blank lines are skipped but still
//! count toward line numbering.

use super::model::Row;

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// Parse raw CSV text into rows, skipping blank lines
pub fn parse(text: &str) -> Vec<Row> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    normalized
        .split('\n')
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| Row::new(index + 1, parse_line(line)))
        .collect()
}

fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            QUOTE if in_quotes && chars.peek() == Some(&QUOTE) => {
                current.push(QUOTE);
                chars.next();
            }
            QUOTE => in_quotes = !in_quotes,
            DELIMITER if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}
