//! Single-line CSV splitting for profile files.
//!
//! A `"` toggles a quoted span and is dropped; commas inside a quoted span
//! are kept. Doubled quotes are not unescaped and malformed quoting never
//! fails, it just yields whatever characters were collected.

/// Split one line into trimmed field values
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

/// Split a header line into column names
///
/// Headers are split on every comma; quotes are not interpreted.
pub fn split_header(line: &str) -> Vec<String> {
    line.split(',').map(|h| h.trim().to_string()).collect()
}
