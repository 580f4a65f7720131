//! Line-level scanning helpers shared by the table parsers.
//!
//! Spec resources are line oriented: `#` starts a comment, fields are
//! whitespace separated, and the free-form string tables carry one quoted run
//! per line.

/// Returns the line with any `#` comment removed.
pub fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(hash) => &line[..hash],
        None => line,
    }
}

/// Splits a string-table line at its first quoted run: the whitespace-trimmed
/// text before the opening quote, and the text between the quotes. A line
/// without an opening quote yields `None`; a missing closing quote takes the
/// rest of the line.
pub fn quoted(line: &str) -> Option<(&str, &str)> {
    let (before, rest) = line.split_once('"')?;
    let inside = match rest.find('"') {
        Some(quote) => &rest[..quote],
        None => rest,
    };
    Some((before.trim(), inside))
}
