//! Text shaping for user-submitted fields.
//!
//! Form values arrive as free text; these helpers normalize whitespace and
//! enforce length caps before a row is written, so the stored shape is
//! predictable regardless of what the browser sent.

/// Truncates to at most `max_chars` characters, on a character boundary.
///
/// Longer inputs are cut and suffixed with `...`; inputs within the limit are
/// returned trimmed but otherwise unchanged.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }

    let keep = max_chars.saturating_sub(3);
    let mut truncated: String = trimmed.chars().take(keep).collect();
    while truncated.ends_with(char::is_whitespace) {
        truncated.pop();
    }
    format!("{}...", truncated)
}

/// Shapes a single-line field: trims, collapses internal whitespace runs
/// (including newlines) to one space, and caps the length.
pub fn clean_field(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_chars(&collapsed, max_chars)
}

/// Shapes a multi-line field (messages, questions): trims each line, drops
/// runs of more than one blank line, and caps the total length.
pub fn clean_multiline_field(text: &str, max_chars: usize) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut previous_blank = false;
    for line in text.lines() {
        let line = line.trim_end();
        let blank = line.trim().is_empty();
        if blank && previous_blank {
            continue;
        }
        lines.push(line);
        previous_blank = blank;
    }

    truncate_chars(&lines.join("\n"), max_chars)
}
