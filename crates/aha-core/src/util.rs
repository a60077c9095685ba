//! Shared utility functions used across multiple modules.

use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, Utc};

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Truncate text to at most 180 characters for log and error messages.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

/// RFC 3339 with millisecond precision, as written to storage
pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Short date label: "today", "yesterday", or e.g. "mar 5".
pub fn format_note_date(date: DateTime<Utc>, today: NaiveDate) -> String {
    let day = date.date_naive();
    if day == today {
        "today".to_string()
    } else if today
        .checked_sub_signed(Duration::days(1))
        .is_some_and(|yesterday| yesterday == day)
    {
        "yesterday".to_string()
    } else {
        date.format("%b %-d").to_string().to_lowercase()
    }
}

/// Details buffer after a list-aware Enter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEdit {
    pub text: String,
    /// Character offset of the cursor after the edit
    pub cursor: usize,
}

/// Markdown list continuation for Enter at character offset `cursor`.
///
/// On a `- `, `* ` or `+ ` item with content, a new line with the same prefix
/// (indent included) is inserted at the cursor. On an empty item, the item
/// line is removed, which ends the list. Returns `None` when the cursor line
/// is not a list item.
pub fn continue_list_item(text: &str, cursor: usize) -> Option<ListEdit> {
    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());
    let line_start = chars[..cursor]
        .iter()
        .rposition(|c| *c == '\n')
        .map_or(0, |index| index + 1);
    let line_end = chars[cursor..]
        .iter()
        .position(|c| *c == '\n')
        .map_or(chars.len(), |offset| cursor + offset);
    let line = &chars[line_start..line_end];
    let prefix_len = list_prefix_len(line)?;

    if line[prefix_len..].iter().all(|c| c.is_whitespace()) {
        let after_start = (line_end + 1).min(chars.len());
        let text = chars[..line_start]
            .iter()
            .chain(&chars[after_start..])
            .collect();
        return Some(ListEdit {
            text,
            cursor: line_start,
        });
    }

    let text = chars[..cursor]
        .iter()
        .chain(std::iter::once(&'\n'))
        .chain(&line[..prefix_len])
        .chain(&chars[cursor..])
        .collect();
    Some(ListEdit {
        text,
        cursor: cursor + 1 + prefix_len,
    })
}

fn list_prefix_len(line: &[char]) -> Option<usize> {
    let indent = line.iter().take_while(|c| c.is_whitespace()).count();
    if !matches!(line.get(indent), Some('-' | '*' | '+')) {
        return None;
    }
    let gap = line[indent + 1..]
        .iter()
        .take_while(|c| c.is_whitespace())
        .count();
    (gap > 0).then_some(indent + 1 + gap)
}
