use chrono::NaiveDateTime;

/// Human label for a status token: `IN_PROGRESS` → `In Progress`.
///
/// Missing or empty input gives `Unknown`. Words are split on underscores
/// and spaces, so feeding a formatted label back in yields the same label.
pub fn format_status_label(status: Option<&str>) -> String {
    let status = match status {
        Some(s) if !s.is_empty() => s,
        _ => return "Unknown".to_string(),
    };
    status
        .to_lowercase()
        .split(['_', ' '])
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Calendar date for display, or `missing` when absent.
pub fn format_date(date: Option<NaiveDateTime>, missing: &str) -> String {
    match date {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => missing.to_string(),
    }
}
