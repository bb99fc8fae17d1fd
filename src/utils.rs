// src/utils.rs
use std::fmt::Write as _;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Normalize a name part for file system usage.
pub fn sanitize_name_part(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Format an ISO-like date string for display.
///
/// `"2020-01"` and `"2020-01-15"` become `"Jan 2020"`, a bare `"2020"` stays
/// as-is, and anything unparseable renders verbatim rather than erroring.
pub fn format_display_date(date: &str) -> String {
    let date = date.trim();
    if date.is_empty() {
        return String::new();
    }

    let mut parts = date.splitn(3, '-');
    let year = parts.next().unwrap_or_default();
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return date.to_string();
    }

    match parts.next() {
        None => year.to_string(),
        Some(month) => match month.parse::<usize>() {
            Ok(m) if (1..=12).contains(&m) => format!("{} {}", MONTHS[m - 1], year),
            _ => date.to_string(),
        },
    }
}

/// Build the displayed date range for an entry.
///
/// `current` entries always show "Present" regardless of any end date; a
/// missing end date on a non-current entry renders the start date alone.
pub fn date_range(start: &str, end: Option<&str>, current: bool) -> String {
    let start_display = format_display_date(start);
    let end_display = if current {
        "Present".to_string()
    } else {
        end.map(format_display_date).unwrap_or_default()
    };

    match (start_display.is_empty(), end_display.is_empty()) {
        (false, false) => format!("{} - {}", start_display, end_display),
        (false, true) => start_display,
        (true, false) => end_display,
        (true, true) => String::new(),
    }
}

/// Join non-empty fragments with a separator.
pub fn join_nonempty(parts: &[&str], separator: &str) -> String {
    let mut out = String::new();
    for part in parts.iter().filter(|p| !p.is_empty()) {
        if !out.is_empty() {
            out.push_str(separator);
        }
        let _ = write!(out, "{}", part);
    }
    out
}
