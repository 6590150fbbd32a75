use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;
use tracing::warn;

/// A single layout attempt. The list below is tried in order; the first
/// layout that consumes the whole input wins. Order matters: specific
/// layouts come before looser ones that could misread them.
enum DateLayout {
    /// Offset-bearing format parsed to a fixed-offset datetime.
    Offset(&'static str),
    /// RFC 2822 with a named zone (PDT, GMT, ...).
    Rfc2822,
    /// Zone-less format, anchored to UTC.
    Naive(&'static str),
    /// Date-only format, midnight UTC.
    DateOnly(&'static str),
}

const LAYOUTS: &[DateLayout] = &[
    // RFC 2822, the common case in RSS: "Sun, 05 Oct 2025 19:25:37 -0700"
    DateLayout::Offset("%a, %d %b %Y %H:%M:%S %z"),
    // "Sun, 05 Oct 2025 19:25:37 PDT"
    DateLayout::Rfc2822,
    // "Sun, 05 Oct 2025 19:25:37"
    DateLayout::Naive("%a, %d %b %Y %H:%M:%S"),
    // ISO 8601: "2025-10-05T19:25:37-07:00"
    DateLayout::Offset("%Y-%m-%dT%H:%M:%S%z"),
    // "2025-10-05T19:25:37Z"
    DateLayout::Naive("%Y-%m-%dT%H:%M:%SZ"),
    // "2025-10-05T19:25:37"
    DateLayout::Naive("%Y-%m-%dT%H:%M:%S"),
    // "2025-10-05 19:25:37"
    DateLayout::Naive("%Y-%m-%d %H:%M:%S"),
    // "2025-10-05"
    DateLayout::DateOnly("%Y-%m-%d"),
    // "05 Oct 2025 19:25:37 -0700"
    DateLayout::Offset("%d %b %Y %H:%M:%S %z"),
    // "05 Oct 2025"
    DateLayout::DateOnly("%d %b %Y"),
];

fn numeric_offset_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([+-]\d{2})(\d{2})$").expect("valid offset regex"))
}

fn day_month_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d{1,2})\s+([A-Za-z]{3})\s+(\d{4})").expect("valid fallback regex")
    })
}

/// Normalizes the heterogeneous date strings found in RSS feeds into a
/// single comparable UTC instant. Returns `None` for anything unparseable;
/// never errors. Zone-less inputs are anchored to UTC.
pub fn normalize_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Rewrite a trailing colonless offset ("-0700" -> "-07:00") before
    // matching, so every offset layout sees one spelling.
    let date_string: Cow<'_, str> = numeric_offset_re().replace(trimmed, "${1}:${2}");

    for layout in LAYOUTS {
        if let Some(parsed) = try_layout(layout, &date_string) {
            return Some(parsed);
        }
    }

    if let Some(parsed) = extract_day_month_year(&date_string) {
        return Some(parsed);
    }

    warn!("Could not parse date: {}", raw);
    None
}

fn try_layout(layout: &DateLayout, value: &str) -> Option<DateTime<Utc>> {
    match layout {
        DateLayout::Offset(format) => DateTime::parse_from_str(value, format)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        DateLayout::Rfc2822 => DateTime::parse_from_rfc2822(value)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        DateLayout::Naive(format) => NaiveDateTime::parse_from_str(value, format)
            .ok()
            .map(|naive| naive.and_utc()),
        DateLayout::DateOnly(format) => NaiveDate::parse_from_str(value, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc()),
    }
}

/// Last-resort extraction of a "<day> <Mon> <year>" substring anywhere in the
/// input. A day out of range for the month is tolerated and yields `None`.
fn extract_day_month_year(value: &str) -> Option<DateTime<Utc>> {
    let caps = day_month_year_re().captures(value)?;
    let day: u32 = caps[1].parse().ok()?;
    let month = month_number(&caps[2])?;
    let year: i32 = caps[3].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
}

fn month_number(abbreviation: &str) -> Option<u32> {
    let month = match abbreviation {
        "Jan" => 1,
        "Feb" => 2,
        "Mar" => 3,
        "Apr" => 4,
        "May" => 5,
        "Jun" => 6,
        "Jul" => 7,
        "Aug" => 8,
        "Sep" => 9,
        "Oct" => 10,
        "Nov" => 11,
        "Dec" => 12,
        _ => return None,
    };
    Some(month)
}
