//! Display formatting for numbers, hashes, rates and times

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::constants::TOKEN_SYMBOL;

/// Formats with thousands separators and at most three fraction digits.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.3}", value.abs());
    let fixed = fixed.trim_end_matches('0').trim_end_matches('.');
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let negative = value < 0.0 && fixed != "0";
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

pub fn format_currency(value: f64) -> String {
    format!("{} {}", format_number(value), TOKEN_SYMBOL)
}

/// Shortens a hash to `head...tail` when it is longer than both parts combined.
pub fn truncate_hash(hash: &str, head: usize, tail: usize) -> String {
    let count = hash.chars().count();
    if count <= head + tail {
        return hash.to_string();
    }
    let start: String = hash.chars().take(head).collect();
    let end: String = hash.chars().skip(count - tail).collect();
    format!("{}...{}", start, end)
}

pub fn format_hash_rate(hash_rate: f64) -> String {
    if hash_rate >= 1_000_000.0 {
        format!("{:.1} MH/s", hash_rate / 1_000_000.0)
    } else if hash_rate >= 1_000.0 {
        format!("{:.1} KH/s", hash_rate / 1_000.0)
    } else {
        format!("{} H/s", hash_rate)
    }
}

pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Relative age of a millisecond timestamp against `now_ms`.
pub fn block_age(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = (now_ms - timestamp_ms).max(0);
    let minutes = diff / 60_000;
    let hours = diff / 3_600_000;
    let days = diff / 86_400_000;
    if days > 0 {
        format!("{}d ago", days)
    } else if hours > 0 {
        format!("{}h ago", hours)
    } else if minutes > 0 {
        format!("{}m ago", minutes)
    } else {
        "just now".to_string()
    }
}

/// Local date-time for a millisecond timestamp
pub fn format_timestamp(timestamp_ms: i64) -> String {
    match Utc.timestamp_millis_opt(timestamp_ms).single() {
        Some(dt) => DateTime::<Local>::from(dt).format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "-".to_string(),
    }
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
