//! Display formatting for numbers and dates.
//!
//! Every function here is total: NaN, infinities and missing values come back
//! as the `-` placeholder instead of an error.

use chrono::NaiveDate;

use crate::errors::CoreError;

/// Shown wherever a value is missing or unusable.
pub const PLACEHOLDER: &str = "-";

/// Axis names whose values are multiples rather than prices.
const RATIO_AXES: [&str; 3] = ["ps", "pe", "ratio"];

/// Magnitude suffixes for compact notation, largest first.
const MAGNITUDES: [(f64, &str); 4] = [(1e12, "t"), (1e9, "b"), (1e6, "m"), (1e3, "k")];

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// `value` scaled to magnitude `level` (an index into `MAGNITUDES`, or
/// `MAGNITUDES.len()` for no suffix).
fn scaled_to(value: f64, level: usize) -> (f64, &'static str) {
    match MAGNITUDES.get(level) {
        Some((threshold, suffix)) => (value / threshold, *suffix),
        None => (value, ""),
    }
}

/// Compact notation with a magnitude letter: `1234567.0, 2` → `1.23m`.
/// The suffix is chosen on the absolute value after rounding, so
/// `999999.0, 2` is `1.00m`, not `1000.00k`.
fn compact(value: f64, decimals: usize) -> String {
    let abs = value.abs();
    let mut level = MAGNITUDES
        .iter()
        .position(|(threshold, _)| abs >= *threshold)
        .unwrap_or(MAGNITUDES.len());

    let factor = 10f64.powi(decimals as i32);
    let (scaled, _) = scaled_to(value, level);
    if level > 0 && (scaled.abs() * factor).round() / factor >= 1000.0 {
        level -= 1;
    }

    let (scaled, suffix) = scaled_to(value, level);
    format!("{scaled:.decimals$}{suffix}")
}

/// Fixed decimals with comma thousands separators: `1234.5, 2` → `1,234.50`.
fn grouped(value: f64, decimals: usize) -> String {
    let digits = format!("{:.decimals$}", value.abs());
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + int_part.len() / 3 + 1);
    // No "-0.00": only signed when something non-zero survives rounding.
    if value < 0.0 && digits.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Price label: `$` + compact notation with two decimals (`$1.23m`).
/// Missing, zero and non-finite values render as `-`.
#[must_use]
pub fn label_for_price(value: Option<f64>) -> String {
    match finite(value) {
        Some(v) if v != 0.0 => format!("${}", compact(v, 2)),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Compact number with two decimals (`1.23k`).
/// Zero and the `-1` "no data" sentinel render as `-`.
#[must_use]
pub fn label_for_number(value: Option<f64>) -> String {
    match finite(value) {
        Some(v) if v != 0.0 && v != -1.0 => compact(v, 2),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Percentage with two decimals and grouped thousands (`3.46%`).
/// With `with_sign`, positive values get a leading `+`.
#[must_use]
pub fn label_for_percentage(value: f64, with_sign: bool) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let sign = if with_sign && value > 0.0 { "+" } else { "" };
    format!("{sign}{}%", grouped(value, 2))
}

/// Y-axis tick label: `$` + compact notation with one decimal, or `<n>x`
/// for ratio axes (`ps`, `pe`, `ratio`).
#[must_use]
pub fn label_for_chart(value: Option<f64>, axis: Option<&str>) -> String {
    let Some(v) = finite(value) else {
        return PLACEHOLDER.to_string();
    };
    if axis.is_some_and(|a| RATIO_AXES.contains(&a)) {
        format!("{}x", compact(v, 1))
    } else {
        format!("${}", compact(v, 1))
    }
}

/// Tooltip price: full precision with grouped thousands (`$1,234.50`).
#[must_use]
pub fn label_for_tooltip(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("${}", grouped(value, 2))
}

/// Fraction to percent string: `to_percent(0.125, 1)` → `12.5%`.
#[must_use]
pub fn to_percent(decimal: f64, fixed: usize) -> String {
    if !decimal.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{:.fixed$}%", decimal * 100.0)
}

// ── Dates ───────────────────────────────────────────────────────────

/// Parse a dataset day key. Only the canonical `YYYY-MM-DD` form is
/// accepted, so two distinct keys can never name the same day.
pub fn parse_day_key(key: &str) -> Result<NaiveDate, CoreError> {
    let date = NaiveDate::parse_from_str(key, "%Y-%m-%d")
        .map_err(|e| CoreError::InvalidDate(format!("{key}: {e}")))?;
    if date.format("%Y-%m-%d").to_string() != key {
        return Err(CoreError::InvalidDate(format!("{key}: not in YYYY-MM-DD form")));
    }
    Ok(date)
}

/// Short axis label for a day: `Jan 1`.
#[must_use]
pub fn format_day_label(day: NaiveDate) -> String {
    day.format("%b %-d").to_string()
}

/// Full month name of a day: `January`.
#[must_use]
pub fn month_name(day: NaiveDate) -> String {
    day.format("%B").to_string()
}
