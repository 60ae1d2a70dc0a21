//! Coerce-or-null parsing of the free-text values the metadata API returns.
//!
//! Every function returns `None` for `N/A`, empty strings and anything else
//! that does not parse. None of them fail.

pub fn duration_minutes(raw: &str) -> Option<i32> {
    let s = raw.trim();
    let s = s.strip_suffix("min").unwrap_or(s).trim_end();
    s.parse().ok()
}

pub fn year(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

pub fn rating(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|r| r.is_finite())
}

/// `"$292,587,330"` -> 292587330.0
pub fn money(raw: &str) -> Option<f64> {
    let s = strip_separators(raw);
    let s = s.strip_prefix('$').unwrap_or(&s);
    s.parse::<f64>().ok().filter(|m| m.is_finite())
}

fn strip_separators(raw: &str) -> String {
    raw.trim().chars().filter(|c| *c != ',').collect()
}

/// Applies `parse` to an optional raw value.
pub fn opt<T>(raw: Option<&str>, parse: fn(&str) -> Option<T>) -> Option<T> {
    raw.and_then(parse)
}
