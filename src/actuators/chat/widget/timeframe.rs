use crate::actuators::chat::dto::DEFAULT_DAYS;

/// Day count for a raw timeframe selector value.
///
/// Reads a leading integer the way a browser `parseInt` would (leading
/// whitespace, optional sign, digits up to the first non-digit). Anything
/// that yields no digits, zero, a negative number or an overflow falls back
/// to [`DEFAULT_DAYS`]. A missing selector also yields the default.
pub fn resolve_days(value: Option<&str>) -> u32 {
    value.and_then(leading_positive_integer).unwrap_or(DEFAULT_DAYS)
}

fn leading_positive_integer(value: &str) -> Option<u32> {
    let value = value.trim_start();
    let (negative, rest) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let number = rest[..digits].parse::<u32>().ok()?;
    (!negative && number > 0).then_some(number)
}
