use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

const BAR_CELL: char = '█';

/// Format a decimal amount with thousand separators and 2 decimal places.
/// e.g. `1234567.89` → `"1,234,567.89"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let abs = val
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < Decimal::ZERO && abs > Decimal::ZERO {
        format!("-${with_commas}.{dec_part}")
    } else {
        format!("${with_commas}.{dec_part}")
    }
}

/// Whole-number percentage, e.g. `"85%"`.
pub(crate) fn format_percent(val: Decimal) -> String {
    let rounded = val.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.0}%")
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// The result is guaranteed to be at most `max` characters (counting "…" as one).
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Horizontal bar scaled so that `max` fills `width` cells. Any positive
/// value gets at least one cell; values above `max` are capped.
pub(crate) fn bar(value: Decimal, max: Decimal, width: usize) -> String {
    if value <= Decimal::ZERO || max <= Decimal::ZERO || width == 0 {
        return String::new();
    }
    let width_dec = Decimal::from(width);
    let cells = value
        .checked_mul(width_dec)
        .and_then(|scaled| scaled.checked_div(max))
        .or_else(|| value.checked_div(max).and_then(|ratio| ratio.checked_mul(width_dec)))
        .map(|c| c.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|c| c.to_usize())
        .unwrap_or(width)
        .clamp(1, width);
    std::iter::repeat(BAR_CELL).take(cells).collect()
}
