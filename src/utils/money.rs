//! Price parsing and pt-BR currency formatting.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Largest price that fits the `numeric(12,2)` column.
pub const MAX_PRICE: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Errors produced while parsing a submitted price.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PriceError {
    #[error("Price must be a number")]
    NotANumber,

    #[error("Price cannot be negative")]
    Negative,

    #[error("Price is too large")]
    TooLarge,
}

/// Parses a user-supplied price.
///
/// Accepts `39.9`, `39.90`, the comma-decimal form `39,90` and grouped
/// amounts such as `1.234,50` or `1,234.50`. When both separators appear,
/// the last one is the decimal mark. The value is rounded to two decimal
/// places.
pub fn parse_price(raw: &str) -> Result<Decimal, PriceError> {
    let trimmed = raw.trim();
    let normalized = match (trimmed.rfind(','), trimmed.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => trimmed.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => trimmed.replace(',', ""),
        (Some(_), None) => trimmed.replace(',', "."),
        _ => trimmed.to_string(),
    };

    let value = Decimal::from_str(&normalized).map_err(|_| PriceError::NotANumber)?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(PriceError::Negative);
    }

    let value = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if value > MAX_PRICE {
        return Err(PriceError::TooLarge);
    }

    Ok(value)
}

/// Formats a number with two decimals, `.` for thousands and `,` for decimals.
///
/// ```ignore
/// assert_eq!(format_decimal_br(dec!(1234.5)), "1.234,50");
/// ```
pub fn format_decimal_br(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{sign}{grouped},{frac_part}")
}

/// Formats a price in Brazilian reais: `R$ 1.234,50`.
pub fn format_brl(value: Decimal) -> String {
    format!("R$ {}", format_decimal_br(value))
}
