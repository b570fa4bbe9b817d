//! Money helpers
//!
//! Amounts are exact `Decimal` values with at most 12 digits, 2 of them
//! after the decimal point. Rounding happens only for presentation.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::errors::DomainError;

/// Minor-unit precision of the currency
pub const CURRENCY_SCALE: u32 = 2;

/// Largest number of integer digits an amount may carry (12 total, 2 fractional)
const MAX_INTEGER_DIGITS: u32 = 10;

/// Reject negative amounts and amounts that do not fit `NUMERIC(12, 2)`
pub fn validate_amount(amount: Decimal) -> Result<(), DomainError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(DomainError::validation("amount must not be negative"));
    }
    if amount.normalize().scale() > CURRENCY_SCALE {
        return Err(DomainError::validation(format!(
            "amount must have at most {} decimal places",
            CURRENCY_SCALE
        )));
    }
    if amount.trunc() >= Decimal::from(10_i64.pow(MAX_INTEGER_DIGITS)) {
        return Err(DomainError::validation(format!(
            "amount must have at most {} integer digits",
            MAX_INTEGER_DIGITS
        )));
    }
    Ok(())
}

/// Round to the currency's minor unit, half-to-even
pub fn round_currency(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(CURRENCY_SCALE);
    rounded
}

/// Format as Brazilian Real, e.g. `R$ 1.500,00` or `-R$ 200,00`
pub fn format_brl(value: Decimal) -> String {
    let rounded = round_currency(value);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("{}R$ {},{}", if negative { "-" } else { "" }, grouped, fraction)
}
