/*
 * Utility functions and helpers
 */

use crate::models::{Amount, Result, SwapscopeError};
use ethers::types::Address;
use num_bigint::BigUint;
use num_traits::{Num, Zero};
use serde_json::Value;
use std::str::FromStr;

/// Scales a human amount ("1.5") to integer base units for `decimals`.
pub fn to_base_units(amount: &str, decimals: u8) -> Result<String> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(SwapscopeError::InvalidInput("Amount is empty".to_string()));
    }

    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    if fraction.len() > usize::from(decimals) {
        return Err(SwapscopeError::InvalidInput(format!(
            "Amount {amount} has more than {decimals} decimal places"
        )));
    }

    let whole = if whole.is_empty() { "0" } else { whole };
    let digits = format!("{whole}{fraction:0<width$}", width = usize::from(decimals));
    let units = BigUint::from_str_radix(&digits, 10)
        .map_err(|e| SwapscopeError::InvalidInput(format!("Invalid amount {amount}: {e}")))?;

    if units.is_zero() {
        return Err(SwapscopeError::InvalidInput(
            "Amount must be greater than zero".to_string(),
        ));
    }

    Ok(units.to_string())
}

/// Reads an amount from a string or number field; missing, negative or
/// non-numeric values are zero.
#[must_use]
pub fn amount_field(value: Option<&Value>) -> Amount {
    match value {
        Some(Value::String(s)) => Amount::parse_lenient(s),
        Some(Value::Number(n)) => match n.as_u64() {
            Some(units) => Amount::from(units),
            None => Amount::parse_lenient(&n.to_string()),
        },
        _ => Amount::zero(),
    }
}

/// Reads a percentage as `f64`, `0.0` when missing or unparsable.
#[must_use]
pub fn percent_field(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

/// Reads a string-ish field verbatim, numbers included.
#[must_use]
pub fn string_field(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

pub fn format_address(address: &str) -> Result<String> {
    if !address.starts_with("0x") || address.len() != 42 {
        return Err(SwapscopeError::InvalidInput(format!(
            "Invalid address format: {address}"
        )));
    }
    let parsed = Address::from_str(address)
        .map_err(|e| SwapscopeError::InvalidInput(format!("Invalid address {address}: {e}")))?;
    Ok(format!("{parsed:?}"))
}

/// Display formatting for amounts in base units of a token, rounded to six
/// places.
#[must_use]
pub fn format_token_amount(amount: &Amount, decimals: u8) -> String {
    if amount.is_zero() {
        return "0".to_string();
    }
    let ten = BigUint::from(10u32);
    let divisor = ten.pow(amount.scale() + u32::from(decimals));
    if amount.digits() * ten.pow(4) < divisor {
        return "< 0.0001".to_string();
    }
    let rounded = (amount.digits() * ten.pow(6) + &divisor / 2u32) / &divisor;
    Amount::new(rounded, 6).to_string()
}
