/*
 * Exact non-negative token amounts of unbounded size
 */

use super::SwapscopeError;
use num_bigint::BigUint;
use num_traits::{FromPrimitive, Zero};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

fn pow10(exponent: u32) -> BigUint {
    BigUint::from(10u32).pow(exponent)
}

/// `digits / 10^scale`, kept with no trailing fractional zeros.
#[derive(Debug, Clone, Default)]
pub struct Amount {
    digits: BigUint,
    scale: u32,
}

impl Amount {
    #[must_use]
    pub fn new(digits: BigUint, scale: u32) -> Self {
        let mut digits = digits;
        let mut scale = scale;
        let ten = BigUint::from(10u32);
        while scale > 0 && !digits.is_zero() && (&digits % &ten).is_zero() {
            digits /= &ten;
            scale -= 1;
        }
        if digits.is_zero() {
            scale = 0;
        }
        Self { digits, scale }
    }

    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.digits.is_zero()
    }

    #[must_use]
    pub fn digits(&self) -> &BigUint {
        &self.digits
    }

    #[must_use]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Both values as integers over a shared power of ten.
    #[must_use]
    pub fn aligned(&self, other: &Amount) -> (BigUint, BigUint, u32) {
        let scale = self.scale.max(other.scale);
        (
            &self.digits * pow10(scale - self.scale),
            &other.digits * pow10(scale - other.scale),
            scale,
        )
    }

    /// Lenient read of aggregator output: scientific notation and floats are
    /// truncated to whole units, negatives and garbage read as zero.
    #[must_use]
    pub fn parse_lenient(text: &str) -> Self {
        let text = text.trim();
        if let Ok(amount) = Amount::from_str(text) {
            return amount;
        }
        text.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value > 0.0)
            .and_then(BigUint::from_f64)
            .map(Amount::from)
            .unwrap_or_default()
    }

    /// Multiplies by `1 - percent/100`; `percent` outside `[0, 100]` is clamped.
    #[must_use]
    pub fn less_percent(&self, percent: Decimal) -> Self {
        if percent <= Decimal::ZERO {
            return self.clone();
        }
        if percent >= Decimal::ONE_HUNDRED {
            return Self::zero();
        }
        let percent = percent.normalize();
        let scale = percent.scale();
        let cut = BigUint::from(percent.mantissa().unsigned_abs());
        let kept = BigUint::from(100u32) * pow10(scale) - cut;
        Self::new(&self.digits * kept, self.scale + scale + 2)
    }
}

impl From<BigUint> for Amount {
    fn from(digits: BigUint) -> Self {
        Self::new(digits, 0)
    }
}

impl From<u64> for Amount {
    fn from(units: u64) -> Self {
        Self::new(BigUint::from(units), 0)
    }
}

impl FromStr for Amount {
    type Err = SwapscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SwapscopeError::InvalidInput(format!("Invalid amount {s}"));
        let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.len() + fraction.len() == 0 || !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid());
        }
        let digits = BigUint::parse_bytes(format!("{whole}{fraction}").as_bytes(), 10)
            .ok_or_else(invalid)?;
        let scale = u32::try_from(fraction.len()).map_err(|_| invalid())?;
        Ok(Self::new(digits, scale))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.digits);
        }
        let text = self.digits.to_string();
        let scale = self.scale as usize;
        let padded = format!("{text:0>width$}", width = scale + 1);
        let (whole, fraction) = padded.split_at(padded.len() - scale);
        write!(f, "{whole}.{fraction}")
    }
}

impl PartialEq for Amount {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Amount {}

impl PartialOrd for Amount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Amount {
    fn cmp(&self, other: &Self) -> Ordering {
        let (left, right, _) = self.aligned(other);
        left.cmp(&right)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Amount::from_str(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_beyond_decimal_range_compare_exactly() {
        let big = Amount::from_str("100000000000000000000000000000").unwrap();
        let bigger = Amount::from_str("100000000000000000000000000001").unwrap();
        assert!(bigger > big);
        assert!(big > Amount::from(5u64));
        assert_eq!(big.to_string(), "100000000000000000000000000000");
    }

    #[test]
    fn equality_ignores_trailing_zeros() {
        assert_eq!(Amount::from_str("995.000").unwrap(), Amount::from(995u64));
        assert_eq!(Amount::from_str("0.50").unwrap().to_string(), "0.5");
        assert_eq!(Amount::from_str("0.05").unwrap().to_string(), "0.05");
        assert!(Amount::from_str("-1").is_err());
        assert!(Amount::from_str("").is_err());
        assert!(Amount::from_str("1e29").is_err());
    }

    #[test]
    fn lenient_parse_truncates_or_zeroes() {
        assert_eq!(Amount::parse_lenient("1e3"), Amount::from(1000u64));
        assert_eq!(Amount::parse_lenient("-4"), Amount::zero());
        assert_eq!(Amount::parse_lenient("oops"), Amount::zero());
    }

    #[test]
    fn less_percent_keeps_fractions() {
        let out = Amount::from(1001u64).less_percent(Decimal::new(5, 1));
        assert_eq!(out.to_string(), "995.995");
        assert_eq!(Amount::from(1000u64).less_percent(Decimal::ONE_HUNDRED), Amount::zero());
        assert_eq!(Amount::from(1000u64).less_percent(Decimal::ZERO), Amount::from(1000u64));
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&Amount::from(2500u64)).unwrap();
        assert_eq!(json, "\"2500\"");
        let back: Amount = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(back, Amount::from_str("12.5").unwrap());
    }
}
