//! Money type for representing currency amounts
//!
//! Internally stores amounts in hundredths of the currency unit (i64) to
//! avoid floating-point drift when summing. On disk an amount is a plain
//! JSON number in currency units (`25000`, `12.5`).
//!
//! Amounts are bounded by [`Money::MAX`] in both directions. Parsing and
//! deserializing reject anything larger, so a fractional amount always
//! reads back from its JSON float form to the same hundredths.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Neg;

/// A monetary amount stored as hundredths of the currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Largest accepted amount: 999,999,999,999.99
    pub const MAX: Money = Money(99_999_999_999_999);

    /// Create a Money amount from hundredths
    ///
    /// # Examples
    /// ```
    /// use cashbook_cli::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    ///
    /// # Examples
    /// ```
    /// use cashbook_cli::models::Money;
    /// assert_eq!(Money::from_units(25).cents(), 2500);
    /// ```
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in hundredths
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the hundredths portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Add two amounts, clamping at the i64 range instead of overflowing
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Subtract two amounts, clamping at the i64 range instead of overflowing
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// `Some` when `cents` lies within `-MAX..=MAX`
    fn bounded(cents: i64) -> Option<Self> {
        (cents.unsigned_abs() <= Self::MAX.0.unsigned_abs()).then_some(Self(cents))
    }

    /// The amount in currency units as a float, for display and export
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parse a money amount from user input
    ///
    /// Accepts an optional sign, digits, and at most two fractional digits:
    /// "25000", "12.5", "-3.75", ".5". Exponents, separators and symbols
    /// are rejected, and so is anything beyond [`Money::MAX`].
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        if frac.len() > 2 {
            return Err(MoneyParseError::TooPrecise(s.to_string()));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| MoneyParseError::Overflow(s.to_string()))?
        };

        // frac is at most two ASCII digits here
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().unwrap_or(0) * 10,
            _ => frac.parse().unwrap_or(0),
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .and_then(Self::bounded)
            .ok_or_else(|| MoneyParseError::Overflow(s.to_string()))?;

        Ok(if negative { -cents } else { cents })
    }

    /// Convert a JSON float in currency units to hundredths
    fn from_f64_units(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents.abs() > Self::MAX.0 as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents_part())
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.units())
        } else {
            serializer.serialize_f64(self.as_f64())
        }
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number of currency units")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(100)
            .and_then(Money::bounded)
            .ok_or_else(|| E::custom(format!("amount out of range: {}", v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        let v = i64::try_from(v).map_err(|_| E::custom(format!("amount out of range: {}", v)))?;
        self.visit_i64(v)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Money::from_f64_units(v).ok_or_else(|| E::custom(format!("amount out of range: {}", v)))
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    Empty,
    InvalidFormat(String),
    TooPrecise(String),
    Overflow(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Empty => write!(f, "amount is empty"),
            MoneyParseError::InvalidFormat(_) => write!(f, "not a number"),
            MoneyParseError::TooPrecise(_) => write!(f, "at most two decimal places allowed"),
            MoneyParseError::Overflow(_) => write!(f, "amount is too large"),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-10.50");
        assert_eq!(format!("{}", Money::from_cents(5)), "0.05");
    }

    #[test]
    fn test_negation() {
        assert_eq!((-Money::from_cents(1000)).cents(), -1000);
        assert_eq!(-Money::zero(), Money::zero());
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse("  25000 ").unwrap().cents(), 2_500_000);
        assert_eq!(Money::parse("0").unwrap().cents(), 0);
    }

    #[test]
    fn test_parse_rejects_non_numbers() {
        assert_eq!(Money::parse(""), Err(MoneyParseError::Empty));
        assert_eq!(Money::parse("   "), Err(MoneyParseError::Empty));
        for input in ["abc", "1e3", "inf", "NaN", "1,000", "$5", "1.2.3", ".", "-", "12a"] {
            assert!(
                matches!(Money::parse(input), Err(MoneyParseError::InvalidFormat(_))),
                "{input} should be rejected"
            );
        }
        assert!(matches!(
            Money::parse("1.005"),
            Err(MoneyParseError::TooPrecise(_))
        ));
        assert!(matches!(
            Money::parse("99999999999999999999"),
            Err(MoneyParseError::Overflow(_))
        ));
    }

    #[test]
    fn test_parse_enforces_max() {
        assert_eq!(Money::parse("999999999999.99"), Ok(Money::MAX));
        assert_eq!(Money::parse("-999999999999.99"), Ok(-Money::MAX));
        for input in ["1000000000000", "-1000000000000", "92233720368547758", "90071992547409.93"] {
            assert!(
                matches!(Money::parse(input), Err(MoneyParseError::Overflow(_))),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_saturating_arithmetic() {
        let huge = Money::from_cents(i64::MAX - 1);
        assert_eq!(huge.saturating_add(huge).cents(), i64::MAX);
        assert_eq!((-huge).saturating_sub(huge).cents(), i64::MIN);
        assert_eq!(
            Money::from_cents(1000).saturating_sub(Money::from_cents(250)),
            Money::from_cents(750)
        );
    }

    #[test]
    fn test_comparison() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert!(a > b);
        assert!(b < a);
        assert_eq!(a, Money::from_units(10));
    }

    #[test]
    fn test_serialization() {
        assert_eq!(serde_json::to_string(&Money::from_units(25000)).unwrap(), "25000");
        assert_eq!(serde_json::to_string(&Money::from_cents(1050)).unwrap(), "10.5");
        assert_eq!(serde_json::to_string(&Money::from_cents(5)).unwrap(), "0.05");

        for cents in [5, 1050, 1999, 2_500_000, 123_456_789] {
            let m = Money::from_cents(cents);
            let json = serde_json::to_string(&m).unwrap();
            let back: Money = serde_json::from_str(&json).unwrap();
            assert_eq!(m, back);
        }
    }

    #[test]
    fn test_amounts_near_max_survive_json() {
        let top = Money::MAX.cents();
        for cents in (top - 250..=top).chain([1_234_567_890_123, 99_999_999_999_901]) {
            let m = Money::from_cents(cents);
            let json = serde_json::to_string(&m).unwrap();
            let back: Money = serde_json::from_str(&json).unwrap();
            assert_eq!(m, back, "{json}");
        }
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        for json in ["90071992547409.93", "1000000000000", "-1000000000000.5", "1e300"] {
            assert!(serde_json::from_str::<Money>(json).is_err(), "{json} should be rejected");
        }
        let max: Money = serde_json::from_str("999999999999.99").unwrap();
        assert_eq!(max, Money::MAX);
    }

    #[test]
    fn test_deserialize_float_whole_number() {
        let m: Money = serde_json::from_str("25000.0").unwrap();
        assert_eq!(m, Money::from_units(25000));
        assert!(serde_json::from_str::<Money>("\"12\"").is_err());
    }
}
