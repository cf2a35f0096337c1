//! Fixed-point money type.
//!
//! # Scale
//!
//! Every price in the catalog, the cart and the history log is a `Money`
//! value stored as `i64` micros: 1 unit of currency = 1_000_000 micros.
//! Decimal prices such as `5.99` are therefore exact; no floating-point
//! arithmetic is ever used to add up a cart.
//!
//! # Parsing
//!
//! [`Money::parse`] converts a decimal string deterministically and rejects
//! anything that would need rounding (more than 6 decimal places). Catalog
//! documents written by hand usually carry prices as JSON numbers, so the
//! `Deserialize` impl also accepts numbers by going through their shortest
//! decimal rendering.
//!
//! # Serialization
//!
//! `Serialize` writes the canonical decimal string (`"5.99"`, `"2.50"`,
//! `"1.125"`), which round-trips exactly through [`Money::parse`].

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Micros per currency unit.
pub const MICROS_SCALE: i64 = 1_000_000;

/// Micros per cent, used when rounding for display.
const MICROS_PER_CENT: i64 = 10_000;

/// Largest price a single item may carry: 1_000_000_000 currency units.
/// About 9_200 units at this price fit in an `i64` total before totals
/// start to saturate.
pub const MAX_PRICE: Money = Money(1_000_000_000 * MICROS_SCALE);

// ---------------------------------------------------------------------------
// Money newtype
// ---------------------------------------------------------------------------

/// A fixed-point monetary amount at 1e-6 scale.
///
/// There is intentionally no `From<i64>` impl; use [`Money::from_micros`] or
/// [`Money::from_cents`] so the scale is explicit at every call site.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Zero.
    pub const ZERO: Money = Money(0);

    #[inline]
    pub const fn from_micros(raw: i64) -> Self {
        Money(raw)
    }

    /// `Money::from_cents(599)` is `5.99`.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents * MICROS_PER_CENT)
    }

    #[inline]
    pub const fn micros(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Overflow-checked addition.
    #[inline]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Saturating addition; clamps at `i64::MAX` / `i64::MIN` micros.
    #[inline]
    pub fn saturating_add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }

    /// Sum that reports overflow instead of clamping.
    pub fn checked_sum<I: IntoIterator<Item = Money>>(iter: I) -> Option<Money> {
        iter.into_iter()
            .try_fold(Money::ZERO, |acc, m| acc.checked_add(m))
    }

    /// Round to whole cents, half away from zero.
    pub fn round_to_cents(self) -> i64 {
        let half = MICROS_PER_CENT / 2;
        if self.0 >= 0 {
            self.0.saturating_add(half) / MICROS_PER_CENT
        } else {
            self.0.saturating_sub(half) / MICROS_PER_CENT
        }
    }

    /// Two-decimal rendering prefixed by a currency symbol, e.g. `$5.99`.
    pub fn format_with_symbol(self, symbol: &str) -> String {
        format!("{symbol}{self}")
    }

    /// Canonical decimal rendering: at least two fractional digits, trailing
    /// zeros beyond that trimmed. `5_990_000` -> `"5.99"`, `1_125_000` ->
    /// `"1.125"`, `3_000_000` -> `"3.00"`.
    pub fn to_decimal_string(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / MICROS_SCALE as u64;
        let frac = format!("{:06}", abs % MICROS_SCALE as u64);
        let trimmed = frac.trim_end_matches('0');
        let frac = if trimmed.len() < 2 { &frac[..2] } else { trimmed };
        format!("{sign}{whole}.{frac}")
    }

    /// Parse a decimal price string without floating point.
    ///
    /// Accepts an optional sign and an optional fractional part of at most
    /// 6 digits. Rejects empty input, non-digit characters, `NaN`/`inf`
    /// spellings and values that overflow `i64` micros.
    pub fn parse(s: &str) -> Result<Money, MoneyError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MoneyError::Empty);
        }
        let invalid = || MoneyError::Invalid { raw: s.to_string() };

        let (negative, digits) = if let Some(rest) = s.strip_prefix('-') {
            (true, rest)
        } else if let Some(rest) = s.strip_prefix('+') {
            (false, rest)
        } else {
            (false, s)
        };

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };

        let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !all_digits(int_part) || !all_digits(frac_part) {
            return Err(invalid());
        }
        if frac_part.len() > 6 {
            return Err(MoneyError::TooManyDecimalPlaces { raw: s.to_string() });
        }

        let int_val: i64 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| MoneyError::Overflow { raw: s.to_string() })?
        };
        let frac_val: i64 = format!("{frac_part:0<6}").parse().map_err(|_| invalid())?;

        let micros = int_val
            .checked_mul(MICROS_SCALE)
            .and_then(|v| v.checked_add(frac_val))
            .ok_or_else(|| MoneyError::Overflow { raw: s.to_string() })?;

        Ok(Money(if negative { -micros } else { micros }))
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons a decimal price string cannot become [`Money`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    Empty,
    Invalid { raw: String },
    /// More than 6 fractional digits; converting would need rounding.
    TooManyDecimalPlaces { raw: String },
    Overflow { raw: String },
}

impl fmt::Display for MoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyError::Empty => write!(f, "price is empty"),
            MoneyError::Invalid { raw } => write!(f, "price could not be parsed: '{raw}'"),
            MoneyError::TooManyDecimalPlaces { raw } => write!(
                f,
                "price has more than 6 decimal places (ambiguous conversion): '{raw}'"
            ),
            MoneyError::Overflow { raw } => write!(f, "price out of range: '{raw}'"),
        }
    }
}

impl std::error::Error for MoneyError {}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

impl Add for Money {
    type Output = Money;
    #[inline]
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;
    #[inline]
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

/// Saturating: a total never panics or wraps. Use [`Money::checked_sum`]
/// when overflow must be detected.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Money::saturating_add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

// ---------------------------------------------------------------------------
// Display: two decimals, rounded half away from zero
// ---------------------------------------------------------------------------

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.round_to_cents();
        let sign = if cents < 0 { "-" } else { "" };
        let abs = cents.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal price as a string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        Money::parse(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        Money::parse(&v.to_string()).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        Money::parse(&v.to_string()).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        if !v.is_finite() {
            return Err(E::custom(MoneyError::Invalid { raw: v.to_string() }));
        }
        // f64 Display is the shortest string that round-trips, e.g. 5.99 -> "5.99".
        Money::parse(&v.to_string()).map_err(E::custom)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
