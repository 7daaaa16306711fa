use derive_getters::Getters;
use rust_decimal::{Decimal, RoundingStrategy};

use super::Quantity;
use crate::error::MoneyError;

/// Fixed-point monetary amount. `value` always carries exactly `precision`
/// fractional digits, so its mantissa is the amount in minor units.
#[derive(Clone, Debug, Eq, Getters, PartialEq)]
pub struct Money {
    value: Decimal,
    precision: u32,
    currency: String,
}

impl Money {
    /// Converts a decimal to minor units, rounding half away from zero. This is
    /// the only place where a monetary value is rounded to the nearest unit.
    pub fn from_decimal(value: Decimal, precision: u32, currency: &str) -> Self {
        let mut value = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
        value.rescale(precision);
        Self {
            value,
            precision,
            currency: currency.to_string(),
        }
    }

    pub fn zero(precision: u32, currency: &str) -> Self {
        Self::from_decimal(Decimal::ZERO, precision, currency)
    }

    fn from_minor(minor: i128, precision: u32, currency: &str) -> Result<Self, MoneyError> {
        let value =
            Decimal::try_from_i128_with_scale(minor, precision).map_err(|_| MoneyError::Overflow)?;
        Ok(Self {
            value,
            precision,
            currency: currency.to_string(),
        })
    }

    fn minor(&self) -> i128 {
        self.value.mantissa()
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Changes precision. Widening is exact; narrowing rounds half away from zero.
    pub fn rescale(&self, precision: u32) -> Self {
        Self::from_decimal(self.value, precision, &self.currency)
    }

    fn aligned(&self, other: &Money) -> Result<(Money, Money), MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch {
                left: self.currency.clone(),
                right: other.currency.clone(),
            });
        }
        let precision = self.precision.max(other.precision);
        Ok((self.rescale(precision), other.rescale(precision)))
    }

    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        let (a, b) = self.aligned(other)?;
        let minor = a.minor().checked_add(b.minor()).ok_or(MoneyError::Overflow)?;
        Self::from_minor(minor, a.precision, &a.currency)
    }

    pub fn subtract(&self, other: &Money) -> Result<Money, MoneyError> {
        let (a, b) = self.aligned(other)?;
        let minor = a.minor().checked_sub(b.minor()).ok_or(MoneyError::Overflow)?;
        Self::from_minor(minor, a.precision, &a.currency)
    }

    pub fn minimum(&self, other: &Money) -> Result<Money, MoneyError> {
        let (a, b) = self.aligned(other)?;
        Ok(if b.minor() < a.minor() { b } else { a })
    }

    /// Per-share amount times a share count. Truncates toward zero.
    pub fn multiply(&self, quantity: Quantity) -> Result<Money, MoneyError> {
        let minor = self
            .minor()
            .checked_mul(i128::from(quantity.ticks()))
            .ok_or(MoneyError::Overflow)?
            / i128::from(Quantity::SCALE);
        Self::from_minor(minor, self.precision, &self.currency)
    }

    /// `self * part / whole`, truncated toward zero.
    pub fn proportion(&self, part: Quantity, whole: Quantity) -> Result<Money, MoneyError> {
        if whole.is_zero() {
            return Err(MoneyError::DivideByZero);
        }
        let minor = self
            .minor()
            .checked_mul(i128::from(part.ticks()))
            .ok_or(MoneyError::Overflow)?
            / i128::from(whole.ticks());
        Self::from_minor(minor, self.precision, &self.currency)
    }

    /// Amount per share at `precision` fractional digits, truncated toward zero.
    pub fn per_share(&self, quantity: Quantity, precision: u32) -> Result<Money, MoneyError> {
        if quantity.is_zero() {
            return Err(MoneyError::DivideByZero);
        }
        let minor = self
            .rescale(precision)
            .minor()
            .checked_mul(i128::from(Quantity::SCALE))
            .ok_or(MoneyError::Overflow)?
            / i128::from(quantity.ticks());
        Self::from_minor(minor, precision, &self.currency)
    }

    pub fn format(&self, decimals: u32) -> String {
        self.rescale(decimals).value.to_string()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}
