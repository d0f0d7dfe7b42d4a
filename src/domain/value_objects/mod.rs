//! Value objects for the storefront domain

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Money value object
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: String,
}

impl Money {
    pub fn new(amount: Decimal, currency: &str) -> Self {
        Self { amount, currency: currency.to_string() }
    }
    pub fn zero(currency: &str) -> Self { Self::new(Decimal::ZERO, currency) }
    pub fn amount(&self) -> Decimal { self.amount }
    pub fn currency(&self) -> &str { &self.currency }
    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency { return Err(MoneyError::CurrencyMismatch); }
        Ok(Money::new(self.amount + other.amount, &self.currency))
    }
    pub fn multiply(&self, qty: u32) -> Money { Money::new(self.amount * Decimal::from(qty), &self.currency) }
}

#[derive(Debug, Clone)] pub enum MoneyError { CurrencyMismatch }
impl std::error::Error for MoneyError {}
impl fmt::Display for MoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Currency mismatch") }
}

/// Review rating on the 1..=5 scale
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(i16);

impl Rating {
    pub fn new(value: i16) -> Result<Self, RatingError> {
        if (1..=5).contains(&value) { Ok(Self(value)) } else { Err(RatingError::OutOfRange) }
    }
    pub fn value(&self) -> i16 { self.0 }
}

#[derive(Debug, Clone)] pub enum RatingError { OutOfRange }
impl std::error::Error for RatingError {}
impl fmt::Display for RatingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Rating must be between 1 and 5") }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn test_money_add() {
        let a = Money::new(Decimal::new(100, 0), "USD");
        let b = Money::new(Decimal::new(50, 0), "USD");
        assert_eq!(a.add(&b).unwrap().amount(), Decimal::new(150, 0));
    }
    #[test]
    fn test_money_currency_mismatch() {
        let a = Money::new(Decimal::new(100, 0), "USD");
        let b = Money::new(Decimal::new(50, 0), "EUR");
        assert!(a.add(&b).is_err());
    }
    #[test]
    fn test_money_multiply() {
        let m = Money::new(Decimal::new(1050, 2), "USD");
        assert_eq!(m.multiply(3).amount(), Decimal::new(3150, 2));
    }
    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(1).is_ok());
        assert!(Rating::new(5).is_ok());
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
    }
}
