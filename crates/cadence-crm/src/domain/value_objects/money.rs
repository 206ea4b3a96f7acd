//! Deal amounts
//!
//! A decimal amount tagged with an ISO 4217 code. Amounts in different
//! currencies never combine; callers decide what to do with a mismatch.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    pub fn usd(amount: Decimal) -> Self {
        Self::new(amount, Currency::usd())
    }

    pub fn amount(&self) -> Decimal { self.amount }
    pub fn currency(&self) -> &Currency { &self.currency }
    pub fn is_zero(&self) -> bool { self.amount.is_zero() }

    /// Sum of two amounts in the same currency
    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch {
                left: self.currency.clone(),
                right: other.currency.clone(),
            });
        }
        Ok(Money::new(self.amount + other.amount, self.currency.clone()))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency)
    }
}

/// Upper-cased currency code, e.g. `USD`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Normalize a code from configuration; blank input means USD
    pub fn from_code(code: &str) -> Self {
        let code = code.trim();
        if code.is_empty() {
            return Self::usd();
        }
        Self(code.to_uppercase())
    }

    pub fn usd() -> Self {
        Self("USD".into())
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::usd()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    #[error("cannot combine {left} with {right}")]
    CurrencyMismatch { left: Currency, right: Currency },
}
