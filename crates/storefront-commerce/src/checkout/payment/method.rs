//! Payment methods and the amount due.

use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the shopper pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    CashOnDelivery,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::CashOnDelivery => "cod",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Credit / Debit Card",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "card" => Some(PaymentMethod::Card),
            "cod" | "cash_on_delivery" | "cash-on-delivery" => Some(PaymentMethod::CashOnDelivery),
            _ => None,
        }
    }

    /// Whether the method is charged up front and needs card details.
    pub fn needs_card(&self) -> bool {
        matches!(self, PaymentMethod::Card)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Amount due for a checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub total: Money,
}

impl PaymentSummary {
    pub fn new(subtotal: Money, delivery_fee: Money) -> Result<Self, CommerceError> {
        Ok(Self {
            subtotal,
            delivery_fee,
            total: subtotal.try_add(&delivery_fee)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_parse_method() {
        assert_eq!(PaymentMethod::parse("card"), Some(PaymentMethod::Card));
        assert_eq!(PaymentMethod::parse("COD"), Some(PaymentMethod::CashOnDelivery));
        assert_eq!(PaymentMethod::parse("cheque"), None);
    }

    #[test]
    fn test_summary_adds_delivery_fee() {
        let summary = PaymentSummary::new(
            Money::new(599998, Currency::PKR),
            Money::new(50000, Currency::PKR),
        )
        .unwrap();
        assert_eq!(summary.total.display(), "Rs 6499.98");
    }
}
