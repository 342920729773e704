//! Store configuration.
//!
//! All fields have serde defaults so a partial config file is valid.

use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Default number of distinct lines a cart may hold.
pub const DEFAULT_CART_LIMIT: usize = 10;

/// Default delivery fee, in major units.
pub const DEFAULT_DELIVERY_FEE: f64 = 500.0;

/// Default simulated card processing delay.
pub const DEFAULT_PAYMENT_DELAY_MS: u64 = 1500;

/// Configuration for a [`StorefrontStore`](crate::store::StorefrontStore).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Currency used for prices, totals and fees.
    #[serde(default)]
    pub currency: Currency,

    /// Cart settings.
    #[serde(default)]
    pub cart: CartConfig,

    /// Checkout settings.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Payment settings.
    #[serde(default)]
    pub payment: PaymentConfig,
}

impl StoreConfig {
    /// Delivery fee as money in the configured currency.
    pub fn delivery_fee(&self) -> Money {
        Money::from_decimal(self.checkout.delivery_fee, self.currency)
    }

    /// Check the configuration for values the store cannot work with.
    ///
    /// Returns a list of human-readable problems; empty means valid.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.cart.limit == 0 {
            problems.push("cart.limit must be at least 1".to_string());
        }
        if !self.checkout.delivery_fee.is_finite() || self.checkout.delivery_fee < 0.0 {
            problems.push("checkout.delivery_fee must be a non-negative amount".to_string());
        }
        problems
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Maximum number of distinct lines.
    #[serde(default = "default_cart_limit")]
    pub limit: usize,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            limit: default_cart_limit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Flat delivery fee in major units.
    #[serde(default = "default_delivery_fee")]
    pub delivery_fee: f64,

    /// Deduct purchased quantities from the cart once an order is confirmed.
    #[serde(default = "default_true")]
    pub clear_purchased_lines: bool,

    /// Validate email and password shape on login.
    #[serde(default = "default_true")]
    pub validate_login: bool,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            delivery_fee: default_delivery_fee(),
            clear_purchased_lines: true,
            validate_login: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Simulated card processing delay in milliseconds.
    #[serde(default = "default_payment_delay_ms")]
    pub delay_ms: u64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_payment_delay_ms(),
        }
    }
}

fn default_cart_limit() -> usize {
    DEFAULT_CART_LIMIT
}

fn default_delivery_fee() -> f64 {
    DEFAULT_DELIVERY_FEE
}

fn default_payment_delay_ms() -> u64 {
    DEFAULT_PAYMENT_DELAY_MS
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.currency, Currency::PKR);
        assert_eq!(config.cart.limit, 10);
        assert_eq!(config.delivery_fee().amount_minor, 50000);
        assert_eq!(config.payment.delay_ms, 1500);
        assert!(config.checkout.clear_purchased_lines);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"cart":{"limit":3},"checkout":{"delivery_fee":0}}"#)
                .unwrap();
        assert_eq!(config.cart.limit, 3);
        assert!(config.delivery_fee().is_zero());
        assert!(config.checkout.validate_login);
        assert_eq!(config.payment.delay_ms, 1500);
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        let mut config = StoreConfig::default();
        config.cart.limit = 0;
        config.checkout.delivery_fee = -1.0;
        assert_eq!(config.validate().len(), 2);
    }
}
