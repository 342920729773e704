//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Every operation that returns one of these leaves the store unchanged.
/// The `Display` text is the message shown to the shopper.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Adding another distinct line would exceed the cart limit.
    #[error("You can only add up to {limit} different items in your cart")]
    CartFull { limit: usize },

    /// Checkout was attempted with nothing selected.
    #[error("Please select at least one item to check out")]
    InvalidSelection,

    /// Size or color was not chosen before adding to cart.
    #[error("Please select {0}")]
    MissingVariant(&'static str),

    /// The chosen size or color is not offered for the product.
    #[error("{option} '{value}' is not available for {product}")]
    VariantUnavailable {
        product: String,
        option: &'static str,
        value: String,
    },

    /// Quantity must be a positive integer.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A product with the same id already exists in the list.
    #[error("Product already exists: {0}")]
    DuplicateProduct(String),

    /// Product data failed validation.
    #[error("Invalid product {id}: {reason}")]
    InvalidProduct { id: String, reason: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Login rejected.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Card details failed validation.
    #[error("Invalid card details: {0}")]
    InvalidCard(String),

    /// Checkout is missing required information.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// A payment is already being processed.
    #[error("A payment is already in progress")]
    PaymentInFlight,

    /// The pending payment was cancelled before it settled.
    #[error("Payment cancelled")]
    PaymentCancelled,

    /// A payment receipt does not belong to the checkout it was applied to.
    #[error("Payment receipt for checkout {receipt} does not match checkout {checkout}")]
    StaleReceipt { receipt: String, checkout: String },

    /// Secure card storage failed.
    #[error("Card vault error: {0}")]
    Vault(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_full_message() {
        let err = CommerceError::CartFull { limit: 10 };
        assert_eq!(
            err.to_string(),
            "You can only add up to 10 different items in your cart"
        );
    }

    #[test]
    fn test_missing_variant_message() {
        let err = CommerceError::MissingVariant("size and color");
        assert_eq!(err.to_string(), "Please select size and color");
    }
}
