//! Cart and line item types.

use crate::catalog::Product;
use crate::config::DEFAULT_CART_LIMIT;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Identity of a cart line: the same product in the same size and color
/// always lands on the same line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
}

impl LineKey {
    pub fn new(
        product_id: impl Into<ProductId>,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            size: size.into(),
            color: color.into(),
        }
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.product_id, self.size, self.color)
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub product_id: ProductId,
    /// Product name at the time of adding.
    pub name: String,
    pub unit_price: Money,
    pub size: String,
    pub color: String,
    /// Image shown for the chosen color.
    pub image: String,
    /// Always positive while the line is in a cart.
    pub quantity: i64,
}

impl LineItem {
    /// Build a line for a product variant.
    ///
    /// The image is the color's image, or the thumbnail when the color has none.
    pub fn from_product(
        product: &Product,
        size: impl Into<String>,
        color: impl Into<String>,
        quantity: i64,
    ) -> Self {
        let color = color.into();
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            size: size.into(),
            image: product.image_for(&color).to_string(),
            color,
            quantity,
        }
    }

    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id.clone(), self.size.clone(), self.color.clone())
    }

    pub fn has_key(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id && self.size == key.size && self.color == key.color
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price.try_multiply(self.quantity)
    }
}

/// What happened to a single item passed to [`Cart::add_to_cart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Quantity was added to an existing line.
    Merged,
    /// A new line was appended.
    Added,
}

/// An item from a batch that was not applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedLine {
    pub key: LineKey,
    pub error: CommerceError,
}

/// Result of [`Cart::add_multiple_to_cart`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    /// Keys whose quantity was merged into an existing line.
    pub merged: Vec<LineKey>,
    /// Keys appended as new lines.
    pub added: Vec<LineKey>,
    /// Items skipped, in input order.
    pub rejected: Vec<RejectedLine>,
}

impl BatchOutcome {
    /// True when every item was applied.
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }

    /// True when at least one item was skipped because the cart was full.
    pub fn hit_limit(&self) -> bool {
        self.rejected
            .iter()
            .any(|r| matches!(r.error, CommerceError::CartFull { .. }))
    }
}

/// A shopping cart.
///
/// Lines are unique by [`LineKey`] and kept in insertion order. The number of
/// distinct lines never exceeds `limit`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
    limit: usize,
    currency: Currency,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(DEFAULT_CART_LIMIT, Currency::default())
    }
}

impl Cart {
    /// Create an empty cart holding at most `limit` distinct lines.
    pub fn new(limit: usize, currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            limit,
            currency,
        }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn get(&self, key: &LineKey) -> Option<&LineItem> {
        self.items.iter().find(|i| i.has_key(key))
    }

    pub fn contains(&self, key: &LineKey) -> bool {
        self.get(key).is_some()
    }

    /// Keys of all lines in cart order.
    pub fn keys(&self) -> impl Iterator<Item = LineKey> + '_ {
        self.items.iter().map(LineItem::key)
    }

    /// Add an item to the cart.
    ///
    /// Merges into the line with the same key, otherwise appends a new line.
    /// Returns an error if:
    /// - Quantity is not positive
    /// - A new line would exceed the cart limit
    /// - The merged quantity would overflow
    pub fn add_to_cart(&mut self, item: LineItem) -> Result<AddOutcome, CommerceError> {
        if item.quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(item.quantity));
        }
        if item.unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: item.unit_price.currency.code().to_string(),
            });
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.has_key(&item.key())) {
            existing.quantity = existing
                .quantity
                .checked_add(item.quantity)
                .ok_or(CommerceError::Overflow)?;
            debug!(line = %item.key(), quantity = existing.quantity, "cart line merged");
            return Ok(AddOutcome::Merged);
        }

        if self.items.len() >= self.limit {
            warn!(line = %item.key(), limit = self.limit, "cart full");
            return Err(CommerceError::CartFull { limit: self.limit });
        }

        debug!(line = %item.key(), quantity = item.quantity, "cart line added");
        self.items.push(item);
        Ok(AddOutcome::Added)
    }

    /// Add several items, applying [`Cart::add_to_cart`] to each in order.
    ///
    /// The limit is checked against the count as it grows. Items that merge
    /// are always applied; items that would need a new line once the cart is
    /// full are skipped and reported, and the rest of the batch still runs.
    pub fn add_multiple_to_cart(&mut self, items: impl IntoIterator<Item = LineItem>) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for item in items {
            let key = item.key();
            match self.add_to_cart(item) {
                Ok(AddOutcome::Merged) => outcome.merged.push(key),
                Ok(AddOutcome::Added) => outcome.added.push(key),
                Err(error) => outcome.rejected.push(RejectedLine { key, error }),
            }
        }
        outcome
    }

    /// Set a line's quantity.
    ///
    /// A quantity of zero or less removes the line. Returns whether the line
    /// existed.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_from_cart(key);
        }
        match self.items.iter_mut().find(|i| i.has_key(key)) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Add one to a line's quantity. Returns whether the line existed.
    pub fn increment(&mut self, key: &LineKey) -> Result<bool, CommerceError> {
        match self.items.iter_mut().find(|i| i.has_key(key)) {
            Some(item) => {
                item.quantity = item.quantity.checked_add(1).ok_or(CommerceError::Overflow)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Take one from a line's quantity; a line at one is removed.
    /// Returns whether the line existed.
    pub fn decrement(&mut self, key: &LineKey) -> bool {
        match self.get(key).map(|i| i.quantity) {
            Some(quantity) => self.update_quantity(key, quantity - 1),
            None => false,
        }
    }

    /// Remove a line. Absent keys are a no-op.
    pub fn remove_from_cart(&mut self, key: &LineKey) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| !i.has_key(key));
        let removed = self.items.len() < len_before;
        if removed {
            debug!(line = %key, "cart line removed");
        }
        removed
    }

    /// Take purchased quantities off their lines.
    ///
    /// A line whose quantity drops to zero or less is removed; units added
    /// after the purchase stay in the cart. Returns how many lines were removed.
    pub fn deduct_lines<'a>(
        &mut self,
        purchased: impl IntoIterator<Item = (&'a LineKey, i64)>,
    ) -> usize {
        let len_before = self.items.len();
        for (key, quantity) in purchased {
            if let Some(item) = self.items.iter_mut().find(|i| i.has_key(key)) {
                item.quantity = item.quantity.saturating_sub(quantity);
            }
        }
        self.items.retain(|i| i.quantity > 0);
        len_before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of unit price times quantity over lines matching `predicate`.
    pub fn compute_total(
        &self,
        predicate: impl Fn(&LineItem) -> bool,
    ) -> Result<Money, CommerceError> {
        self.items
            .iter()
            .filter(|&item| predicate(item))
            .try_fold(Money::zero(self.currency), |acc, item| {
                acc.try_add(&item.line_total()?)
            })
    }

    /// Sum over every line.
    pub fn total(&self) -> Result<Money, CommerceError> {
        self.compute_total(|_| true)
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.limit
    }
}
