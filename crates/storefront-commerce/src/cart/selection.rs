//! Checkout selection over the cart.

use crate::cart::{Cart, LineItem, LineKey};
use crate::error::CommerceError;
use crate::money::Money;
use crate::orders::OrderLine;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which cart lines are ticked for checkout.
///
/// New lines start selected. [`Selection::sync`] must be called after the
/// cart changes so that removed lines drop out and new lines are picked up;
/// lines the shopper unticked stay unticked while they remain in the cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    selected: BTreeSet<LineKey>,
    known: BTreeSet<LineKey>,
}

impl Selection {
    /// Selection with every line of the cart ticked.
    pub fn from_cart(cart: &Cart) -> Self {
        let known: BTreeSet<LineKey> = cart.keys().collect();
        Self {
            selected: known.clone(),
            known,
        }
    }

    /// Follow cart changes.
    pub fn sync(&mut self, cart: &Cart) {
        let current: BTreeSet<LineKey> = cart.keys().collect();
        for key in current.difference(&self.known) {
            self.selected.insert(key.clone());
        }
        self.selected.retain(|k| current.contains(k));
        self.known = current;
    }

    /// Flip a line's selection. Returns the new state; unknown keys stay
    /// unselected.
    pub fn toggle(&mut self, key: &LineKey) -> bool {
        if !self.known.contains(key) {
            return false;
        }
        if self.selected.remove(key) {
            false
        } else {
            self.selected.insert(key.clone());
            true
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.known.clone();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, key: &LineKey) -> bool {
        self.selected.contains(key)
    }

    pub fn selected_keys(&self) -> &BTreeSet<LineKey> {
        &self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected lines in cart order.
    pub fn selected_lines<'a>(&'a self, cart: &'a Cart) -> impl Iterator<Item = &'a LineItem> + 'a {
        cart.items()
            .iter()
            .filter(move |item| self.selected.contains(&item.key()))
    }

    /// Total of the selected lines.
    pub fn selected_total(&self, cart: &Cart) -> Result<Money, CommerceError> {
        cart.compute_total(|item| self.selected.contains(&item.key()))
    }

    /// Snapshot the selected lines as order lines.
    pub fn build_order_payload(&self, cart: &Cart) -> Result<Vec<OrderLine>, CommerceError> {
        let lines = self
            .selected_lines(cart)
            .map(OrderLine::from_line_item)
            .collect::<Result<Vec<_>, _>>()?;
        if lines.is_empty() {
            return Err(CommerceError::InvalidSelection);
        }
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use crate::money::Currency;

    fn line(id: &str, price: i64, quantity: i64) -> LineItem {
        LineItem {
            product_id: ProductId::new(id),
            name: format!("Product {id}"),
            unit_price: Money::new(price, Currency::PKR),
            size: "M".to_string(),
            color: "#000".to_string(),
            image: String::new(),
            quantity,
        }
    }

    fn cart() -> Cart {
        let mut cart = Cart::default();
        cart.add_to_cart(line("1", 1000, 2)).unwrap();
        cart.add_to_cart(line("2", 500, 1)).unwrap();
        cart
    }

    #[test]
    fn test_everything_selected_initially() {
        let cart = cart();
        let selection = Selection::from_cart(&cart);
        assert_eq!(selection.selected_total(&cart).unwrap().amount_minor, 2500);
    }

    #[test]
    fn test_toggle() {
        let cart = cart();
        let mut selection = Selection::from_cart(&cart);
        let key = LineKey::new("1", "M", "#000");

        assert!(!selection.toggle(&key));
        assert!(!selection.is_selected(&key));
        assert_eq!(selection.selected_total(&cart).unwrap().amount_minor, 500);

        assert!(selection.toggle(&key));
        assert!(!selection.toggle(&LineKey::new("9", "M", "#000")));
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        let cart = cart();
        let mut selection = Selection::from_cart(&cart);
        selection.clear();
        assert_eq!(
            selection.build_order_payload(&cart),
            Err(CommerceError::InvalidSelection)
        );
    }

    #[test]
    fn test_payload_has_line_totals() {
        let cart = cart();
        let selection = Selection::from_cart(&cart);
        let payload = selection.build_order_payload(&cart).unwrap();
        assert_eq!(payload.len(), 2);
        assert_eq!(payload[0].total_price.amount_minor, 2000);
    }

    #[test]
    fn test_sync_keeps_toggles_and_selects_new_lines() {
        let mut cart = cart();
        let mut selection = Selection::from_cart(&cart);
        let first = LineKey::new("1", "M", "#000");
        let second = LineKey::new("2", "M", "#000");
        selection.toggle(&first);

        cart.add_to_cart(line("3", 100, 1)).unwrap();
        cart.remove_from_cart(&second);
        selection.sync(&cart);

        assert!(!selection.is_selected(&first));
        assert!(!selection.is_selected(&second));
        assert!(selection.is_selected(&LineKey::new("3", "M", "#000")));

        selection.select_all();
        assert_eq!(selection.selected_keys().len(), 2);
    }
}
