//! Order history.

use crate::ids::OrderId;
use crate::orders::Order;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Append-only list of placed orders, in placement order.
///
/// Orders are only ever appended or deleted; they are never edited.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderLedger {
    orders: Vec<Order>,
}

impl OrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an order. Returns its id.
    pub fn place_order(&mut self, order: Order) -> OrderId {
        let id = order.id.clone();
        info!(
            order_id = %id,
            order_number = %order.order_number,
            lines = order.lines.len(),
            total = %order.grand_total,
            "order placed"
        );
        self.orders.push(order);
        id
    }

    pub fn list_orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.id == id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Delete orders by id. Unknown ids are ignored. Returns how many were
    /// removed.
    pub fn delete_orders_by_id(&mut self, ids: &BTreeSet<OrderId>) -> usize {
        let len_before = self.orders.len();
        self.orders.retain(|o| !ids.contains(&o.id));
        let removed = len_before - self.orders.len();
        debug!(requested = ids.len(), removed, "orders deleted");
        removed
    }

    /// Delete orders at positions of the current list.
    ///
    /// Positions are resolved to ids before anything is removed, so the
    /// result does not depend on iteration order. Out-of-range positions are
    /// ignored.
    pub fn delete_orders(&mut self, positions: &BTreeSet<usize>) -> usize {
        let ids = self.ids_at(positions);
        self.delete_orders_by_id(&ids)
    }

    /// Ids of the orders at the given positions.
    pub fn ids_at(&self, positions: &BTreeSet<usize>) -> BTreeSet<OrderId> {
        positions
            .iter()
            .filter_map(|&i| self.orders.get(i))
            .map(|o| o.id.clone())
            .collect()
    }
}
