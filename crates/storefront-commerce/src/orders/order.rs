//! Order types.

use crate::cart::LineItem;
use crate::checkout::{DeliveryDetails, PaymentMethod, PaymentSummary};
use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId};
use crate::money::{Currency, Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FinancialStatus {
    /// Nothing collected yet (cash on delivery, or no payment attached).
    #[default]
    Pending,
    /// Paid up front by card.
    Paid,
}

impl FinancialStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinancialStatus::Pending => "pending",
            FinancialStatus::Paid => "paid",
        }
    }
}

/// A purchased line, frozen at order time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub size: String,
    pub color: String,
    pub image: String,
    pub quantity: i64,
    /// Unit price times quantity.
    pub total_price: Money,
}

impl OrderLine {
    /// Snapshot a cart line.
    pub fn from_line_item(item: &LineItem) -> Result<Self, CommerceError> {
        Ok(Self {
            product_id: item.product_id.clone(),
            name: item.name.clone(),
            unit_price: item.unit_price,
            size: item.size.clone(),
            color: item.color.clone(),
            image: item.image.clone(),
            quantity: item.quantity,
            total_price: item.line_total()?,
        })
    }
}

/// A placed order. Never changes after it is recorded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: OrderId,
    /// Human-readable order number.
    pub order_number: String,
    pub lines: Vec<OrderLine>,
    /// Sum of line totals.
    pub subtotal: Money,
    pub delivery_fee: Money,
    /// Subtotal plus delivery fee.
    pub grand_total: Money,
    pub payment_method: Option<PaymentMethod>,
    pub financial_status: FinancialStatus,
    pub details: Option<DeliveryDetails>,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Build an order from purchased lines with no delivery fee or payment.
    pub fn new(lines: Vec<OrderLine>, currency: Currency) -> Result<Self, CommerceError> {
        if lines.is_empty() {
            return Err(CommerceError::InvalidSelection);
        }
        let subtotal = Money::try_sum(lines.iter().map(|l| &l.total_price), currency)?;
        let id = OrderId::generate();
        Ok(Self {
            order_number: Self::order_number_for(&id),
            id,
            lines,
            subtotal,
            delivery_fee: Money::zero(currency),
            grand_total: subtotal,
            payment_method: None,
            financial_status: FinancialStatus::Pending,
            details: None,
            placed_at: Utc::now(),
        })
    }

    /// Attach a confirmed checkout's payment summary, method and details.
    pub fn with_checkout(
        mut self,
        summary: &PaymentSummary,
        method: PaymentMethod,
        details: DeliveryDetails,
    ) -> Self {
        self.subtotal = summary.subtotal;
        self.delivery_fee = summary.delivery_fee;
        self.grand_total = summary.total;
        self.financial_status = match method {
            PaymentMethod::Card => FinancialStatus::Paid,
            PaymentMethod::CashOnDelivery => FinancialStatus::Pending,
        };
        self.payment_method = Some(method);
        self.details = Some(details);
        self
    }

    fn order_number_for(id: &OrderId) -> String {
        let short: String = id.as_str().chars().take(8).collect();
        format!("ORD-{}", short.to_uppercase())
    }

    /// Get total item count.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn is_paid(&self) -> bool {
        self.financial_status == FinancialStatus::Paid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_line(price: i64, quantity: i64) -> OrderLine {
        let item = LineItem {
            product_id: ProductId::new("1"),
            name: "Floral Maxi Dress".to_string(),
            unit_price: Money::new(price, Currency::PKR),
            size: "S".to_string(),
            color: "#FFC0CB".to_string(),
            image: String::new(),
            quantity,
        };
        OrderLine::from_line_item(&item).unwrap()
    }

    #[test]
    fn test_order_totals() {
        let order = Order::new(vec![order_line(450000, 2), order_line(100, 1)], Currency::PKR)
            .unwrap();
        assert_eq!(order.subtotal.amount_minor, 900100);
        assert_eq!(order.grand_total, order.subtotal);
        assert_eq!(order.item_count(), 3);
        assert!(order.order_number.starts_with("ORD-"));
        assert!(!order.is_paid());
    }

    #[test]
    fn test_empty_order_rejected() {
        assert_eq!(
            Order::new(Vec::new(), Currency::PKR),
            Err(CommerceError::InvalidSelection)
        );
    }
}
