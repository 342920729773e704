//! Checkout flow state machine.

use crate::checkout::{DeliveryDetails, PaymentMethod, PaymentSummary, Session};
use crate::error::CommerceError;
use crate::ids::{CheckoutId, OrderId};
use crate::money::Money;
use crate::orders::OrderLine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Steps of a shopping session, from browsing to a confirmed order.
///
/// A [`CheckoutFlow`] covers `Selected` onwards; the earlier steps belong to
/// the catalog and cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutStep {
    Browsing,
    VariantSelected,
    InCart,
    /// Lines chosen for checkout.
    Selected,
    LoggedIn,
    DetailsCaptured,
    MethodChosen,
    /// Order recorded. Terminal.
    Confirmed,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Browsing => "browsing",
            CheckoutStep::VariantSelected => "variant_selected",
            CheckoutStep::InCart => "in_cart",
            CheckoutStep::Selected => "selected",
            CheckoutStep::LoggedIn => "logged_in",
            CheckoutStep::DetailsCaptured => "details_captured",
            CheckoutStep::MethodChosen => "method_chosen",
            CheckoutStep::Confirmed => "confirmed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Browsing => "Browsing",
            CheckoutStep::VariantSelected => "Variant Selected",
            CheckoutStep::InCart => "In Cart",
            CheckoutStep::Selected => "Selected",
            CheckoutStep::LoggedIn => "Logged In",
            CheckoutStep::DetailsCaptured => "Details Captured",
            CheckoutStep::MethodChosen => "Payment Method Chosen",
            CheckoutStep::Confirmed => "Confirmed",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Browsing => 1,
            CheckoutStep::VariantSelected => 2,
            CheckoutStep::InCart => 3,
            CheckoutStep::Selected => 4,
            CheckoutStep::LoggedIn => 5,
            CheckoutStep::DetailsCaptured => 6,
            CheckoutStep::MethodChosen => 7,
            CheckoutStep::Confirmed => 8,
        }
    }
}

/// One checkout of a selected set of cart lines.
///
/// Each step requires the data of the steps before it; stepping back drops
/// the data of the step being left.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutFlow {
    pub id: CheckoutId,
    step: CheckoutStep,
    lines: Vec<OrderLine>,
    session: Option<Session>,
    details: Option<DeliveryDetails>,
    method: Option<PaymentMethod>,
    order_id: Option<OrderId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CheckoutFlow {
    /// Start a checkout for the given order payload.
    pub fn start(lines: Vec<OrderLine>) -> Result<Self, CommerceError> {
        if lines.is_empty() {
            return Err(CommerceError::InvalidSelection);
        }
        let now = Utc::now();
        let flow = Self {
            id: CheckoutId::generate(),
            step: CheckoutStep::Selected,
            lines,
            session: None,
            details: None,
            method: None,
            order_id: None,
            created_at: now,
            updated_at: now,
        };
        debug!(checkout_id = %flow.id, lines = flow.lines.len(), "checkout started");
        Ok(flow)
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn details(&self) -> Option<&DeliveryDetails> {
        self.details.as_ref()
    }

    pub fn method(&self) -> Option<PaymentMethod> {
        self.method
    }

    /// Order recorded for this checkout, once confirmed.
    pub fn order_id(&self) -> Option<&OrderId> {
        self.order_id.as_ref()
    }

    pub fn is_confirmed(&self) -> bool {
        self.step == CheckoutStep::Confirmed
    }

    pub fn log_in(&mut self, session: Session) -> Result<(), CommerceError> {
        if !matches!(self.step, CheckoutStep::Selected | CheckoutStep::LoggedIn) {
            return Err(self.transition_error(CheckoutStep::LoggedIn));
        }
        self.session = Some(session);
        self.move_to(CheckoutStep::LoggedIn);
        Ok(())
    }

    /// Record delivery details.
    ///
    /// Also used to edit details after a method was chosen; the method must
    /// then be chosen again.
    pub fn capture_details(&mut self, details: DeliveryDetails) -> Result<(), CommerceError> {
        self.ensure_can_enter(CheckoutStep::DetailsCaptured)?;
        details.validate()?;
        self.details = Some(details);
        self.method = None;
        self.move_to(CheckoutStep::DetailsCaptured);
        Ok(())
    }

    pub fn choose_method(&mut self, method: PaymentMethod) -> Result<(), CommerceError> {
        self.ensure_can_enter(CheckoutStep::MethodChosen)?;
        self.method = Some(method);
        self.move_to(CheckoutStep::MethodChosen);
        Ok(())
    }

    /// Check the flow is ready for payment and return the chosen method.
    pub fn ready_for_payment(&self) -> Result<PaymentMethod, CommerceError> {
        self.ensure_can_enter(CheckoutStep::Confirmed)?;
        self.method
            .ok_or_else(|| CommerceError::CheckoutIncomplete("payment method".to_string()))
    }

    /// Mark the checkout confirmed with its recorded order. One way.
    pub fn confirm(&mut self, order_id: OrderId) -> Result<(), CommerceError> {
        self.ready_for_payment()?;
        self.order_id = Some(order_id);
        self.move_to(CheckoutStep::Confirmed);
        Ok(())
    }

    /// Step back one step, discarding what that step captured.
    pub fn go_back(&mut self) -> Result<CheckoutStep, CommerceError> {
        let prev = match self.step {
            CheckoutStep::LoggedIn => {
                self.session = None;
                CheckoutStep::Selected
            }
            CheckoutStep::DetailsCaptured => {
                self.details = None;
                CheckoutStep::LoggedIn
            }
            CheckoutStep::MethodChosen => {
                self.method = None;
                CheckoutStep::DetailsCaptured
            }
            step => {
                return Err(CommerceError::InvalidCheckoutTransition {
                    from: step.as_str().to_string(),
                    to: "previous".to_string(),
                })
            }
        };
        self.move_to(prev);
        Ok(prev)
    }

    /// Sum of the line totals.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        let currency = self
            .lines
            .first()
            .map(|l| l.total_price.currency)
            .unwrap_or_default();
        Money::try_sum(self.lines.iter().map(|l| &l.total_price), currency)
    }

    /// Subtotal, delivery fee and amount due.
    pub fn summary(&self, delivery_fee: Money) -> Result<PaymentSummary, CommerceError> {
        PaymentSummary::new(self.subtotal()?, delivery_fee)
    }

    /// Get what's missing to enter a step.
    pub fn missing_for_step(&self, step: CheckoutStep) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if step.number() > CheckoutStep::LoggedIn.number() && self.session.is_none() {
            missing.push("login");
        }
        if step.number() > CheckoutStep::DetailsCaptured.number() && self.details.is_none() {
            missing.push("delivery details");
        }
        if step.number() > CheckoutStep::MethodChosen.number() && self.method.is_none() {
            missing.push("payment method");
        }
        missing
    }

    fn ensure_can_enter(&self, step: CheckoutStep) -> Result<(), CommerceError> {
        if self.is_confirmed() {
            return Err(self.transition_error(step));
        }
        let missing = self.missing_for_step(step);
        if !missing.is_empty() {
            return Err(CommerceError::CheckoutIncomplete(missing.join(", ")));
        }
        Ok(())
    }

    fn transition_error(&self, to: CheckoutStep) -> CommerceError {
        CommerceError::InvalidCheckoutTransition {
            from: self.step.as_str().to_string(),
            to: to.as_str().to_string(),
        }
    }

    fn move_to(&mut self, step: CheckoutStep) {
        debug!(checkout_id = %self.id, from = self.step.as_str(), to = step.as_str(), "checkout step");
        self.step = step;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::LineItem;
    use crate::checkout::MockAuthenticator;
    use crate::ids::ProductId;
    use crate::money::Currency;

    fn flow() -> CheckoutFlow {
        let item = LineItem {
            product_id: ProductId::new("2"),
            name: "Silk Blouse".to_string(),
            unit_price: Money::new(590099, Currency::PKR),
            size: "S".to_string(),
            color: "#F5F5DC".to_string(),
            image: String::new(),
            quantity: 2,
        };
        CheckoutFlow::start(vec![OrderLine::from_line_item(&item).unwrap()]).unwrap()
    }

    fn session() -> Session {
        MockAuthenticator::default().log_in_with_google(None)
    }

    fn details() -> DeliveryDetails {
        DeliveryDetails {
            first_name: "Sara".to_string(),
            last_name: "Ali".to_string(),
            country: "Pakistan".to_string(),
            street: "5 Canal View".to_string(),
            city: "Lahore".to_string(),
            state: "Punjab".to_string(),
            zip: "54000".to_string(),
            phone: "03211234567".to_string(),
        }
    }

    #[test]
    fn test_start_requires_lines() {
        assert_eq!(
            CheckoutFlow::start(Vec::new()).unwrap_err(),
            CommerceError::InvalidSelection
        );
        assert_eq!(flow().step(), CheckoutStep::Selected);
    }

    #[test]
    fn test_happy_path() {
        let mut flow = flow();
        flow.log_in(session()).unwrap();
        flow.capture_details(details()).unwrap();
        flow.choose_method(PaymentMethod::CashOnDelivery).unwrap();
        assert_eq!(flow.ready_for_payment().unwrap(), PaymentMethod::CashOnDelivery);

        let order_id = OrderId::generate();
        flow.confirm(order_id.clone()).unwrap();
        assert!(flow.is_confirmed());
        assert_eq!(flow.order_id(), Some(&order_id));
    }

    #[test]
    fn test_details_require_login() {
        let mut flow = flow();
        assert_eq!(
            flow.capture_details(details()),
            Err(CommerceError::CheckoutIncomplete("login".to_string()))
        );
        assert_eq!(
            flow.choose_method(PaymentMethod::Card),
            Err(CommerceError::CheckoutIncomplete(
                "login, delivery details".to_string()
            ))
        );
    }

    #[test]
    fn test_incomplete_details_rejected() {
        let mut flow = flow();
        flow.log_in(session()).unwrap();
        let err = flow
            .capture_details(DeliveryDetails {
                city: String::new(),
                ..details()
            })
            .unwrap_err();
        assert_eq!(err, CommerceError::CheckoutIncomplete("city".to_string()));
        assert_eq!(flow.step(), CheckoutStep::LoggedIn);
    }

    #[test]
    fn test_editing_details_clears_method() {
        let mut flow = flow();
        flow.log_in(session()).unwrap();
        flow.capture_details(details()).unwrap();
        flow.choose_method(PaymentMethod::Card).unwrap();

        flow.capture_details(DeliveryDetails {
            city: "Karachi".to_string(),
            ..details()
        })
        .unwrap();
        assert_eq!(flow.step(), CheckoutStep::DetailsCaptured);
        assert_eq!(flow.method(), None);
        assert!(flow.ready_for_payment().is_err());
    }

    #[test]
    fn test_confirmed_is_terminal() {
        let mut flow = flow();
        flow.log_in(session()).unwrap();
        flow.capture_details(details()).unwrap();
        flow.choose_method(PaymentMethod::Card).unwrap();
        flow.confirm(OrderId::generate()).unwrap();

        assert!(matches!(
            flow.confirm(OrderId::generate()),
            Err(CommerceError::InvalidCheckoutTransition { .. })
        ));
        assert!(flow.go_back().is_err());
        assert!(flow.capture_details(details()).is_err());
        assert!(flow.log_in(session()).is_err());
    }

    #[test]
    fn test_go_back() {
        let mut flow = flow();
        flow.log_in(session()).unwrap();
        flow.capture_details(details()).unwrap();
        flow.choose_method(PaymentMethod::Card).unwrap();

        assert_eq!(flow.go_back().unwrap(), CheckoutStep::DetailsCaptured);
        assert_eq!(flow.method(), None);
        assert_eq!(flow.go_back().unwrap(), CheckoutStep::LoggedIn);
        assert!(flow.details().is_none());
        assert_eq!(flow.go_back().unwrap(), CheckoutStep::Selected);
        assert!(flow.go_back().is_err());
    }

    #[test]
    fn test_summary() {
        let flow = flow();
        let summary = flow.summary(Money::new(50000, Currency::PKR)).unwrap();
        assert_eq!(summary.subtotal.amount_minor, 1180198);
        assert_eq!(summary.total.amount_minor, 1230198);
    }
}
