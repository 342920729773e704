//! Checkout module.
//!
//! Contains the checkout flow, mock login, delivery details and payment.

mod details;
mod flow;
mod login;
mod payment;

pub use details::DeliveryDetails;
pub use flow::{CheckoutFlow, CheckoutStep};
pub use login::{Credentials, LoginProvider, MockAuthenticator, Session, GUEST_EMAIL, MIN_PASSWORD_LEN};
pub use payment::{
    CardBrand, CardDetails, CardVault, InMemoryCardVault, MockPaymentGateway, PaymentCancelHandle,
    PaymentMethod, PaymentReceipt, PaymentSummary, PendingPayment, SAVED_CARD_KEY,
};
