//! Payment: methods, card details, saved-card storage and the mock gateway.

mod card;
mod gateway;
mod method;
mod vault;

pub use card::{CardBrand, CardDetails};
pub use gateway::{MockPaymentGateway, PaymentCancelHandle, PaymentReceipt, PendingPayment};
pub use method::{PaymentMethod, PaymentSummary};
pub use vault::{CardVault, InMemoryCardVault, SAVED_CARD_KEY};
