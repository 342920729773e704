//! Storefront state: catalog, cart, checkout and orders for a small fashion shop.
//!
//! This crate holds everything a storefront app needs between the screens and
//! the (mocked) outside world:
//!
//! - **Catalog**: Seeded products and "Shop Now" promotions, inferred categories
//! - **Cart**: Lines keyed by product, size and color; merge, limit, quantities
//! - **Checkout**: Selection, mock login, delivery details, payment, flow
//! - **Orders**: Append-only order history with bulk delete
//! - **Search**: Name search, category/price/rating filters, price sorting
//!
//! All state lives in one [`StorefrontStore`](store::StorefrontStore).
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_commerce::prelude::*;
//!
//! let mut store = StorefrontStore::default();
//!
//! // Configure a product and add it to the cart
//! let mut variant = store.open_product(&ProductId::new("1"))?;
//! variant.choose_size("M");
//! store.add_selection(&variant)?;
//!
//! // Check out the selected lines, paying cash on delivery
//! let mut flow = store.begin_checkout()?;
//! flow.log_in(store.log_in_with_google(None))?;
//! flow.capture_details(details)?;
//! flow.choose_method(PaymentMethod::CashOnDelivery)?;
//! let order_id = store.checkout_with(&mut flow, None, false).await?;
//! ```

pub mod config;
pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod search;
pub mod store;

pub use config::StoreConfig;
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};
pub use store::StorefrontStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::StoreConfig;
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::store::StorefrontStore;

    // Catalog
    pub use crate::catalog::{CatalogStore, Category, Product};

    // Cart
    pub use crate::cart::{AddOutcome, BatchOutcome, Cart, LineItem, LineKey, Selection, VariantSelection};

    // Checkout
    pub use crate::checkout::{
        CardDetails, CardVault, CheckoutFlow, CheckoutStep, Credentials, DeliveryDetails,
        InMemoryCardVault, PaymentMethod, PaymentReceipt, PaymentSummary, PendingPayment, Session,
    };

    // Orders
    pub use crate::orders::{Order, OrderLine};

    // Search
    pub use crate::search::{Filter, SearchQuery, SortOption};
}
