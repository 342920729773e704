//! The storefront store: the one object that owns all shopping state.
//!
//! Every mutator either succeeds or leaves the store unchanged. The checkout
//! selection is re-synced after each cart change.

use crate::cart::{AddOutcome, BatchOutcome, Cart, LineItem, LineKey, Selection, VariantSelection};
use crate::catalog::{CatalogStore, Product};
use crate::checkout::{
    CardDetails, CardVault, CheckoutFlow, Credentials, InMemoryCardVault, MockAuthenticator,
    MockPaymentGateway, PaymentMethod, PaymentReceipt, PaymentSummary, PendingPayment, Session,
};
use crate::config::StoreConfig;
use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId};
use crate::money::Money;
use crate::orders::{Order, OrderLedger, OrderLine};
use crate::search::SearchQuery;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Shopping state for one shopper.
pub struct StorefrontStore {
    config: StoreConfig,
    catalog: CatalogStore,
    cart: Cart,
    selection: Selection,
    ledger: OrderLedger,
    auth: MockAuthenticator,
    gateway: MockPaymentGateway,
    vault: Arc<dyn CardVault>,
}

impl std::fmt::Debug for StorefrontStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontStore")
            .field("config", &self.config)
            .field("products", &self.catalog.list_products().len())
            .field("cart_lines", &self.cart.unique_item_count())
            .field("orders", &self.ledger.len())
            .finish_non_exhaustive()
    }
}

impl Default for StorefrontStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl StorefrontStore {
    /// Store with the seed catalog and an in-memory card vault.
    pub fn new(config: StoreConfig) -> Self {
        let catalog = CatalogStore::seeded(config.currency);
        Self::with_catalog(config, catalog)
    }

    pub fn with_catalog(config: StoreConfig, catalog: CatalogStore) -> Self {
        Self {
            cart: Cart::new(config.cart.limit, config.currency),
            selection: Selection::default(),
            ledger: OrderLedger::new(),
            auth: MockAuthenticator::new(config.checkout.validate_login),
            gateway: MockPaymentGateway::new(Duration::from_millis(config.payment.delay_ms)),
            vault: Arc::new(InMemoryCardVault::new()),
            catalog,
            config,
        }
    }

    /// Replace the card vault.
    pub fn with_vault(mut self, vault: Arc<dyn CardVault>) -> Self {
        self.vault = vault;
        self
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn gateway(&self) -> &MockPaymentGateway {
        &self.gateway
    }

    // Catalog

    pub fn list_products(&self) -> &[Product] {
        self.catalog.list_products()
    }

    pub fn list_promotions(&self) -> &[Product] {
        self.catalog.list_promotions()
    }

    pub fn add_product(&mut self, product: Product) -> Result<(), CommerceError> {
        self.catalog.add_product(product)
    }

    pub fn remove_product(&mut self, id: &ProductId) -> Option<Product> {
        self.catalog.remove_product(id)
    }

    pub fn add_promotion(&mut self, product: Product) -> Result<(), CommerceError> {
        self.catalog.add_promotion(product)
    }

    pub fn remove_promotion(&mut self, id: &ProductId) -> Option<Product> {
        self.catalog.remove_promotion(id)
    }

    /// Search the regular product list.
    pub fn search(&self, query: &SearchQuery) -> Vec<&Product> {
        query.run(self.catalog.list_products())
    }

    /// Start configuring a product from either list.
    pub fn open_product(&self, id: &ProductId) -> Result<VariantSelection, CommerceError> {
        self.catalog
            .find(id)
            .map(VariantSelection::open)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    // Cart

    pub fn add_to_cart(&mut self, item: LineItem) -> Result<AddOutcome, CommerceError> {
        let outcome = self.cart.add_to_cart(item)?;
        self.selection.sync(&self.cart);
        Ok(outcome)
    }

    /// Add the configured variant to the cart.
    pub fn add_selection(&mut self, variant: &VariantSelection) -> Result<AddOutcome, CommerceError> {
        self.add_to_cart(variant.to_line_item()?)
    }

    pub fn add_multiple_to_cart(&mut self, items: impl IntoIterator<Item = LineItem>) -> BatchOutcome {
        let outcome = self.cart.add_multiple_to_cart(items);
        if outcome.hit_limit() {
            warn!(
                rejected = outcome.rejected.len(),
                limit = self.cart.limit(),
                "cart limit exceeded, some items were not added"
            );
        }
        self.selection.sync(&self.cart);
        outcome
    }

    pub fn update_quantity(&mut self, key: &LineKey, quantity: i64) -> bool {
        let found = self.cart.update_quantity(key, quantity);
        self.selection.sync(&self.cart);
        found
    }

    pub fn increment(&mut self, key: &LineKey) -> Result<bool, CommerceError> {
        self.cart.increment(key)
    }

    pub fn decrement(&mut self, key: &LineKey) -> bool {
        let found = self.cart.decrement(key);
        self.selection.sync(&self.cart);
        found
    }

    pub fn remove_from_cart(&mut self, key: &LineKey) -> bool {
        let removed = self.cart.remove_from_cart(key);
        self.selection.sync(&self.cart);
        removed
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.selection.sync(&self.cart);
    }

    pub fn compute_total(
        &self,
        predicate: impl Fn(&LineItem) -> bool,
    ) -> Result<Money, CommerceError> {
        self.cart.compute_total(predicate)
    }

    pub fn cart_total(&self) -> Result<Money, CommerceError> {
        self.cart.total()
    }

    // Selection

    pub fn toggle_selection(&mut self, key: &LineKey) -> bool {
        self.selection.toggle(key)
    }

    pub fn select_all(&mut self) {
        self.selection.select_all();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_selected(&self, key: &LineKey) -> bool {
        self.selection.is_selected(key)
    }

    pub fn selected_total(&self) -> Result<Money, CommerceError> {
        self.selection.selected_total(&self.cart)
    }

    pub fn build_order_payload(&self) -> Result<Vec<OrderLine>, CommerceError> {
        self.selection.build_order_payload(&self.cart)
    }

    // Orders

    pub fn list_orders(&self) -> &[Order] {
        self.ledger.list_orders()
    }

    /// Record an order for the given lines directly, without a checkout.
    pub fn place_order(&mut self, lines: Vec<OrderLine>) -> Result<OrderId, CommerceError> {
        let order = Order::new(lines, self.config.currency)?;
        Ok(self.ledger.place_order(order))
    }

    /// Delete orders at positions of [`StorefrontStore::list_orders`].
    pub fn delete_orders(&mut self, positions: &BTreeSet<usize>) -> usize {
        self.ledger.delete_orders(positions)
    }

    pub fn delete_orders_by_id(&mut self, ids: &BTreeSet<OrderId>) -> usize {
        self.ledger.delete_orders_by_id(ids)
    }

    // Login

    pub fn log_in(&self, credentials: &Credentials) -> Result<Session, CommerceError> {
        self.auth.log_in(credentials)
    }

    pub fn log_in_with_google(&self, email: Option<&str>) -> Session {
        self.auth.log_in_with_google(email)
    }

    // Checkout

    /// Start a checkout for the currently selected lines.
    #[instrument(skip(self))]
    pub fn begin_checkout(&self) -> Result<CheckoutFlow, CommerceError> {
        CheckoutFlow::start(self.build_order_payload()?)
    }

    pub fn payment_summary(&self, flow: &CheckoutFlow) -> Result<PaymentSummary, CommerceError> {
        flow.summary(self.config.delivery_fee())
    }

    /// The card saved on a previous checkout, if any.
    pub fn saved_card(&self) -> Result<Option<CardDetails>, CommerceError> {
        self.vault.load()
    }

    pub fn forget_saved_card(&self) -> Result<(), CommerceError> {
        self.vault.forget()
    }

    /// Start paying for a checkout that has its method chosen.
    ///
    /// Card payments need valid card details. When `save_card` is set the
    /// card is written to the vault once the gateway has accepted the
    /// payment; a vault failure is logged and the payment goes ahead.
    #[instrument(skip(self, flow, card), fields(checkout_id = %flow.id))]
    pub fn begin_payment(
        &self,
        flow: &CheckoutFlow,
        card: Option<&CardDetails>,
        save_card: bool,
    ) -> Result<PendingPayment, CommerceError> {
        let method = flow.ready_for_payment()?;
        let summary = self.payment_summary(flow)?;

        let card = match method {
            PaymentMethod::Card => {
                let card = card
                    .ok_or_else(|| CommerceError::InvalidCard("card details required".to_string()))?;
                card.validate()?;
                Some(card)
            }
            PaymentMethod::CashOnDelivery => None,
        };

        let pending = self.gateway.begin(flow.id.clone(), method, summary.total)?;
        if let (Some(card), true) = (card, save_card) {
            if let Err(e) = self.vault.save(card) {
                warn!(error = %e, "failed to save card");
            }
        }
        Ok(pending)
    }

    /// Record the order for a settled payment and confirm the checkout.
    ///
    /// The receipt must come from this checkout's payment. A checkout is
    /// confirmed at most once, so it records at most one order.
    #[instrument(skip(self, flow, receipt), fields(checkout_id = %flow.id))]
    pub fn complete_checkout(
        &mut self,
        flow: &mut CheckoutFlow,
        receipt: PaymentReceipt,
    ) -> Result<OrderId, CommerceError> {
        if receipt.checkout_id != flow.id || Some(receipt.method) != flow.method() {
            warn!(receipt_checkout = %receipt.checkout_id, "stale payment receipt");
            return Err(CommerceError::StaleReceipt {
                receipt: receipt.checkout_id.to_string(),
                checkout: flow.id.to_string(),
            });
        }
        let method = flow.ready_for_payment()?;
        let details = flow
            .details()
            .cloned()
            .ok_or_else(|| CommerceError::CheckoutIncomplete("delivery details".to_string()))?;
        let summary = self.payment_summary(flow)?;
        if receipt.amount != summary.total {
            return Err(CommerceError::StaleReceipt {
                receipt: receipt.checkout_id.to_string(),
                checkout: flow.id.to_string(),
            });
        }

        let order = Order::new(flow.lines().to_vec(), self.config.currency)?
            .with_checkout(&summary, method, details);
        flow.confirm(order.id.clone())?;
        let order_id = self.ledger.place_order(order);

        if self.config.checkout.clear_purchased_lines {
            let purchased: Vec<(LineKey, i64)> = flow
                .lines()
                .iter()
                .map(|l| {
                    let key = LineKey::new(l.product_id.clone(), l.size.clone(), l.color.clone());
                    (key, l.quantity)
                })
                .collect();
            let removed = self
                .cart
                .deduct_lines(purchased.iter().map(|(key, quantity)| (key, *quantity)));
            self.selection.sync(&self.cart);
            debug!(removed, "purchased quantities deducted from cart");
        }

        info!(order_id = %order_id, method = method.as_str(), "checkout confirmed");
        Ok(order_id)
    }

    /// Pay for a checkout and confirm it.
    pub async fn checkout_with(
        &mut self,
        flow: &mut CheckoutFlow,
        card: Option<&CardDetails>,
        save_card: bool,
    ) -> Result<OrderId, CommerceError> {
        let pending = self.begin_payment(flow, card, save_card)?;
        let receipt = pending.settle().await?;
        self.complete_checkout(flow, receipt)
    }
}
