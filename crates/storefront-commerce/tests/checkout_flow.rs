//! End-to-end checkout: login, details, payment and order recording.

use std::sync::Arc;
use storefront_commerce::prelude::*;

fn details() -> DeliveryDetails {
    DeliveryDetails {
        first_name: "Zara".to_string(),
        last_name: "Malik".to_string(),
        country: "Pakistan".to_string(),
        street: "22 Clifton Block 5".to_string(),
        city: "Karachi".to_string(),
        state: "Sindh".to_string(),
        zip: "75600".to_string(),
        phone: "03451234567".to_string(),
    }
}

fn card() -> CardDetails {
    CardDetails::new("4111 1111 1111 1111", "09/28", "321")
}

/// Store with one Silk Blouse (Rs 5900.99) in the cart.
fn store_with_blouse() -> StorefrontStore {
    let mut store = StorefrontStore::default();
    let variant = store.open_product(&ProductId::new("2")).unwrap();
    store.add_selection(&variant).unwrap();
    store
}

fn ready_flow(store: &StorefrontStore, method: PaymentMethod) -> CheckoutFlow {
    let mut flow = store.begin_checkout().unwrap();
    let session = store
        .log_in(&Credentials::new("zara@example.pk", "hunter22"))
        .unwrap();
    flow.log_in(session).unwrap();
    flow.capture_details(details()).unwrap();
    flow.choose_method(method).unwrap();
    flow
}

#[tokio::test(start_paused = true)]
async fn test_card_checkout_records_order_with_delivery_fee() {
    let mut store = store_with_blouse();
    let mut flow = ready_flow(&store, PaymentMethod::Card);

    let summary = store.payment_summary(&flow).unwrap();
    assert_eq!(summary.delivery_fee.display(), "Rs 500.00");
    assert_eq!(summary.total.display(), "Rs 6400.99");

    let order_id = store
        .checkout_with(&mut flow, Some(&card()), true)
        .await
        .unwrap();

    assert!(flow.is_confirmed());
    assert_eq!(flow.order_id(), Some(&order_id));

    let orders = store.list_orders();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].payment_method, Some(PaymentMethod::Card));
    assert!(orders[0].is_paid());
    assert_eq!(orders[0].grand_total.display(), "Rs 6400.99");
    assert_eq!(orders[0].details.as_ref().unwrap().full_name(), "Zara Malik");

    assert!(store.cart().is_empty());
    assert_eq!(
        store.saved_card().unwrap().unwrap().masked(),
        "**** **** **** 1111"
    );
}

#[tokio::test]
async fn test_second_payment_is_rejected_while_one_is_pending() {
    let store = store_with_blouse();
    let flow = ready_flow(&store, PaymentMethod::Card);

    let pending = store.begin_payment(&flow, Some(&card()), false).unwrap();
    assert_eq!(
        store.begin_payment(&flow, Some(&card()), false).unwrap_err(),
        CommerceError::PaymentInFlight
    );

    drop(pending);
    assert!(store.begin_payment(&flow, Some(&card()), false).is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_payment_records_nothing() {
    let mut store = store_with_blouse();
    let mut flow = ready_flow(&store, PaymentMethod::Card);

    let pending = store.begin_payment(&flow, Some(&card()), false).unwrap();
    let handle = pending.cancel_handle();
    assert!(!handle.is_cancelled());
    handle.cancel();
    assert!(handle.is_cancelled());
    assert_eq!(
        pending.settle().await.unwrap_err(),
        CommerceError::PaymentCancelled
    );

    assert!(store.list_orders().is_empty());
    assert_eq!(flow.step(), CheckoutStep::MethodChosen);
    assert_eq!(store.cart().unique_item_count(), 1);

    // The shopper can try again.
    store
        .checkout_with(&mut flow, Some(&card()), false)
        .await
        .unwrap();
    assert_eq!(store.list_orders().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_stale_receipt_is_rejected() {
    let mut store = store_with_blouse();
    let first = ready_flow(&store, PaymentMethod::CashOnDelivery);
    let mut second = ready_flow(&store, PaymentMethod::CashOnDelivery);

    let receipt = store
        .begin_payment(&first, None, false)
        .unwrap()
        .settle()
        .await
        .unwrap();

    assert!(matches!(
        store.complete_checkout(&mut second, receipt),
        Err(CommerceError::StaleReceipt { .. })
    ));
    assert!(store.list_orders().is_empty());
    assert!(!second.is_confirmed());
}

#[tokio::test(start_paused = true)]
async fn test_confirmed_checkout_records_exactly_one_order() {
    let mut store = store_with_blouse();
    let mut flow = ready_flow(&store, PaymentMethod::CashOnDelivery);

    let receipt = store
        .begin_payment(&flow, None, false)
        .unwrap()
        .settle()
        .await
        .unwrap();
    store.complete_checkout(&mut flow, receipt.clone()).unwrap();

    assert!(matches!(
        store.complete_checkout(&mut flow, receipt),
        Err(CommerceError::InvalidCheckoutTransition { .. })
    ));
    assert_eq!(store.list_orders().len(), 1);
    assert!(!store.list_orders()[0].is_paid());
}

#[tokio::test(start_paused = true)]
async fn test_editing_details_requires_choosing_method_again() {
    let mut store = store_with_blouse();
    let mut flow = ready_flow(&store, PaymentMethod::Card);

    flow.capture_details(DeliveryDetails {
        city: "Hyderabad".to_string(),
        ..details()
    })
    .unwrap();
    assert!(matches!(
        store.checkout_with(&mut flow, Some(&card()), false).await,
        Err(CommerceError::CheckoutIncomplete(_))
    ));

    flow.choose_method(PaymentMethod::CashOnDelivery).unwrap();
    store.checkout_with(&mut flow, None, false).await.unwrap();
    assert_eq!(
        store.list_orders()[0].details.as_ref().unwrap().city,
        "Hyderabad"
    );
}

#[tokio::test]
async fn test_rejected_payment_leaves_saved_card_alone() {
    let store = store_with_blouse();
    let first = ready_flow(&store, PaymentMethod::Card);
    let second = ready_flow(&store, PaymentMethod::Card);

    let _pending = store.begin_payment(&first, Some(&card()), true).unwrap();
    let other_card = CardDetails::new("5200 8282 8282 8210", "12/29", "123");
    assert_eq!(
        store
            .begin_payment(&second, Some(&other_card), true)
            .unwrap_err(),
        CommerceError::PaymentInFlight
    );

    assert_eq!(
        store.saved_card().unwrap().unwrap().masked(),
        "**** **** **** 1111"
    );
}

#[tokio::test(start_paused = true)]
async fn test_units_added_during_payment_stay_in_cart() {
    let mut store = store_with_blouse();
    let mut flow = ready_flow(&store, PaymentMethod::Card);
    let variant = store.open_product(&ProductId::new("2")).unwrap();
    let key = variant.to_line_item().unwrap().key();

    let pending = store.begin_payment(&flow, Some(&card()), false).unwrap();
    store.add_selection(&variant).unwrap();
    store.add_selection(&variant).unwrap();
    assert_eq!(store.cart().get(&key).unwrap().quantity, 3);

    let receipt = pending.settle().await.unwrap();
    store.complete_checkout(&mut flow, receipt).unwrap();

    assert_eq!(store.list_orders()[0].lines[0].quantity, 1);
    assert_eq!(store.cart().get(&key).map(|l| l.quantity), Some(2));
    assert!(store.is_selected(&key));
}

struct BrokenVault;

impl CardVault for BrokenVault {
    fn load(&self) -> Result<Option<CardDetails>, CommerceError> {
        Err(CommerceError::Vault("unavailable".to_string()))
    }

    fn save(&self, _card: &CardDetails) -> Result<(), CommerceError> {
        Err(CommerceError::Vault("unavailable".to_string()))
    }

    fn forget(&self) -> Result<(), CommerceError> {
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn test_vault_failure_does_not_block_payment() {
    let mut store = store_with_blouse().with_vault(Arc::new(BrokenVault));
    let mut flow = ready_flow(&store, PaymentMethod::Card);

    store
        .checkout_with(&mut flow, Some(&card()), true)
        .await
        .unwrap();
    assert_eq!(store.list_orders().len(), 1);
    assert!(store.saved_card().is_err());
}

#[test]
fn test_bad_credentials_are_rejected_when_validation_is_on() {
    let store = StorefrontStore::default();
    assert!(matches!(
        store.log_in(&Credentials::new("not-an-email", "hunter22")),
        Err(CommerceError::InvalidCredentials(_))
    ));

    let mut config = StoreConfig::default();
    config.checkout.validate_login = false;
    let relaxed = StorefrontStore::new(config);
    assert!(relaxed.log_in(&Credentials::new("", "")).is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_purchased_lines_stay_when_clearing_is_off() {
    let mut config = StoreConfig::default();
    config.checkout.clear_purchased_lines = false;
    let mut store = StorefrontStore::new(config);
    let variant = store.open_product(&ProductId::new("7")).unwrap();
    store.add_selection(&variant).unwrap();

    let mut flow = ready_flow(&store, PaymentMethod::CashOnDelivery);
    store.checkout_with(&mut flow, None, false).await.unwrap();

    assert_eq!(store.cart().unique_item_count(), 1);
    assert_eq!(store.list_orders().len(), 1);
}
