//! Mock payment gateway.
//!
//! Card payments settle after a fixed delay; cash on delivery settles at
//! once. Only one payment may be outstanding per gateway.

use crate::checkout::PaymentMethod;
use crate::error::CommerceError;
use crate::ids::{CheckoutId, PaymentId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Proof that a payment settled, tied to the checkout that started it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub payment_id: PaymentId,
    pub checkout_id: CheckoutId,
    pub method: PaymentMethod,
    pub amount: Money,
    pub settled_at: DateTime<Utc>,
}

/// Simulated payment processor.
///
/// Cloning shares the in-flight flag.
#[derive(Debug, Clone)]
pub struct MockPaymentGateway {
    card_delay: Duration,
    in_flight: Arc<AtomicBool>,
}

impl MockPaymentGateway {
    pub fn new(card_delay: Duration) -> Self {
        Self {
            card_delay,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// True while a payment is pending.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Start a payment.
    ///
    /// Fails with [`CommerceError::PaymentInFlight`] while another payment
    /// from this gateway has not settled, been cancelled or been dropped.
    #[instrument(skip_all, fields(checkout_id = %checkout_id, method = method.as_str()))]
    pub fn begin(
        &self,
        checkout_id: CheckoutId,
        method: PaymentMethod,
        amount: Money,
    ) -> Result<PendingPayment, CommerceError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("payment already in progress");
            return Err(CommerceError::PaymentInFlight);
        }

        let delay = match method {
            PaymentMethod::Card => self.card_delay,
            PaymentMethod::CashOnDelivery => Duration::ZERO,
        };
        let (tx, rx) = watch::channel(false);
        let payment = PendingPayment {
            id: PaymentId::generate(),
            checkout_id,
            method,
            amount,
            delay,
            cancelled: rx,
            cancel: PaymentCancelHandle { tx: Arc::new(tx) },
            _guard: InFlightGuard(Arc::clone(&self.in_flight)),
        };
        debug!(payment_id = %payment.id, amount = %amount, "payment started");
        Ok(payment)
    }
}

impl Default for MockPaymentGateway {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::config::DEFAULT_PAYMENT_DELAY_MS))
    }
}

/// Clears the gateway's in-flight flag when the payment goes away.
#[derive(Debug)]
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Cancels a pending payment from elsewhere, e.g. when the shopper leaves
/// the payment screen.
#[derive(Debug, Clone)]
pub struct PaymentCancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl PaymentCancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

/// A payment that has started but not settled.
#[derive(Debug)]
pub struct PendingPayment {
    id: PaymentId,
    checkout_id: CheckoutId,
    method: PaymentMethod,
    amount: Money,
    delay: Duration,
    cancelled: watch::Receiver<bool>,
    cancel: PaymentCancelHandle,
    _guard: InFlightGuard,
}

impl PendingPayment {
    pub fn id(&self) -> &PaymentId {
        &self.id
    }

    pub fn checkout_id(&self) -> &CheckoutId {
        &self.checkout_id
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn cancel_handle(&self) -> PaymentCancelHandle {
        self.cancel.clone()
    }

    /// Wait for the payment to settle.
    ///
    /// Resolves with [`CommerceError::PaymentCancelled`] if the payment is
    /// cancelled first. The gateway is free again once this returns.
    #[instrument(skip_all, fields(payment_id = %self.id, checkout_id = %self.checkout_id))]
    pub async fn settle(self) -> Result<PaymentReceipt, CommerceError> {
        let PendingPayment {
            id,
            checkout_id,
            method,
            amount,
            delay,
            mut cancelled,
            cancel: _cancel,
            _guard,
        } = self;

        if *cancelled.borrow() {
            info!("payment cancelled before settling");
            return Err(CommerceError::PaymentCancelled);
        }

        if !delay.is_zero() {
            tokio::select! {
                biased;
                _ = cancelled.wait_for(|c| *c) => {
                    info!("payment cancelled");
                    return Err(CommerceError::PaymentCancelled);
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }

        info!(amount = %amount, "payment settled");
        Ok(PaymentReceipt {
            payment_id: id,
            checkout_id,
            method,
            amount,
            settled_at: Utc::now(),
        })
    }
}
