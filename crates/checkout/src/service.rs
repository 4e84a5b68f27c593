//! Checkout orchestration service.

use common::{BasketId, OrderId};
use domain::{Address, OrderSummary, PictureUriComposer};
use notifier::{Delivery, ReservationNotifier};
use store::{BasketStore, CatalogStore, OrderStore};

use crate::assembler::OrderAssembler;
use crate::error::{CheckoutError, Result};
use crate::state::CheckoutState;

/// How the reservation notification for one checkout ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStatus {
    /// The payload was handed to the transport.
    Delivered,

    /// The transport failed; the order was placed anyway.
    Failed,

    /// Notification is disabled by configuration.
    Skipped,
}

impl NotificationStatus {
    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStatus::Delivered => "delivered",
            NotificationStatus::Failed => "failed",
            NotificationStatus::Skipped => "skipped",
        }
    }
}

/// Result of a completed checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutOutcome {
    /// Id the order store assigned on append.
    pub order_id: OrderId,

    /// Observed notification result. Never gates persistence.
    pub notification: NotificationStatus,
}

/// Drives one checkout through validation, notification, and persistence.
///
/// Steps within a checkout are strictly sequential; concurrent checkouts
/// share nothing but the stores, which own their concurrency control. The
/// notifier's connection is scoped to the notify step and released on every
/// path.
pub struct CheckoutService<B, C, O, N, U> {
    assembler: OrderAssembler<B, C, U>,
    orders: O,
    notifier: N,
}

impl<B, C, O, N, U> CheckoutService<B, C, O, N, U>
where
    B: BasketStore,
    C: CatalogStore,
    O: OrderStore,
    N: ReservationNotifier,
    U: PictureUriComposer,
{
    /// Creates a checkout service over its collaborators.
    pub fn new(baskets: B, catalog: C, orders: O, notifier: N, uri_composer: U) -> Self {
        Self {
            assembler: OrderAssembler::new(baskets, catalog, uri_composer),
            orders,
            notifier,
        }
    }

    /// Converts the basket into a persisted order, notifying the reservation
    /// subsystem of the quantities to reserve.
    ///
    /// The order is placed if and only if this returns Ok. A notification
    /// failure shows up in the outcome, not as an error.
    #[tracing::instrument(skip(self, ship_to))]
    pub async fn checkout(
        &self,
        basket_id: BasketId,
        ship_to: Address,
    ) -> Result<CheckoutOutcome> {
        metrics::counter!("checkout_total").increment(1);
        let started = std::time::Instant::now();

        let state = CheckoutState::Validating;
        tracing::debug!(%state, "checkout step");
        let order = match self.assembler.assemble(basket_id, ship_to).await {
            Ok(order) => order,
            Err(e) => {
                let state = CheckoutState::Rejected;
                metrics::counter!("checkout_rejected").increment(1);
                tracing::info!(%state, error = %e, "checkout rejected");
                return Err(e);
            }
        };

        let state = CheckoutState::Notifying;
        tracing::debug!(%state, "checkout step");
        let summary = OrderSummary::from_order(&order);
        let notification = match self.notifier.notify(&summary).await {
            Ok(Delivery::Sent) => NotificationStatus::Delivered,
            Ok(Delivery::Skipped) => NotificationStatus::Skipped,
            Err(e) => {
                metrics::counter!("checkout_notification_failures").increment(1);
                tracing::warn!(error = %e, "reservation notification failed");
                NotificationStatus::Failed
            }
        };

        let state = CheckoutState::Persisting;
        tracing::debug!(%state, "checkout step");
        let order_id = self
            .orders
            .append(&order)
            .await
            .map_err(CheckoutError::Persistence)?;

        let state = CheckoutState::Completed;
        metrics::histogram!("checkout_duration_seconds").record(started.elapsed().as_secs_f64());
        tracing::info!(
            %state,
            %order_id,
            notification = notification.as_str(),
            total = %order.total(),
            "order placed"
        );

        Ok(CheckoutOutcome {
            order_id,
            notification,
        })
    }
}
