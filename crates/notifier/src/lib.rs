//! Reservation notification for checked-out orders.
//!
//! One [`ReservationNotifier`] contract with interchangeable transports:
//! a message-queue publish over a scoped per-call connection, a direct HTTP
//! POST, or an explicit disabled transport. Exactly one is active in a given
//! deployment, selected by [`NotifierConfig`].
//!
//! Delivery is best-effort by design: at most one attempt per checkout, no
//! retry, no acknowledgement tracking. Failures surface as
//! [`NotifierError`] for the caller to log; they must never block order
//! persistence.

pub mod config;
pub mod error;
pub mod http;
pub mod memory;
pub mod queue;

pub use config::{ConfigError, HttpTransportConfig, NotifierConfig, QueueTransportConfig};
pub use error::{NotifierError, Result};
pub use http::HttpNotifier;
pub use memory::InMemoryNotifier;
pub use queue::QueueNotifier;

use std::sync::Arc;

use async_trait::async_trait;
use domain::OrderSummary;

/// Whether a notification was handed to the transport or skipped by
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The payload was handed to the transport.
    Sent,
    /// Notification is disabled; nothing was sent.
    Skipped,
}

/// Delivers an order's reservation payload to the inventory-reservation
/// subsystem.
#[async_trait]
pub trait ReservationNotifier: Send + Sync {
    /// Makes one delivery attempt for the given summary.
    async fn notify(&self, summary: &OrderSummary) -> Result<Delivery>;
}

#[async_trait]
impl ReservationNotifier for Arc<dyn ReservationNotifier> {
    async fn notify(&self, summary: &OrderSummary) -> Result<Delivery> {
        (**self).notify(summary).await
    }
}

/// Notifier for deployments where reservation notification is switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl ReservationNotifier for DisabledNotifier {
    async fn notify(&self, _summary: &OrderSummary) -> Result<Delivery> {
        tracing::debug!("reservation notification disabled, skipping");
        Ok(Delivery::Skipped)
    }
}
