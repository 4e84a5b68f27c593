//! In-memory notifier for tests.

use std::sync::Arc;

use async_trait::async_trait;
use domain::OrderSummary;
use tokio::sync::RwLock;

use crate::error::{NotifierError, Result};
use crate::{Delivery, ReservationNotifier};

#[derive(Default)]
struct InMemoryNotifierState {
    delivered: Vec<OrderSummary>,
    fail_on_notify: bool,
}

/// Recording notifier for tests.
#[derive(Clone, Default)]
pub struct InMemoryNotifier {
    state: Arc<RwLock<InMemoryNotifierState>>,
}

impl InMemoryNotifier {
    /// Creates a new recording notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the notifier to fail every subsequent notify call.
    pub async fn set_fail_on_notify(&self, fail: bool) {
        self.state.write().await.fail_on_notify = fail;
    }

    /// Returns the number of summaries delivered so far.
    pub async fn delivered_count(&self) -> usize {
        self.state.read().await.delivered.len()
    }

    /// Returns the delivered summaries, in delivery order.
    pub async fn delivered(&self) -> Vec<OrderSummary> {
        self.state.read().await.delivered.clone()
    }
}

#[async_trait]
impl ReservationNotifier for InMemoryNotifier {
    async fn notify(&self, summary: &OrderSummary) -> Result<Delivery> {
        let mut state = self.state.write().await;

        if state.fail_on_notify {
            return Err(NotifierError::Io(std::io::Error::other(
                "reservation bus unreachable",
            )));
        }

        state.delivered.push(summary.clone());
        Ok(Delivery::Sent)
    }
}
