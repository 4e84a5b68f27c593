//! Checkout orchestration.
//!
//! Turns a basket into a persisted, immutable order and notifies the
//! inventory-reservation subsystem along the way:
//!
//! 1. Validate: load basket and catalog data, assemble the order
//! 2. Notify: best effort; failure is observed, never fatal
//! 3. Persist: the step whose success means "order placed"
//!
//! The orchestrator is generic over its collaborators (stores, notifier,
//! URI composer), so transports and backends are swapped by construction,
//! not by copy-pasting the flow.

pub mod assembler;
pub mod error;
pub mod service;
pub mod state;

pub use assembler::OrderAssembler;
pub use error::CheckoutError;
pub use service::{CheckoutOutcome, CheckoutService, NotificationStatus};
pub use state::CheckoutState;
