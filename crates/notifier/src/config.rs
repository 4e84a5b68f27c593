//! Notifier configuration resolved at startup.
//!
//! The transport is an explicit enumerated choice (queue, http, or
//! disabled), and the queue access key is always supplied from outside;
//! nothing is inferred from an empty or missing endpoint string.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::{DisabledNotifier, HttpNotifier, QueueNotifier, ReservationNotifier};

/// Reservation endpoint used when no override is configured.
pub const DEFAULT_HTTP_ENDPOINT: &str = "https://orderitemreserver.example.net/api/reserve";

/// Queue the reservation subsystem consumes from.
pub const DEFAULT_QUEUE_NAME: &str = "OrderItemReserverBus";

const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Message-bus transport settings.
#[derive(Clone)]
pub struct QueueTransportConfig {
    /// Bus endpoint as `host:port`.
    pub endpoint: String,

    /// Named queue to publish to.
    pub queue: String,

    /// Access key presented on every publish. Supplied externally; there is
    /// no compiled-in default.
    pub access_key: String,

    /// Bound on one publish, connect to close.
    pub timeout: Duration,
}

// The access key never appears in logs.
impl std::fmt::Debug for QueueTransportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueTransportConfig")
            .field("endpoint", &self.endpoint)
            .field("queue", &self.queue)
            .field("access_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// HTTP transport settings.
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Endpoint the summary is POSTed to.
    pub endpoint: String,

    /// Bound on one request.
    pub timeout: Duration,
}

/// Which reservation transport a deployment runs. Exactly one is active.
#[derive(Debug, Clone)]
pub enum NotifierConfig {
    /// Skip notification entirely.
    Disabled,

    /// Publish reduced summaries to the message bus.
    Queue(QueueTransportConfig),

    /// POST summaries to the reservation endpoint.
    Http(HttpTransportConfig),
}

/// Errors resolving the notifier configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `RESERVER_TRANSPORT` holds something other than the known transports.
    #[error("Unrecognized RESERVER_TRANSPORT value: {0} (expected queue, http, or disabled)")]
    UnknownTransport(String),

    /// A variable the selected transport needs is not set.
    #[error("{0} must be set for the selected transport")]
    MissingVar(&'static str),
}

impl NotifierConfig {
    /// Reads the transport selection from the environment.
    ///
    /// - `RESERVER_TRANSPORT` — `queue`, `http`, or `disabled` (default
    ///   `disabled`)
    /// - `RESERVER_ENDPOINT` — overrides the default reservation URL
    /// - `RESERVER_BUS_ADDR` — bus endpoint, required for `queue`
    /// - `RESERVER_BUS_QUEUE` — queue name, default `OrderItemReserverBus`
    /// - `RESERVER_BUS_ACCESS_KEY` — transport secret, required for `queue`
    /// - `RESERVER_TIMEOUT_MS` — deadline for one transport call
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let timeout = lookup("RESERVER_TIMEOUT_MS")
            .and_then(|ms| ms.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(DEFAULT_TIMEOUT_MS));

        let transport = lookup("RESERVER_TRANSPORT").unwrap_or_else(|| "disabled".to_string());

        match transport.as_str() {
            "disabled" => Ok(Self::Disabled),
            "http" => Ok(Self::Http(HttpTransportConfig {
                endpoint: lookup("RESERVER_ENDPOINT")
                    .unwrap_or_else(|| DEFAULT_HTTP_ENDPOINT.to_string()),
                timeout,
            })),
            "queue" => Ok(Self::Queue(QueueTransportConfig {
                endpoint: lookup("RESERVER_BUS_ADDR")
                    .ok_or(ConfigError::MissingVar("RESERVER_BUS_ADDR"))?,
                queue: lookup("RESERVER_BUS_QUEUE")
                    .unwrap_or_else(|| DEFAULT_QUEUE_NAME.to_string()),
                access_key: lookup("RESERVER_BUS_ACCESS_KEY")
                    .ok_or(ConfigError::MissingVar("RESERVER_BUS_ACCESS_KEY"))?,
                timeout,
            })),
            other => Err(ConfigError::UnknownTransport(other.to_string())),
        }
    }

    /// Returns the selected transport's name.
    pub fn transport_name(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Queue(_) => "queue",
            Self::Http(_) => "http",
        }
    }

    /// Builds the configured notifier.
    pub fn build(&self) -> Arc<dyn ReservationNotifier> {
        match self {
            Self::Disabled => Arc::new(DisabledNotifier),
            Self::Queue(cfg) => Arc::new(QueueNotifier::new(cfg.clone())),
            Self::Http(cfg) => Arc::new(HttpNotifier::new(cfg.clone())),
        }
    }
}
