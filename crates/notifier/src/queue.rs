//! Message-queue transport.

use async_trait::async_trait;
use domain::OrderSummary;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::config::QueueTransportConfig;
use crate::error::{NotifierError, Result};
use crate::{Delivery, ReservationNotifier};

/// Publishes reduced order summaries to a named queue on the message bus.
///
/// Each notification is an independent scoped acquisition of the connection:
/// connect, write one publish frame, shut down. Nothing is pooled or reused
/// across calls, and no acknowledgement is awaited. The payload is the UTF-8
/// JSON array of `{itemId, quantity}` lines.
#[derive(Debug, Clone)]
pub struct QueueNotifier {
    config: QueueTransportConfig,
}

impl QueueNotifier {
    /// Creates a queue notifier from its transport settings.
    pub fn new(config: QueueTransportConfig) -> Self {
        Self { config }
    }

    /// One publish: connect, frame, flush, shut down.
    async fn publish(&self, payload: &[u8]) -> Result<()> {
        let mut stream = TcpStream::connect(&self.config.endpoint).await?;

        let header = format!(
            "PUB {queue} {len}\nAUTH {key}\n\n",
            queue = self.config.queue,
            len = payload.len(),
            key = self.config.access_key,
        );
        stream.write_all(header.as_bytes()).await?;
        stream.write_all(payload).await?;
        stream.flush().await?;
        stream.shutdown().await?;

        Ok(())
    }
}

#[async_trait]
impl ReservationNotifier for QueueNotifier {
    #[tracing::instrument(skip(self, summary), fields(queue = %self.config.queue))]
    async fn notify(&self, summary: &OrderSummary) -> Result<Delivery> {
        let lines = summary.reservation_lines();
        let payload = serde_json::to_vec(&lines)?;

        match timeout(self.config.timeout, self.publish(&payload)).await {
            Ok(result) => {
                result?;
                tracing::debug!(lines = lines.len(), "reservation lines published");
                Ok(Delivery::Sent)
            }
            Err(_) => Err(NotifierError::Timeout(self.config.timeout)),
        }
    }
}
