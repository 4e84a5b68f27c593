//! HTTP transport.

use async_trait::async_trait;
use domain::OrderSummary;
use reqwest::Client;

use crate::config::HttpTransportConfig;
use crate::error::{NotifierError, Result};
use crate::{Delivery, ReservationNotifier};

/// Diagnostic stand-in when the endpoint answers with an empty body.
pub const EMPTY_BODY_DIAGNOSTIC: &str = "reservation endpoint returned no body";

/// POSTs order summaries to the reservation endpoint.
///
/// One request per notification, bounded by the configured timeout. The
/// response body is only diagnostic text; nothing is parsed out of it.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    config: HttpTransportConfig,
    client: Client,
}

impl HttpNotifier {
    /// Creates an HTTP notifier from its transport settings.
    pub fn new(config: HttpTransportConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// POSTs the summary and returns the response body as diagnostic text.
    ///
    /// An empty body is replaced with a fixed failure string so the caller
    /// always has something to log.
    pub async fn post_summary(&self, summary: &OrderSummary) -> Result<String> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .timeout(self.config.timeout)
            .json(summary)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifierError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        if body.is_empty() {
            Ok(EMPTY_BODY_DIAGNOSTIC.to_string())
        } else {
            Ok(body)
        }
    }
}

#[async_trait]
impl ReservationNotifier for HttpNotifier {
    #[tracing::instrument(skip(self, summary), fields(endpoint = %self.config.endpoint))]
    async fn notify(&self, summary: &OrderSummary) -> Result<Delivery> {
        let diagnostic = self.post_summary(summary).await?;
        tracing::debug!(response = %diagnostic, "reservation endpoint answered");
        Ok(Delivery::Sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::post;
    use common::{BuyerId, CatalogItemId, Money};
    use domain::{Address, CatalogItemOrdered, Order, OrderItem};
    use std::time::Duration;

    fn sample_summary() -> OrderSummary {
        let order = Order::new(
            BuyerId::new("b1"),
            Address::new("1 Main St", "Springfield", "OR", "USA", "97477"),
            vec![OrderItem::new(
                CatalogItemOrdered {
                    catalog_item_id: CatalogItemId::new(5),
                    name: "Widget".to_string(),
                    picture_uri: "https://cdn.example.net/widget.png".to_string(),
                },
                Money::from_cents(350),
                4,
            )],
        );
        OrderSummary::from_order(&order)
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/reserve")
    }

    fn notifier(endpoint: String) -> HttpNotifier {
        HttpNotifier::new(HttpTransportConfig {
            endpoint,
            timeout: Duration::from_secs(2),
        })
    }

    async fn answer_reserved() -> &'static str {
        "reserved"
    }

    async fn answer_empty() -> &'static str {
        ""
    }

    async fn answer_error() -> (StatusCode, &'static str) {
        (StatusCode::INTERNAL_SERVER_ERROR, "boom")
    }

    #[tokio::test]
    async fn returns_the_response_body_as_diagnostic() {
        let endpoint = serve(Router::new().route("/reserve", post(answer_reserved))).await;

        let diagnostic = notifier(endpoint)
            .post_summary(&sample_summary())
            .await
            .unwrap();
        assert_eq!(diagnostic, "reserved");
    }

    #[tokio::test]
    async fn substitutes_fixed_string_for_empty_body() {
        let endpoint = serve(Router::new().route("/reserve", post(answer_empty))).await;

        let diagnostic = notifier(endpoint)
            .post_summary(&sample_summary())
            .await
            .unwrap();
        assert_eq!(diagnostic, EMPTY_BODY_DIAGNOSTIC);
    }

    #[tokio::test]
    async fn non_success_status_is_a_failure() {
        let endpoint = serve(Router::new().route("/reserve", post(answer_error))).await;

        let result = notifier(endpoint).notify(&sample_summary()).await;
        assert!(matches!(
            result,
            Err(NotifierError::Status { status: 500 })
        ));
    }

    #[tokio::test]
    async fn successful_post_reports_sent() {
        let endpoint = serve(Router::new().route("/reserve", post(answer_reserved))).await;

        let delivery = notifier(endpoint).notify(&sample_summary()).await.unwrap();
        assert_eq!(delivery, Delivery::Sent);
    }
}
