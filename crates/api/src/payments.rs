//! Stripe-style payment-gateway HTTP client.
//!
//! Charges are created with a form-encoded `POST /v1/charges` carrying
//! the platform's application fee, executed against the host's connected
//! account. Every request carries the configured deadline.

use std::time::Duration;

use serde::Deserialize;

use roost_core::payment::{ChargeReceipt, ChargeRequest, PaymentError, PaymentGateway};
use roost_shared::config::PaymentsConfig;

/// HTTP client for the payment gateway.
#[derive(Debug)]
pub struct StripeGateway {
    client: reqwest::Client,
    base_url: String,
    secret_key: String,
    timeout_ms: u64,
}

/// The subset of the gateway's charge response the pipeline needs.
#[derive(Debug, Deserialize)]
struct ChargeBody {
    id: String,
    status: String,
}

impl StripeGateway {
    /// Builds the gateway client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_config(config: &PaymentsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.charge_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: config.gateway_url.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
            timeout_ms: config.charge_timeout_ms,
        })
    }
}

impl PaymentGateway for StripeGateway {
    async fn charge(&self, request: ChargeRequest) -> Result<ChargeReceipt, PaymentError> {
        let form = [
            ("amount", request.amount.minor.to_string()),
            ("currency", request.amount.currency.to_string().to_lowercase()),
            ("source", request.source.clone()),
            (
                "application_fee_amount",
                request.application_fee.minor.to_string(),
            ),
        ];

        let response = self
            .client
            .post(format!("{}/v1/charges", self.base_url))
            .bearer_auth(&self.secret_key)
            .header("Stripe-Account", &request.destination)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PaymentError::Timeout(self.timeout_ms)
                } else {
                    PaymentError::Gateway(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(PaymentError::Declined(format!(
                "gateway returned {status}: {detail}"
            )));
        }

        let body: ChargeBody = response
            .json()
            .await
            .map_err(|e| PaymentError::Gateway(e.to_string()))?;

        if body.status != "succeeded" {
            return Err(PaymentError::Declined(format!(
                "charge {} has status {}",
                body.id, body.status
            )));
        }

        Ok(ChargeReceipt {
            charge_id: body.id,
            amount: request.amount,
        })
    }
}
