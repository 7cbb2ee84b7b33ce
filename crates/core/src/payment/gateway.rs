//! Razorpay order-creation client.

use std::collections::HashMap;
use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use devasthana_shared::config::RazorpayConfig;

use super::error::PaymentError;

/// Input for creating a gateway order.
#[derive(Debug, Clone)]
pub struct CreateOrderInput {
    /// Amount in rupees.
    pub amount: Decimal,
    /// Receipt reference passed through to the gateway.
    pub receipt: String,
    /// Free-form notes attached to the order.
    pub notes: HashMap<String, String>,
}

/// An order created at the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayOrder {
    /// Gateway order id (`order_...`).
    pub id: String,
    /// Amount in the smallest currency unit (paise).
    pub amount: i64,
    /// Settlement currency.
    pub currency: String,
    /// Order status as reported by the gateway.
    pub status: String,
}

#[derive(Debug, Serialize)]
struct OrderRequest<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
    notes: &'a HashMap<String, String>,
    payment_capture: u8,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    error: Option<GatewayErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorDetail {
    description: Option<String>,
}

/// HTTP client for the Razorpay orders API.
#[derive(Debug, Clone)]
pub struct RazorpayClient {
    http: reqwest::Client,
    config: RazorpayConfig,
}

impl RazorpayClient {
    /// Creates a new gateway client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: RazorpayConfig) -> Result<Self, PaymentError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    /// Returns the public key id (needed by the checkout client).
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.config.key_id
    }

    /// Returns the settlement currency.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.config.currency
    }

    /// Creates an order at the gateway.
    ///
    /// The amount is converted to paise; capture is automatic.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::InvalidAmount` for non-positive amounts,
    /// `PaymentError::Rejected` when the gateway refuses the order, and
    /// transport errors otherwise.
    pub async fn create_order(&self, input: CreateOrderInput) -> Result<GatewayOrder, PaymentError> {
        if input.amount <= Decimal::ZERO {
            return Err(PaymentError::InvalidAmount);
        }

        let paise = (input.amount * Decimal::from(100)).trunc();
        let amount = paise.to_i64().ok_or(PaymentError::InvalidAmount)?;

        let body = OrderRequest {
            amount,
            currency: &self.config.currency,
            receipt: &input.receipt,
            notes: &input.notes,
            payment_capture: 1,
        };

        let response = self
            .http
            .post(format!("{}/orders", self.config.api_url))
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .json::<GatewayErrorBody>()
                .await
                .ok()
                .and_then(|b| b.error)
                .and_then(|e| e.description)
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(PaymentError::Rejected(detail));
        }

        let order = response
            .json::<GatewayOrder>()
            .await
            .map_err(|e| PaymentError::InvalidResponse(e.to_string()))?;

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_config() -> RazorpayConfig {
        RazorpayConfig {
            key_id: "rzp_test_key".to_string(),
            key_secret: "secret".to_string(),
            api_url: "https://api.razorpay.com/v1".to_string(),
            currency: "INR".to_string(),
            timeout_secs: 15,
        }
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected() {
        let client = RazorpayClient::new(test_config()).unwrap();

        let input = CreateOrderInput {
            amount: Decimal::ZERO,
            receipt: "TEMP/FY/2025-26/x".to_string(),
            notes: HashMap::new(),
        };
        assert!(matches!(
            client.create_order(input).await,
            Err(PaymentError::InvalidAmount)
        ));

        let input = CreateOrderInput {
            amount: dec!(-10),
            receipt: "TEMP/FY/2025-26/x".to_string(),
            notes: HashMap::new(),
        };
        assert!(matches!(
            client.create_order(input).await,
            Err(PaymentError::InvalidAmount)
        ));
    }

    #[test]
    fn test_paise_conversion_truncates() {
        let paise = (dec!(500.129) * Decimal::from(100)).trunc();
        assert_eq!(paise, dec!(50012));
    }
}
