//! WhatsApp delivery via the Twilio messages API.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use devasthana_shared::config::WhatsAppConfig;

use super::error::NotifyError;

#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    message: Option<String>,
}

/// Twilio WhatsApp client.
#[derive(Debug, Clone)]
pub struct WhatsAppClient {
    http: reqwest::Client,
    config: WhatsAppConfig,
}

impl WhatsAppClient {
    /// Creates a new WhatsApp client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: WhatsAppConfig) -> Result<Self, NotifyError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    /// Sends a WhatsApp message, optionally with a media attachment URL.
    ///
    /// In test mode the message is logged instead of sent.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::Rejected` when Twilio refuses the message,
    /// transport errors otherwise.
    pub async fn send(
        &self,
        to_phone: &str,
        body: &str,
        media_url: Option<&str>,
    ) -> Result<(), NotifyError> {
        if self.config.test_mode {
            info!(to = %to_phone, media = ?media_url, "WhatsApp test mode, message not sent");
            debug!(body = %body, "WhatsApp message body");
            return Ok(());
        }

        let url = format!(
            "{}/Accounts/{}/Messages.json",
            self.config.api_url, self.config.account_sid
        );

        let to = format!("whatsapp:{to_phone}");
        let from = format!("whatsapp:{}", self.config.from_number);
        let mut form = vec![("To", to.as_str()), ("From", from.as_str()), ("Body", body)];
        if let Some(media) = media_url {
            form.push(("MediaUrl", media));
        }

        let response = self
            .http
            .post(url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .json::<TwilioErrorBody>()
                .await
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(NotifyError::Rejected(detail));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_test_mode_sends_nothing() {
        let client = WhatsAppClient::new(WhatsAppConfig {
            account_sid: "AC_test".to_string(),
            auth_token: "token".to_string(),
            from_number: "+14155238886".to_string(),
            api_url: "http://localhost:1".to_string(),
            test_mode: true,
            timeout_secs: 1,
        })
        .unwrap();

        // Would fail with a transport error if it tried to connect.
        assert!(client.send("+919876543210", "hello", None).await.is_ok());
    }
}
