//! Email delivery for receipts and admin alerts.
//!
//! Uses `lettre` for SMTP transport. Bodies are plain text; the
//! certificate, when available, is referenced by URL rather than
//! attached.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType, transport::smtp::authentication::Credentials,
};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::config::{EmailConfig, TempleConfig};

/// Email service errors.
#[derive(Debug, Error)]
pub enum EmailError {
    /// Failed to build email message.
    #[error("Failed to build email: {0}")]
    BuildError(String),
    /// Failed to send email.
    #[error("Failed to send email: {0}")]
    SendError(String),
    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// Email service for sending receipts and alerts.
#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
    temple: TempleConfig,
}

impl EmailService {
    /// Creates a new email service.
    #[must_use]
    pub const fn new(config: EmailConfig, temple: TempleConfig) -> Self {
        Self { config, temple }
    }

    fn create_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailError> {
        let creds = Credentials::new(
            self.config.smtp_username.clone(),
            self.config.smtp_password.clone(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)
            .map_err(|e| EmailError::SendError(e.to_string()))?
            .port(self.config.smtp_port)
            .credentials(creds)
            .build();

        Ok(transport)
    }

    /// Sends a donation receipt to the donor.
    ///
    /// # Errors
    ///
    /// Returns an error if the email cannot be built or sent.
    pub async fn send_donation_receipt(
        &self,
        to_email: &str,
        donor_name: &str,
        amount: Decimal,
        receipt_number: &str,
        donation_type: &str,
        certificate_url: Option<&str>,
    ) -> Result<(), EmailError> {
        let subject = format!("Donation Receipt - {receipt_number}");
        let certificate_line = certificate_url.map_or_else(String::new, |url| {
            format!("\nYour donation certificate: {url}\n")
        });

        let body = format!(
            r"Dear {donor_name},

Thank you for your generous donation to {temple}.

Receipt Number: {receipt_number}
Donation: {donation_type}
Amount: Rs. {amount}
{certificate_line}
May this offering bring blessings to you and your family.

For any queries, please contact {contact}.

{temple}
{subtitle}",
            temple = self.temple.name,
            subtitle = self.temple.subtitle,
            contact = self.temple.contact_phone,
        );

        self.send_email(to_email, &subject, &body).await
    }

    /// Sends a donation alert to the temple admin.
    ///
    /// # Errors
    ///
    /// Returns an error if the email cannot be built or sent.
    pub async fn send_donation_alert(
        &self,
        donor_name: &str,
        donor_phone: &str,
        donor_email: Option<&str>,
        amount: Decimal,
        receipt_number: &str,
        donation_type: &str,
    ) -> Result<(), EmailError> {
        let subject = format!("New Donation Received - {receipt_number}");
        let body = format!(
            r"A new donation has been received.

Receipt Number: {receipt_number}
Donor: {donor_name}
Phone: {donor_phone}
Email: {email}
Donation: {donation_type}
Amount: Rs. {amount}",
            email = donor_email.unwrap_or("Not provided"),
        );

        self.send_email(&self.temple.admin_email, &subject, &body)
            .await
    }

    /// Sends a pooja booking confirmation to the devotee.
    ///
    /// # Errors
    ///
    /// Returns an error if the email cannot be built or sent.
    pub async fn send_booking_confirmation(
        &self,
        to_email: &str,
        devotee_name: &str,
        pooja_name: &str,
        receipt_number: &str,
        preferred_date: &str,
        preferred_time: &str,
        amount: Decimal,
    ) -> Result<(), EmailError> {
        let subject = format!("Pooja Booking Received - {receipt_number}");
        let body = format!(
            r"Dear {devotee_name},

Your pooja booking at {temple} has been received.

Receipt Number: {receipt_number}
Pooja: {pooja_name}
Date: {preferred_date}
Time: {preferred_time}
Amount: Rs. {amount}

Please arrive 15 minutes before the scheduled time. You will be
notified once the booking is confirmed.

For any queries, please contact {contact}.

{temple}
{subtitle}",
            temple = self.temple.name,
            subtitle = self.temple.subtitle,
            contact = self.temple.contact_phone,
        );

        self.send_email(to_email, &subject, &body).await
    }

    /// Sends a booking alert to the temple admin.
    ///
    /// # Errors
    ///
    /// Returns an error if the email cannot be built or sent.
    pub async fn send_booking_alert(
        &self,
        devotee_name: &str,
        devotee_phone: &str,
        pooja_name: &str,
        receipt_number: &str,
        preferred_date: &str,
        preferred_time: &str,
    ) -> Result<(), EmailError> {
        let subject = format!("New Pooja Booking - {receipt_number}");
        let body = format!(
            r"A new pooja booking has been received.

Receipt Number: {receipt_number}
Pooja: {pooja_name}
Date/Time: {preferred_date} at {preferred_time}
Devotee: {devotee_name}
Phone: {devotee_phone}

Please review and confirm the booking."
        );

        self.send_email(&self.temple.admin_email, &subject, &body)
            .await
    }

    /// Sends a generic email.
    ///
    /// # Errors
    ///
    /// Returns an error if the email cannot be sent.
    pub async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), EmailError> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| EmailError::BuildError(e.to_string()))?;

        let transport = self.create_transport()?;
        transport
            .send(email)
            .await
            .map_err(|e| EmailError::SendError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_config_default() {
        let config = EmailConfig::default();
        assert_eq!(config.smtp_host, "localhost");
        assert_eq!(config.smtp_port, 1025);
    }
}
