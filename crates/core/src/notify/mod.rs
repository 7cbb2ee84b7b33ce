//! Best-effort notification dispatch.
//!
//! The dispatcher is invoked only after the triggering state transition
//! has committed. Delivery failures are logged and swallowed; they
//! never roll back, retry, or alter the committed result. No delivery
//! state is persisted.

mod error;
mod templates;
mod whatsapp;

pub use error::NotifyError;
pub use whatsapp::WhatsAppClient;

use rust_decimal::Decimal;
use tracing::warn;

use devasthana_shared::config::TempleConfig;
use devasthana_shared::email::EmailService;

/// Notification payload for a finalized donation.
#[derive(Debug, Clone)]
pub struct DonationNotice {
    /// Donor display name.
    pub donor_name: String,
    /// Donor phone in E.164 form.
    pub donor_phone: String,
    /// Donor email, when provided.
    pub donor_email: Option<String>,
    /// Donation amount in rupees.
    pub amount: Decimal,
    /// Donation type label.
    pub donation_type: String,
    /// Permanent receipt number.
    pub receipt_number: String,
    /// Absolute certificate download URL, when rendering succeeded.
    pub certificate_url: Option<String>,
}

/// Notification payload for a new pooja booking.
#[derive(Debug, Clone)]
pub struct BookingNotice {
    /// Devotee display name.
    pub devotee_name: String,
    /// Devotee phone in E.164 form.
    pub devotee_phone: String,
    /// Devotee email, when provided.
    pub devotee_email: Option<String>,
    /// Pooja service name.
    pub pooja_name: String,
    /// Booking receipt number.
    pub receipt_number: String,
    /// Preferred date, `YYYY-MM-DD`.
    pub preferred_date: String,
    /// Preferred time slot.
    pub preferred_time: String,
    /// Booking amount in rupees.
    pub amount: Decimal,
}

/// Composes WhatsApp and email deliveries for committed transitions.
#[derive(Clone)]
pub struct NotificationDispatcher {
    whatsapp: WhatsAppClient,
    email: EmailService,
    temple: TempleConfig,
}

impl NotificationDispatcher {
    /// Creates a new dispatcher.
    #[must_use]
    pub const fn new(whatsapp: WhatsAppClient, email: EmailService, temple: TempleConfig) -> Self {
        Self {
            whatsapp,
            email,
            temple,
        }
    }

    /// Sends donor and admin notifications for a finalized donation.
    ///
    /// Each delivery is independent; a failure is logged and the rest
    /// still go out.
    pub async fn donation_finalized(&self, notice: &DonationNotice) {
        let donor_message = templates::donation_receipt(&self.temple, notice);
        if let Err(e) = self
            .whatsapp
            .send(&notice.donor_phone, &donor_message, notice.certificate_url.as_deref())
            .await
        {
            warn!(
                receipt = %notice.receipt_number,
                error = %e,
                "Failed to send donation receipt via WhatsApp"
            );
        }

        let admin_message = templates::donation_admin_alert(notice);
        if let Err(e) = self
            .whatsapp
            .send(&self.temple.admin_phone, &admin_message, None)
            .await
        {
            warn!(
                receipt = %notice.receipt_number,
                error = %e,
                "Failed to send donation alert to admin via WhatsApp"
            );
        }

        if let Some(email) = &notice.donor_email {
            if let Err(e) = self
                .email
                .send_donation_receipt(
                    email,
                    &notice.donor_name,
                    notice.amount,
                    &notice.receipt_number,
                    &notice.donation_type,
                    notice.certificate_url.as_deref(),
                )
                .await
            {
                warn!(
                    receipt = %notice.receipt_number,
                    error = %e,
                    "Failed to send donation receipt email"
                );
            }
        }

        if let Err(e) = self
            .email
            .send_donation_alert(
                &notice.donor_name,
                &notice.donor_phone,
                notice.donor_email.as_deref(),
                notice.amount,
                &notice.receipt_number,
                &notice.donation_type,
            )
            .await
        {
            warn!(
                receipt = %notice.receipt_number,
                error = %e,
                "Failed to send donation alert email to admin"
            );
        }
    }

    /// Sends devotee and admin notifications for a new booking.
    pub async fn booking_created(&self, notice: &BookingNotice) {
        let devotee_message = templates::booking_confirmation(&self.temple, notice);
        if let Err(e) = self
            .whatsapp
            .send(&notice.devotee_phone, &devotee_message, None)
            .await
        {
            warn!(
                receipt = %notice.receipt_number,
                error = %e,
                "Failed to send booking confirmation via WhatsApp"
            );
        }

        let admin_message = templates::booking_admin_alert(notice);
        if let Err(e) = self
            .whatsapp
            .send(&self.temple.admin_phone, &admin_message, None)
            .await
        {
            warn!(
                receipt = %notice.receipt_number,
                error = %e,
                "Failed to send booking alert to admin via WhatsApp"
            );
        }

        if let Some(email) = &notice.devotee_email {
            if let Err(e) = self
                .email
                .send_booking_confirmation(
                    email,
                    &notice.devotee_name,
                    &notice.pooja_name,
                    &notice.receipt_number,
                    &notice.preferred_date,
                    &notice.preferred_time,
                    notice.amount,
                )
                .await
            {
                warn!(
                    receipt = %notice.receipt_number,
                    error = %e,
                    "Failed to send booking confirmation email"
                );
            }
        }

        if let Err(e) = self
            .email
            .send_booking_alert(
                &notice.devotee_name,
                &notice.devotee_phone,
                &notice.pooja_name,
                &notice.receipt_number,
                &notice.preferred_date,
                &notice.preferred_time,
            )
            .await
        {
            warn!(
                receipt = %notice.receipt_number,
                error = %e,
                "Failed to send booking alert email to admin"
            );
        }
    }
}
