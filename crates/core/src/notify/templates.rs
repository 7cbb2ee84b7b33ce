//! WhatsApp message templates.
//!
//! Pure string rendering; the dispatcher decides where each message
//! goes.

use devasthana_shared::config::TempleConfig;

use super::{BookingNotice, DonationNotice};

/// Donation receipt sent to the donor.
pub(super) fn donation_receipt(temple: &TempleConfig, notice: &DonationNotice) -> String {
    let certificate_line = notice.certificate_url.as_deref().map_or_else(
        String::new,
        |url| format!("\n📎 Your donation certificate: {url}\n"),
    );

    format!(
        r"🙏 Dear {name},

Thank you for your generous donation of ₹{amount} to {temple}!

🧾 Receipt Details:
• Receipt Number: {receipt}
• Donation: {donation_type}
{certificate_line}
May the divine bless you and your family!

For any queries, please contact: {contact}

{temple}
{subtitle}",
        name = notice.donor_name,
        amount = notice.amount,
        receipt = notice.receipt_number,
        donation_type = notice.donation_type,
        temple = temple.name,
        subtitle = temple.subtitle,
        contact = temple.contact_phone,
    )
}

/// Donation alert sent to the temple admin.
pub(super) fn donation_admin_alert(notice: &DonationNotice) -> String {
    format!(
        r"🔔 New Donation Received

• Receipt: {receipt}
• Donor: {name}
• Phone: {phone}
• Donation: {donation_type}
• Amount: ₹{amount}",
        receipt = notice.receipt_number,
        name = notice.donor_name,
        phone = notice.donor_phone,
        donation_type = notice.donation_type,
        amount = notice.amount,
    )
}

/// Booking confirmation sent to the devotee.
pub(super) fn booking_confirmation(temple: &TempleConfig, notice: &BookingNotice) -> String {
    format!(
        r"🙏 {temple} - Booking Received

Receipt Number: {receipt}
Pooja: {pooja}
Date: {date}
Time: {time}
Name: {name}

✅ Please arrive 15 minutes before the scheduled time
💰 Amount: ₹{amount}

You will be notified once the booking is confirmed.

📞 Temple Contact: {contact}",
        temple = temple.name,
        receipt = notice.receipt_number,
        pooja = notice.pooja_name,
        date = notice.preferred_date,
        time = notice.preferred_time,
        name = notice.devotee_name,
        amount = notice.amount,
        contact = temple.contact_phone,
    )
}

/// Booking alert sent to the temple admin.
pub(super) fn booking_admin_alert(notice: &BookingNotice) -> String {
    format!(
        r"🔔 New Pooja Booking

Receipt Number: {receipt}
Pooja: {pooja}
Date/Time: {date} at {time}

Devotee Details:
• Name: {name}
• Phone: {phone}

💰 Expected Amount: ₹{amount}

⏰ Please review and confirm this booking.",
        receipt = notice.receipt_number,
        pooja = notice.pooja_name,
        date = notice.preferred_date,
        time = notice.preferred_time,
        name = notice.devotee_name,
        phone = notice.devotee_phone,
        amount = notice.amount,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn temple() -> TempleConfig {
        TempleConfig {
            name: "Shri Raghavendra Swamy Brundavana Sannidhi".to_string(),
            subtitle: "Guru Seva Mandali (Regd.)".to_string(),
            contact_phone: "+918310408797".to_string(),
            admin_phone: "+918310408797".to_string(),
            admin_email: "admin@temple.org".to_string(),
        }
    }

    #[test]
    fn test_donation_receipt_includes_certificate_when_present() {
        let notice = DonationNotice {
            donor_name: "A Devotee".to_string(),
            donor_phone: "+919876543210".to_string(),
            donor_email: None,
            amount: dec!(500),
            donation_type: "Annadana".to_string(),
            receipt_number: "DN/FY/2025-26/00001".to_string(),
            certificate_url: Some("https://example.org/cert.pdf".to_string()),
        };

        let message = donation_receipt(&temple(), &notice);
        assert!(message.contains("DN/FY/2025-26/00001"));
        assert!(message.contains("₹500"));
        assert!(message.contains("https://example.org/cert.pdf"));
    }

    #[test]
    fn test_donation_receipt_without_certificate() {
        let notice = DonationNotice {
            donor_name: "A Devotee".to_string(),
            donor_phone: "+919876543210".to_string(),
            donor_email: None,
            amount: dec!(101),
            donation_type: "General Donation".to_string(),
            receipt_number: "DN/FY/2025-26/00002".to_string(),
            certificate_url: None,
        };

        let message = donation_receipt(&temple(), &notice);
        assert!(!message.contains("certificate"));
    }

    #[test]
    fn test_booking_messages_carry_schedule() {
        let notice = BookingNotice {
            devotee_name: "A Devotee".to_string(),
            devotee_phone: "+919876543210".to_string(),
            devotee_email: None,
            pooja_name: "Sarva Seva".to_string(),
            receipt_number: "PB/FY/2025-26/00003".to_string(),
            preferred_date: "2026-01-14".to_string(),
            preferred_time: "06:30 AM".to_string(),
            amount: dec!(1500),
        };

        let confirmation = booking_confirmation(&temple(), &notice);
        let alert = booking_admin_alert(&notice);
        for message in [&confirmation, &alert] {
            assert!(message.contains("Sarva Seva"));
            assert!(message.contains("2026-01-14"));
            assert!(message.contains("06:30 AM"));
        }
        assert!(alert.contains("+919876543210"));
    }
}
