//! Receipt number formatting.
//!
//! Receipt numbers are human-readable and encode the fiscal year and a
//! per-year sequence: `DN/FY/2025-26/00042`. A donation created at
//! order time carries a `TEMP/...` placeholder until payment is
//! verified and a permanent number is issued.

use serde::{Deserialize, Serialize};

/// The kind of record a receipt number is issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptKind {
    /// Monetary donation.
    Donation,
    /// Pooja service booking.
    PoojaBooking,
}

impl ReceiptKind {
    /// Receipt number prefix for this kind.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Donation => "DN",
            Self::PoojaBooking => "PB",
        }
    }
}

/// Formats a permanent receipt number.
///
/// The sequence is zero-padded to 5 digits: `DN/FY/2025-26/00001`.
#[must_use]
pub fn format_receipt_number(kind: ReceiptKind, fiscal_year: &str, sequence: i64) -> String {
    format!("{}/FY/{fiscal_year}/{sequence:05}", kind.prefix())
}

/// Formats the temporary placeholder assigned at order-creation time.
///
/// The placeholder keeps the receipt column unique (the gateway order
/// reference is unique per order) without consuming a sequence value.
#[must_use]
pub fn temporary_receipt_number(fiscal_year: &str, order_ref: &str) -> String {
    format!("TEMP/FY/{fiscal_year}/{order_ref}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ReceiptKind::Donation, "2025-26", 1, "DN/FY/2025-26/00001")]
    #[case(ReceiptKind::Donation, "2024-25", 123, "DN/FY/2024-25/00123")]
    #[case(ReceiptKind::PoojaBooking, "2025-26", 99999, "PB/FY/2025-26/99999")]
    #[case(ReceiptKind::PoojaBooking, "2025-26", 100000, "PB/FY/2025-26/100000")]
    fn test_format_receipt_number(
        #[case] kind: ReceiptKind,
        #[case] fy: &str,
        #[case] seq: i64,
        #[case] expected: &str,
    ) {
        assert_eq!(format_receipt_number(kind, fy, seq), expected);
    }

    #[test]
    fn test_temporary_receipt_number() {
        assert_eq!(
            temporary_receipt_number("2025-26", "order_Nx8x2Qy"),
            "TEMP/FY/2025-26/order_Nx8x2Qy"
        );
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(ReceiptKind::Donation.prefix(), "DN");
        assert_eq!(ReceiptKind::PoojaBooking.prefix(), "PB");
    }
}
