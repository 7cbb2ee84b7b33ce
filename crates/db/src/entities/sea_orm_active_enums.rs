//! Database enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use devasthana_core::booking;

/// Payment status of a donation or booking.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_status")]
pub enum PaymentStatus {
    /// Order created, payment not yet verified.
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Payment verified.
    #[sea_orm(string_value = "SUCCESS")]
    Success,
    /// Payment failed at the gateway.
    #[sea_orm(string_value = "FAILED")]
    Failed,
}

/// Booking lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "booking_status")]
pub enum BookingStatus {
    /// Awaiting admin confirmation.
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Confirmed by an admin.
    #[sea_orm(string_value = "CONFIRMED")]
    Confirmed,
    /// The pooja has been performed.
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    /// Cancelled by an admin.
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

impl From<booking::BookingStatus> for BookingStatus {
    fn from(status: booking::BookingStatus) -> Self {
        match status {
            booking::BookingStatus::Pending => Self::Pending,
            booking::BookingStatus::Confirmed => Self::Confirmed,
            booking::BookingStatus::Completed => Self::Completed,
            booking::BookingStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<&BookingStatus> for booking::BookingStatus {
    fn from(status: &BookingStatus) -> Self {
        match status {
            BookingStatus::Pending => Self::Pending,
            BookingStatus::Confirmed => Self::Confirmed,
            BookingStatus::Completed => Self::Completed,
            BookingStatus::Cancelled => Self::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_status_mapping_roundtrip() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ] {
            let core: booking::BookingStatus = (&status).into();
            assert_eq!(BookingStatus::from(core), status);
        }
    }
}
