//! Booking state machine errors.

use thiserror::Error;

use super::transition::{AdminAction, BookingStatus};

/// Booking state machine errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookingError {
    /// The action string is not one of confirm/complete/cancel.
    #[error("invalid action: {0}")]
    InvalidAction(String),

    /// The action is not allowed from the booking's current status.
    #[error("cannot {action} a booking in status {status:?}")]
    InvalidTransition {
        /// The attempted action.
        action: AdminAction,
        /// The booking's current status.
        status: BookingStatus,
    },
}
