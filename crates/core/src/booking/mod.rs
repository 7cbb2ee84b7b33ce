//! Booking status state machine.
//!
//! Bookings move strictly forward: PENDING -> CONFIRMED -> COMPLETED.
//! CANCELLED is reachable from PENDING or CONFIRMED. Repeated or
//! out-of-order admin actions are rejected and perform no mutation, so
//! each transition timestamp is stamped exactly once.

mod error;
mod transition;

pub use error::BookingError;
pub use transition::{AdminAction, BookingStatus, DEFAULT_CANCELLATION_REASON, apply_action};
