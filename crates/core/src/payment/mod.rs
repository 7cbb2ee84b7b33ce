//! Payment gateway integration.
//!
//! Two concerns live here: creating orders against the Razorpay API,
//! and the verification gate that checks an inbound payment signature
//! before any state transition is allowed.

mod error;
mod gateway;
mod verify;

pub use error::PaymentError;
pub use gateway::{CreateOrderInput, GatewayOrder, RazorpayClient};
pub use verify::{expected_signature, verify_signature};
