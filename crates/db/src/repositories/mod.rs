//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application.

pub mod booking;
pub mod donation;
pub mod pooja_service;
pub mod receipt;
pub mod user;

pub use booking::{BookingFilter, BookingRepository, BookingRepositoryError, CreateBookingInput};
pub use donation::{
    CreateDonationInput, DonationError, DonationFilter, DonationRepository, DonorContact,
};
pub use pooja_service::PoojaServiceRepository;
pub use receipt::issue_next;
pub use user::UserRepository;
