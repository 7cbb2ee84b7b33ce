//! `SeaORM` entity definitions.

pub mod donations;
pub mod pooja_bookings;
pub mod pooja_services;
pub mod receipt_sequences;
pub mod sea_orm_active_enums;
pub mod users;
