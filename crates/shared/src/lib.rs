//! Shared types, errors, and configuration for Devasthana.
//!
//! This crate provides common types used across all other crates:
//! - Receipt number and phone number value types
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Admin session tokens
//! - Email delivery
//! - Configuration management

pub mod config;
pub mod email;
pub mod error;
pub mod jwt;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{AdminClaims, AdminTokenService, JwtError};
