//! Certificate renderer client.
//!
//! Donation certificates are rendered by an external service that
//! accepts donation data and returns a generated PDF identified by a
//! `certificate_<donation_id>_<timestamp>.pdf` filename. This module
//! wraps that contract and guards the download path against filename
//! traversal.

mod error;
mod service;

pub use error::CertificateError;
pub use service::{CertificateClient, CertificateRequest, IssuedCertificate, is_safe_filename};
