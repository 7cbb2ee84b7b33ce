//! Certificate renderer HTTP client.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use devasthana_shared::config::{CertificateConfig, TempleConfig};

use super::error::CertificateError;

/// Data sent to the renderer for a donation certificate.
#[derive(Debug, Clone, Serialize)]
pub struct CertificateRequest {
    /// Donor display name.
    pub donor_name: String,
    /// Donation amount in rupees.
    pub amount: Decimal,
    /// Receipt number printed on the certificate.
    pub donation_id: String,
    /// Donation date, `YYYY-MM-DD`.
    pub donation_date: String,
    /// Optional reason/purpose line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_text: Option<String>,
    /// Organization name printed in the header.
    pub org_name: String,
    /// Organization subtitle.
    pub org_subtitle: String,
    /// Whether to print the 80G tax note.
    pub show_80g_note: bool,
}

/// A certificate generated by the renderer.
#[derive(Debug, Clone)]
pub struct IssuedCertificate {
    /// Generated filename, `certificate_<donation_id>_<timestamp>.pdf`.
    pub filename: String,
    /// Download path relative to this service's public URL.
    pub download_path: String,
}

#[derive(Debug, Deserialize)]
struct RendererResponse {
    success: Option<bool>,
    filename: Option<String>,
    error: Option<String>,
}

/// Rejects filenames that could escape the renderer's output directory.
///
/// The download endpoint must refuse anything containing `..`, `/`, or
/// `\` before the name reaches the renderer.
#[must_use]
pub fn is_safe_filename(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.contains("..")
        && !filename.contains('/')
        && !filename.contains('\\')
}

/// HTTP client for the external certificate renderer.
#[derive(Debug, Clone)]
pub struct CertificateClient {
    http: reqwest::Client,
    config: CertificateConfig,
}

impl CertificateClient {
    /// Creates a new renderer client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: CertificateConfig) -> Result<Self, CertificateError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    /// Builds a certificate request from donation data and the temple
    /// identity.
    ///
    /// Receipt numbers contain `/` separators; the renderer embeds the
    /// id in the generated filename, so separators become dashes here.
    #[must_use]
    pub fn build_request(
        temple: &TempleConfig,
        donor_name: &str,
        amount: Decimal,
        receipt_number: &str,
        donation_date: &str,
        reason_text: Option<&str>,
    ) -> CertificateRequest {
        CertificateRequest {
            donor_name: donor_name.to_string(),
            amount,
            donation_id: receipt_number.replace('/', "-"),
            donation_date: donation_date.to_string(),
            reason_text: reason_text.map(ToString::to_string),
            org_name: temple.name.clone(),
            org_subtitle: temple.subtitle.clone(),
            show_80g_note: true,
        }
    }

    /// Generates a certificate at the renderer.
    ///
    /// # Errors
    ///
    /// Returns `CertificateError::Rejected` when the renderer refuses
    /// the request, transport errors otherwise.
    pub async fn generate(
        &self,
        request: &CertificateRequest,
    ) -> Result<IssuedCertificate, CertificateError> {
        let response = self
            .http
            .post(format!("{}/generate", self.config.base_url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response
            .json::<RendererResponse>()
            .await
            .map_err(|e| CertificateError::Transport(e.to_string()))?;

        if !status.is_success() || body.success != Some(true) {
            let detail = body
                .error
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(CertificateError::Rejected(detail));
        }

        let filename = body
            .filename
            .filter(|name| is_safe_filename(name))
            .ok_or(CertificateError::InvalidFilename)?;

        let download_path = format!("/api/v1/certificates/download/{filename}");
        Ok(IssuedCertificate {
            filename,
            download_path,
        })
    }

    /// Fetches a generated certificate PDF from the renderer.
    ///
    /// # Errors
    ///
    /// Returns `CertificateError::InvalidFilename` for unsafe names,
    /// `CertificateError::NotFound` when the renderer has no such file,
    /// and transport errors otherwise.
    pub async fn fetch(&self, filename: &str) -> Result<Vec<u8>, CertificateError> {
        if !is_safe_filename(filename) {
            return Err(CertificateError::InvalidFilename);
        }

        let response = self
            .http
            .get(format!("{}/download/{filename}", self.config.base_url))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CertificateError::NotFound(filename.to_string()));
        }
        if !response.status().is_success() {
            return Err(CertificateError::Transport(format!(
                "HTTP {}",
                response.status()
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("certificate_DN-00042_20251018_114321.pdf", true)]
    #[case("certificate_a.pdf", true)]
    #[case("", false)]
    #[case("../etc/passwd", false)]
    #[case("a/../b.pdf", false)]
    #[case("dir/file.pdf", false)]
    #[case("dir\\file.pdf", false)]
    fn test_is_safe_filename(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_safe_filename(name), expected);
    }

    #[test]
    fn test_build_request_flattens_receipt_separators() {
        let temple = TempleConfig {
            name: "Test Temple".to_string(),
            subtitle: String::new(),
            contact_phone: "+911234567890".to_string(),
            admin_phone: "+911234567890".to_string(),
            admin_email: "admin@temple.org".to_string(),
        };
        let request = CertificateClient::build_request(
            &temple,
            "A Devotee",
            rust_decimal_macros::dec!(500),
            "DN/FY/2025-26/00001",
            "2025-10-18",
            None,
        );
        assert_eq!(request.donation_id, "DN-FY-2025-26-00001");
        assert!(is_safe_filename(&format!(
            "certificate_{}_20251018.pdf",
            request.donation_id
        )));
    }

    #[tokio::test]
    async fn test_fetch_rejects_traversal_without_io() {
        let client = CertificateClient::new(CertificateConfig {
            base_url: "http://localhost:1".to_string(),
            timeout_secs: 1,
        })
        .unwrap();

        assert!(matches!(
            client.fetch("../secret.pdf").await,
            Err(CertificateError::InvalidFilename)
        ));
    }
}
