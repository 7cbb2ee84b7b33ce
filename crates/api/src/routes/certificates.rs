//! Certificate routes: generation proxy and PDF download.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::{AppState, routes::error_response};
use devasthana_core::certificate::{CertificateError, CertificateRequest, is_safe_filename};
use devasthana_shared::AppError;

/// Creates the certificate routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/certificates/generate", post(generate))
        .route("/certificates/download/{filename}", get(download))
}

/// Request body for certificate generation.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Donor display name.
    pub donor_name: Option<String>,
    /// Donation amount in rupees.
    pub amount: Option<Decimal>,
    /// Receipt or donation reference printed on the certificate.
    pub donation_id: Option<String>,
    /// Donation date, `YYYY-MM-DD`.
    pub donation_date: Option<String>,
    /// Optional reason line.
    pub reason_text: Option<String>,
}

/// POST `/certificates/generate` - Proxy a render request.
async fn generate(
    State(state): State<AppState>,
    Json(payload): Json<GenerateRequest>,
) -> impl IntoResponse {
    let (Some(donor_name), Some(amount), Some(donation_id), Some(donation_date)) = (
        payload.donor_name.filter(|n| !n.trim().is_empty()),
        payload.amount,
        payload.donation_id.filter(|i| !i.trim().is_empty()),
        payload.donation_date.filter(|d| !d.trim().is_empty()),
    ) else {
        return error_response(&AppError::Validation(
            "donor_name, amount, donation_id and donation_date are required".to_string(),
        ));
    };

    let request = CertificateRequest {
        donor_name,
        amount,
        donation_id: donation_id.replace('/', "-"),
        donation_date,
        reason_text: payload.reason_text,
        org_name: state.temple.name.clone(),
        org_subtitle: state.temple.subtitle.clone(),
        show_80g_note: true,
    };

    match state.certificates.generate(&request).await {
        Ok(issued) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "filename": issued.filename,
                "download_url": issued.download_path
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Certificate generation failed");
            error_response(&AppError::ExternalService(e.to_string()))
        }
    }
}

/// GET `/certificates/download/{filename}` - Stream a generated PDF.
async fn download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> impl IntoResponse {
    // Reject traversal attempts before the name goes anywhere.
    if !is_safe_filename(&filename) {
        return error_response(&AppError::Validation("Invalid filename".to_string()));
    }

    match state.certificates.fetch(&filename).await {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{filename}\""),
                ),
                (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate".to_string()),
            ],
            bytes,
        )
            .into_response(),
        Err(CertificateError::InvalidFilename) => {
            error_response(&AppError::Validation("Invalid filename".to_string()))
        }
        Err(CertificateError::NotFound(name)) => {
            error_response(&AppError::NotFound(format!("Certificate {name}")))
        }
        Err(e) => {
            error!(error = %e, "Certificate download failed");
            error_response(&AppError::ExternalService(e.to_string()))
        }
    }
}
