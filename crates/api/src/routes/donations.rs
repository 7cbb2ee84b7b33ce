//! Donation routes: order creation, payment verification, and lookup.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use chrono_tz::Asia::Kolkata;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{AppState, routes::error_response};
use devasthana_core::certificate::CertificateClient;
use devasthana_core::notify::DonationNotice;
use devasthana_core::payment::{self, CreateOrderInput};
use devasthana_db::repositories::donation::{
    CreateDonationInput, DonationError, DonationRepository, DonorContact,
};
use devasthana_shared::AppError;
use devasthana_shared::types::phone::normalize_phone;

/// Creates the donation routes.
///
/// Receipt numbers contain `/` separators, so the lookup route is a
/// wildcard; clients may send the receipt raw or percent-encoded.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/donations/orders", post(create_order))
        .route("/donations/verify-payment", post(verify_payment))
        .route("/donations/{*receipt_number}", get(get_donation))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a donation order.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// Donation amount in rupees.
    pub amount: Option<Decimal>,
    /// Donation type label.
    pub donation_type: Option<String>,
    /// Optional purpose text.
    pub donation_purpose: Option<String>,
    /// Free-form notes passed to the gateway.
    #[serde(default)]
    pub notes: HashMap<String, String>,
}

/// Donor details supplied with payment verification.
#[derive(Debug, Deserialize)]
pub struct DonorInfoRequest {
    /// Donor display name.
    pub full_name: Option<String>,
    /// Donor phone number.
    pub phone_number: Option<String>,
    /// Email, when provided.
    pub email: Option<String>,
    /// City, when provided.
    pub city: Option<String>,
    /// State, when provided.
    pub state: Option<String>,
    /// Postal code, when provided.
    pub pincode: Option<String>,
    /// Purpose text, when provided.
    pub donation_purpose: Option<String>,
}

/// Request body for payment verification.
#[derive(Debug, Deserialize)]
pub struct VerifyPaymentRequest {
    /// Gateway order id.
    pub order_id: Option<String>,
    /// Gateway payment id.
    pub payment_id: Option<String>,
    /// Gateway signature over `order_id|payment_id`.
    pub signature: Option<String>,
    /// Donation row to finalize.
    pub donation_id: Option<Uuid>,
    /// Donor contact details.
    pub donor_info: Option<DonorInfoRequest>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST `/donations/orders` - Create a gateway order and a PENDING donation.
async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> impl IntoResponse {
    let Some(amount) = payload.amount else {
        return error_response(&AppError::Validation("amount is required".to_string()));
    };
    if amount <= Decimal::ZERO {
        return error_response(&AppError::Validation(
            "amount must be greater than zero".to_string(),
        ));
    }

    let donation_type = payload
        .donation_type
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| "General Donation".to_string());

    // Internal reference passed through to the gateway; the permanent
    // receipt number is only issued after verification.
    let reference = format!("don_{}", &Uuid::new_v4().simple().to_string()[..12]);

    let order = match state
        .razorpay
        .create_order(CreateOrderInput {
            amount,
            receipt: reference,
            notes: payload.notes,
        })
        .await
    {
        Ok(order) => order,
        Err(e) => {
            error!(error = %e, "Failed to create gateway order");
            return error_response(&AppError::ExternalService(e.to_string()));
        }
    };

    let repo = DonationRepository::new((*state.db).clone());
    let donation = match repo
        .create_pending(CreateDonationInput {
            amount,
            donation_type,
            donation_purpose: payload.donation_purpose,
            razorpay_order_id: order.id.clone(),
        })
        .await
    {
        Ok(donation) => donation,
        Err(e) => {
            error!(error = %e, order_id = %order.id, "Failed to record pending donation");
            return error_response(&AppError::Database(e.to_string()));
        }
    };

    info!(
        donation_id = %donation.id,
        order_id = %order.id,
        "Donation order created"
    );

    (
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "donation_id": donation.id,
            "order_id": order.id,
            "amount": donation.amount,
            "amount_paise": order.amount,
            "currency": order.currency,
            "key_id": state.razorpay.key_id()
        })),
    )
        .into_response()
}

/// POST `/donations/verify-payment` - Verify the signature and finalize.
#[allow(clippy::too_many_lines)]
async fn verify_payment(
    State(state): State<AppState>,
    Json(payload): Json<VerifyPaymentRequest>,
) -> impl IntoResponse {
    let (Some(order_id), Some(payment_id), Some(signature), Some(donation_id)) = (
        payload.order_id.as_deref(),
        payload.payment_id.as_deref(),
        payload.signature.as_deref(),
        payload.donation_id,
    ) else {
        return error_response(&AppError::Validation(
            "Missing required payment verification parameters".to_string(),
        ));
    };

    let Some(donor_info) = payload.donor_info else {
        return error_response(&AppError::Validation("donor_info is required".to_string()));
    };
    let Some(full_name) = donor_info.full_name.filter(|n| !n.trim().is_empty()) else {
        return error_response(&AppError::Validation(
            "donor_info.full_name is required".to_string(),
        ));
    };
    let phone = match donor_info.phone_number.as_deref().map(normalize_phone) {
        Some(Ok(phone)) => phone,
        Some(Err(e)) => {
            return error_response(&AppError::Validation(format!(
                "donor_info.phone_number: {e}"
            )));
        }
        None => {
            return error_response(&AppError::Validation(
                "donor_info.phone_number is required".to_string(),
            ));
        }
    };

    // Verification gate: nothing below runs on a mismatch.
    if !payment::verify_signature(
        &state.razorpay_config.key_secret,
        order_id,
        payment_id,
        signature,
    ) {
        warn!(order_id = %order_id, "Payment signature verification failed");
        return error_response(&AppError::SignatureMismatch);
    }

    let contact = DonorContact {
        full_name,
        phone,
        email: donor_info.email.filter(|e| !e.trim().is_empty()),
        city: donor_info.city,
        state: donor_info.state,
        pincode: donor_info.pincode,
        donation_purpose: donor_info.donation_purpose,
    };

    let repo = DonationRepository::new((*state.db).clone());
    let (donation, _user) = match repo
        .finalize_payment(donation_id, &contact, payment_id, signature)
        .await
    {
        Ok(result) => result,
        Err(DonationError::NotFound(id)) => {
            return error_response(&AppError::NotFound(format!("Donation {id}")));
        }
        Err(e) => {
            error!(error = %e, donation_id = %donation_id, "Failed to finalize payment");
            return error_response(&AppError::Database(e.to_string()));
        }
    };

    info!(
        donation_id = %donation.id,
        receipt = %donation.receipt_number,
        "Payment verified and donation finalized"
    );

    // Everything below is best-effort: the financial record is already
    // committed and its outcome no longer changes.
    let certificate_url = generate_certificate(&state, &contact.full_name, &donation).await;

    let notice = DonationNotice {
        donor_name: contact.full_name.clone(),
        donor_phone: contact.phone.clone(),
        donor_email: contact.email.clone(),
        amount: donation.amount,
        donation_type: donation.donation_type.clone(),
        receipt_number: donation.receipt_number.clone(),
        certificate_url: certificate_url.clone(),
    };
    state.notifier.donation_finalized(&notice).await;

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "receipt_number": donation.receipt_number,
            "payment_id": payment_id,
            "certificate_url": certificate_url
        })),
    )
        .into_response()
}

/// GET `/donations/{*receipt_number}` - Donation details by receipt.
async fn get_donation(
    State(state): State<AppState>,
    Path(receipt_number): Path<String>,
) -> impl IntoResponse {
    let repo = DonationRepository::new((*state.db).clone());

    match repo.find_by_receipt_number(&receipt_number).await {
        Ok((donation, user)) => (
            StatusCode::OK,
            Json(json!({
                "id": donation.id,
                "receipt_number": donation.receipt_number,
                "amount": donation.amount,
                "donation_type": donation.donation_type,
                "donation_purpose": donation.donation_purpose,
                "payment_status": donation.payment_status,
                "payment_method": donation.payment_method,
                "created_at": donation.created_at,
                "user_name": user.as_ref().map_or("Anonymous", |u| u.name.as_str()),
                "user_phone": user.as_ref().map(|u| u.phone.as_str()),
                "user_email": user.as_ref().and_then(|u| u.email.as_deref())
            })),
        )
            .into_response(),
        Err(DonationError::ReceiptNotFound(receipt)) => {
            error_response(&AppError::NotFound(format!("Donation {receipt}")))
        }
        Err(e) => {
            error!(error = %e, "Failed to fetch donation");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// Renders the donation certificate, returning its absolute URL.
///
/// Failures are logged and produce `None`; they never surface to the
/// caller of the payment flow.
async fn generate_certificate(
    state: &AppState,
    donor_name: &str,
    donation: &devasthana_db::entities::donations::Model,
) -> Option<String> {
    let donation_date = Utc::now().with_timezone(&Kolkata).date_naive().to_string();
    let request = CertificateClient::build_request(
        &state.temple,
        donor_name,
        donation.amount,
        &donation.receipt_number,
        &donation_date,
        donation.donation_purpose.as_deref(),
    );

    match state.certificates.generate(&request).await {
        Ok(issued) => Some(format!("{}{}", state.public_url, issued.download_path)),
        Err(e) => {
            warn!(
                receipt = %donation.receipt_number,
                error = %e,
                "Certificate generation failed, continuing without it"
            );
            None
        }
    }
}
