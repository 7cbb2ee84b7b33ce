//! Pooja booking routes: creation and lookup.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use chrono_tz::Asia::Kolkata;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::{AppState, routes::error_response};
use devasthana_core::notify::BookingNotice;
use devasthana_db::repositories::booking::{
    BookingRepository, BookingRepositoryError, CreateBookingInput,
};
use devasthana_db::repositories::pooja_service::PoojaServiceRepository;
use devasthana_shared::AppError;
use devasthana_shared::types::phone::normalize_phone;

/// Creates the booking routes.
///
/// Receipt numbers contain `/` separators, so the lookup route is a
/// wildcard.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/bookings/{*receipt_number}", get(get_booking))
}

/// Request body for creating a booking.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    /// Catalog service id.
    pub service_id: Option<i32>,
    /// Devotee name.
    pub name: Option<String>,
    /// Devotee phone number.
    pub phone: Option<String>,
    /// Devotee email.
    pub email: Option<String>,
    /// Birth star, free text.
    pub nakshatra: Option<String>,
    /// Lineage, free text.
    pub gothra: Option<String>,
    /// Preferred date (YYYY-MM-DD).
    pub date: Option<NaiveDate>,
    /// Preferred time slot.
    pub time_slot: Option<String>,
    /// Special instructions.
    pub special_instructions: Option<String>,
    /// Gateway payment id when the booking was paid online.
    pub payment_id: Option<String>,
}

/// POST `/bookings` - Create a PENDING booking.
async fn create_booking(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookingRequest>,
) -> impl IntoResponse {
    let Some(service_id) = payload.service_id else {
        return error_response(&AppError::Validation("service_id is required".to_string()));
    };
    let Some(name) = payload.name.filter(|n| !n.trim().is_empty()) else {
        return error_response(&AppError::Validation("name is required".to_string()));
    };
    let phone = match payload.phone.as_deref().map(normalize_phone) {
        Some(Ok(phone)) => phone,
        Some(Err(e)) => {
            return error_response(&AppError::Validation(format!("phone: {e}")));
        }
        None => {
            return error_response(&AppError::Validation("phone is required".to_string()));
        }
    };
    let Some(date) = payload.date else {
        return error_response(&AppError::Validation("date is required".to_string()));
    };
    let Some(time_slot) = payload.time_slot.filter(|t| !t.trim().is_empty()) else {
        return error_response(&AppError::Validation("time_slot is required".to_string()));
    };

    let today = Utc::now().with_timezone(&Kolkata).date_naive();
    if date < today {
        return error_response(&AppError::Validation(
            "Cannot book for past dates".to_string(),
        ));
    }

    let services = PoojaServiceRepository::new((*state.db).clone());
    let service = match services.find_by_id(service_id).await {
        Ok(Some(service)) if service.is_active => service,
        Ok(_) => {
            return error_response(&AppError::NotFound(format!("Pooja service {service_id}")));
        }
        Err(e) => {
            error!(error = %e, "Failed to load pooja service");
            return error_response(&AppError::Database(e.to_string()));
        }
    };

    let repo = BookingRepository::new((*state.db).clone());
    let booking = match repo
        .create(CreateBookingInput {
            pooja_service_id: Some(service.id),
            pooja_name: service.name.clone(),
            pooja_price: service.price,
            preferred_date: date,
            preferred_time: time_slot,
            user_name: name,
            user_phone: phone,
            user_email: payload.email.filter(|e| !e.trim().is_empty()),
            nakshatra: payload.nakshatra,
            gothra: payload.gothra,
            special_instructions: payload.special_instructions,
            razorpay_payment_id: payload.payment_id,
        })
        .await
    {
        Ok(booking) => booking,
        Err(e) => {
            error!(error = %e, "Failed to create booking");
            return error_response(&AppError::Database(e.to_string()));
        }
    };

    info!(
        booking_id = %booking.id,
        receipt = %booking.receipt_number,
        pooja = %booking.pooja_name,
        "Booking created"
    );

    // Best-effort confirmations; the booking is already committed.
    let notice = BookingNotice {
        devotee_name: booking.user_name.clone(),
        devotee_phone: booking.user_phone.clone(),
        devotee_email: booking.user_email.clone(),
        pooja_name: booking.pooja_name.clone(),
        receipt_number: booking.receipt_number.clone(),
        preferred_date: booking.preferred_date.to_string(),
        preferred_time: booking.preferred_time.clone(),
        amount: booking.pooja_price,
    };
    state.notifier.booking_created(&notice).await;

    (
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "booking_id": booking.id,
            "booking_number": booking.booking_number,
            "receipt_number": booking.receipt_number,
            "pooja_name": booking.pooja_name,
            "amount": booking.pooja_price,
            "preferred_date": booking.preferred_date,
            "preferred_time": booking.preferred_time,
            "booking_status": booking.booking_status
        })),
    )
        .into_response()
}

/// GET `/bookings/{*receipt_number}` - Booking details by receipt.
async fn get_booking(
    State(state): State<AppState>,
    Path(receipt_number): Path<String>,
) -> impl IntoResponse {
    let repo = BookingRepository::new((*state.db).clone());

    match repo.find_by_receipt_number(&receipt_number).await {
        Ok(booking) => (
            StatusCode::OK,
            Json(json!({
                "id": booking.id,
                "booking_number": booking.booking_number,
                "receipt_number": booking.receipt_number,
                "pooja_name": booking.pooja_name,
                "amount": booking.pooja_price,
                "preferred_date": booking.preferred_date,
                "preferred_time": booking.preferred_time,
                "user_name": booking.user_name,
                "user_phone": booking.user_phone,
                "nakshatra": booking.nakshatra,
                "gothra": booking.gothra,
                "booking_status": booking.booking_status,
                "payment_status": booking.payment_status,
                "created_at": booking.created_at
            })),
        )
            .into_response(),
        Err(BookingRepositoryError::ReceiptNotFound(receipt)) => {
            error_response(&AppError::NotFound(format!("Booking {receipt}")))
        }
        Err(e) => {
            error!(error = %e, "Failed to fetch booking");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}
