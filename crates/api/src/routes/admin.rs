//! Admin routes: login, booking management, donation listing.
//!
//! Login verifies the configured password hash and issues a signed
//! session token; everything else in this module sits behind the
//! session middleware.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{AppState, routes::error_response};
use devasthana_core::booking::AdminAction;
use devasthana_db::entities::sea_orm_active_enums::{BookingStatus, PaymentStatus};
use devasthana_db::repositories::booking::{
    BookingFilter, BookingRepository, BookingRepositoryError,
};
use devasthana_db::repositories::donation::{DonationFilter, DonationRepository};
use devasthana_shared::AppError;
use devasthana_shared::types::pagination::PageRequest;

/// Creates the public admin routes (login only).
pub fn login_routes() -> Router<AppState> {
    Router::new().route("/admin/login", post(login))
}

/// Creates the admin routes that require a session token.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/bookings", get(list_bookings))
        .route("/admin/bookings", patch(update_booking))
        .route("/admin/donations", get(list_donations))
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for admin login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Admin password.
    pub password: Option<String>,
}

/// Query parameters for admin list endpoints.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
    /// Status filter; omit or `all` for every status.
    pub status: Option<String>,
    /// Free-text search.
    pub search: Option<String>,
}

impl ListQuery {
    fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.page.unwrap_or(1).max(1),
            per_page: self.limit.unwrap_or(10).clamp(1, 100),
        }
    }
}

/// Request body for admin booking actions.
#[derive(Debug, Deserialize)]
pub struct BookingActionRequest {
    /// Booking to act on.
    pub booking_id: Option<Uuid>,
    /// Action: `confirm`, `complete`, or `cancel`.
    pub action: Option<String>,
    /// Cancellation reason, when cancelling.
    pub reason: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST `/admin/login` - Verify the password and issue a session token.
async fn login(State(state): State<AppState>, Json(payload): Json<LoginRequest>) -> impl IntoResponse {
    let Some(password) = payload.password.filter(|p| !p.is_empty()) else {
        return error_response(&AppError::Validation("password is required".to_string()));
    };

    let parsed_hash = match PasswordHash::new(&state.admin_config.password_hash) {
        Ok(hash) => hash,
        Err(e) => {
            error!(error = %e, "Admin password hash is malformed");
            return error_response(&AppError::Internal("configuration error".to_string()));
        }
    };

    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        warn!("Admin login failed");
        return error_response(&AppError::Unauthorized("invalid credentials".to_string()));
    }

    match state.admin_tokens.issue() {
        Ok(token) => {
            info!("Admin session issued");
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "token": token,
                    "expires_in": state.admin_tokens.expires_in()
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to issue admin session token");
            error_response(&AppError::Internal(e.to_string()))
        }
    }
}

/// GET `/admin/bookings` - Paginated bookings with status counts.
async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let status = match parse_booking_status(query.status.as_deref()) {
        Ok(status) => status,
        Err(response) => return response,
    };

    let filter = BookingFilter {
        status,
        search: query.search.clone(),
    };
    let page = query.page_request();

    let repo = BookingRepository::new((*state.db).clone());

    let (bookings, total) = match repo.list(&filter, &page).await {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "Failed to list bookings");
            return error_response(&AppError::Database(e.to_string()));
        }
    };

    let status_counts = match repo.status_counts().await {
        Ok(counts) => counts,
        Err(e) => {
            error!(error = %e, "Failed to count bookings by status");
            return error_response(&AppError::Database(e.to_string()));
        }
    };

    let counts: serde_json::Map<String, serde_json::Value> = status_counts
        .into_iter()
        .map(|(status, count)| (status_label(&status).to_string(), json!(count)))
        .collect();

    let total_pages = total.div_ceil(u64::from(page.per_page));

    (
        StatusCode::OK,
        Json(json!({
            "bookings": bookings,
            "pagination": {
                "page": page.page,
                "limit": page.per_page,
                "total": total,
                "total_pages": total_pages
            },
            "status_counts": counts
        })),
    )
        .into_response()
}

/// PATCH `/admin/bookings` - Apply a confirm/complete/cancel action.
async fn update_booking(
    State(state): State<AppState>,
    Json(payload): Json<BookingActionRequest>,
) -> impl IntoResponse {
    let (Some(booking_id), Some(action)) = (payload.booking_id, payload.action.as_deref()) else {
        return error_response(&AppError::Validation(
            "booking_id and action are required".to_string(),
        ));
    };

    let action: AdminAction = match action.parse() {
        Ok(action) => action,
        Err(_) => {
            return error_response(&AppError::InvalidAction(action.to_string()));
        }
    };

    let repo = BookingRepository::new((*state.db).clone());

    match repo
        .apply_admin_action(booking_id, action, payload.reason)
        .await
    {
        Ok(booking) => {
            info!(
                booking_id = %booking_id,
                action = %action,
                status = ?booking.booking_status,
                "Booking status updated"
            );
            (StatusCode::OK, Json(json!(booking))).into_response()
        }
        Err(BookingRepositoryError::NotFound(id)) => {
            error_response(&AppError::NotFound(format!("Booking {id}")))
        }
        Err(BookingRepositoryError::Transition(e)) => {
            error_response(&AppError::Conflict(e.to_string()))
        }
        Err(e) => {
            error!(error = %e, "Failed to update booking");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// GET `/admin/donations` - Paginated donations with donors.
async fn list_donations(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let status = match parse_payment_status(query.status.as_deref()) {
        Ok(status) => status,
        Err(response) => return response,
    };

    let filter = DonationFilter {
        status,
        search: query.search.clone(),
    };
    let page = query.page_request();

    let repo = DonationRepository::new((*state.db).clone());

    match repo.list(&filter, &page).await {
        Ok((rows, total)) => {
            let donations: Vec<_> = rows
                .into_iter()
                .map(|(donation, user)| {
                    json!({
                        "id": donation.id,
                        "receipt_number": donation.receipt_number,
                        "amount": donation.amount,
                        "donation_type": donation.donation_type,
                        "donation_purpose": donation.donation_purpose,
                        "payment_status": donation.payment_status,
                        "created_at": donation.created_at,
                        "user_name": user.as_ref().map(|u| u.name.as_str()),
                        "user_phone": user.as_ref().map(|u| u.phone.as_str())
                    })
                })
                .collect();

            let total_pages = total.div_ceil(u64::from(page.per_page));

            (
                StatusCode::OK,
                Json(json!({
                    "donations": donations,
                    "pagination": {
                        "page": page.page,
                        "limit": page.per_page,
                        "total": total,
                        "total_pages": total_pages
                    }
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list donations");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

// Helper functions

fn parse_booking_status(
    raw: Option<&str>,
) -> Result<Option<BookingStatus>, axum::response::Response> {
    match raw {
        None => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
        Some(s) => match s.to_uppercase().as_str() {
            "PENDING" => Ok(Some(BookingStatus::Pending)),
            "CONFIRMED" => Ok(Some(BookingStatus::Confirmed)),
            "COMPLETED" => Ok(Some(BookingStatus::Completed)),
            "CANCELLED" => Ok(Some(BookingStatus::Cancelled)),
            _ => Err(error_response(&AppError::Validation(format!(
                "Unknown booking status: {s}"
            )))),
        },
    }
}

fn parse_payment_status(
    raw: Option<&str>,
) -> Result<Option<PaymentStatus>, axum::response::Response> {
    match raw {
        None => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
        Some(s) => match s.to_uppercase().as_str() {
            "PENDING" => Ok(Some(PaymentStatus::Pending)),
            "SUCCESS" => Ok(Some(PaymentStatus::Success)),
            "FAILED" => Ok(Some(PaymentStatus::Failed)),
            _ => Err(error_response(&AppError::Validation(format!(
                "Unknown payment status: {s}"
            )))),
        },
    }
}

const fn status_label(status: &BookingStatus) -> &'static str {
    match status {
        BookingStatus::Pending => "PENDING",
        BookingStatus::Confirmed => "CONFIRMED",
        BookingStatus::Completed => "COMPLETED",
        BookingStatus::Cancelled => "CANCELLED",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_booking_status() {
        assert!(matches!(
            parse_booking_status(Some("pending")),
            Ok(Some(BookingStatus::Pending))
        ));
        assert!(matches!(parse_booking_status(Some("all")), Ok(None)));
        assert!(matches!(parse_booking_status(None), Ok(None)));
        assert!(parse_booking_status(Some("bogus")).is_err());
    }

    #[test]
    fn test_page_request_clamps_limit() {
        let query = ListQuery {
            page: Some(0),
            limit: Some(1000),
            status: None,
            search: None,
        };
        let page = query.page_request();
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 100);
    }
}
