//! API route definitions.

use axum::{Json, Router, http::StatusCode, middleware, response::IntoResponse, response::Response};
use serde_json::json;

use crate::{AppState, middleware::auth::admin_auth_middleware};
use devasthana_shared::AppError;

pub mod admin;
pub mod bookings;
pub mod certificates;
pub mod donations;
pub mod health;
pub mod pooja_services;

/// Creates the API router with all routes; admin routes (other than
/// login) sit behind the session-token middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = admin::protected_routes().layer(middleware::from_fn_with_state(
        state.clone(),
        admin_auth_middleware,
    ));

    Router::new()
        .merge(health::routes())
        .merge(donations::routes())
        .merge(bookings::routes())
        .merge(pooja_services::routes())
        .merge(certificates::routes())
        .merge(admin::login_routes())
        .merge(protected_routes)
}

/// Maps an application error to the wire format.
///
/// Internal detail stays in logs; clients get the taxonomy code and a
/// safe message.
pub(crate) fn error_response(err: &AppError) -> Response {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.client_message()
        })),
    )
        .into_response()
}
