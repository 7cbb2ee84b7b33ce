//! Pooja service catalog routes.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use serde_json::json;
use tracing::error;

use crate::{AppState, routes::error_response};
use devasthana_db::repositories::pooja_service::PoojaServiceRepository;
use devasthana_shared::AppError;

/// Creates the catalog routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/pooja-services", get(list_services))
}

/// GET `/pooja-services` - Active catalog in display order.
async fn list_services(State(state): State<AppState>) -> impl IntoResponse {
    let repo = PoojaServiceRepository::new((*state.db).clone());

    match repo.list_active().await {
        Ok(services) => {
            let services: Vec<_> = services
                .into_iter()
                .map(|s| {
                    json!({
                        "id": s.id,
                        "name": s.name,
                        "description": s.description,
                        "price": s.price,
                        "duration_minutes": s.duration_minutes
                    })
                })
                .collect();

            (StatusCode::OK, Json(json!({ "services": services }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list pooja services");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}
