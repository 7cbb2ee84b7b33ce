//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for donations, bookings, certificates, and admin
//! - Admin session middleware
//! - Response types

pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use devasthana_core::certificate::CertificateClient;
use devasthana_core::notify::NotificationDispatcher;
use devasthana_core::payment::RazorpayClient;
use devasthana_shared::config::{AdminConfig, RazorpayConfig, TempleConfig};
use devasthana_shared::jwt::AdminTokenService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Payment gateway client.
    pub razorpay: Arc<RazorpayClient>,
    /// Gateway configuration (the signature secret lives here).
    pub razorpay_config: Arc<RazorpayConfig>,
    /// Certificate renderer client.
    pub certificates: Arc<CertificateClient>,
    /// Notification dispatcher for committed transitions.
    pub notifier: Arc<NotificationDispatcher>,
    /// Admin session token service.
    pub admin_tokens: Arc<AdminTokenService>,
    /// Admin credential configuration.
    pub admin_config: Arc<AdminConfig>,
    /// Temple identity for certificates and messages.
    pub temple: Arc<TempleConfig>,
    /// Public base URL for building download links.
    pub public_url: String,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
