//! Devasthana API Server
//!
//! Main entry point for the temple management backend.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use devasthana_api::{AppState, create_router};
use devasthana_core::certificate::CertificateClient;
use devasthana_core::notify::{NotificationDispatcher, WhatsAppClient};
use devasthana_core::payment::RazorpayClient;
use devasthana_db::connect;
use devasthana_shared::AppConfig;
use devasthana_shared::email::EmailService;
use devasthana_shared::jwt::AdminTokenService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devasthana=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Payment gateway client
    let razorpay = RazorpayClient::new(config.razorpay.clone())
        .context("Failed to build payment gateway client")?;
    info!(key_id = %config.razorpay.key_id, "Payment gateway configured");

    // Certificate renderer client
    let certificates = CertificateClient::new(config.certificate.clone())
        .context("Failed to build certificate client")?;
    info!(renderer = %config.certificate.base_url, "Certificate renderer configured");

    // Notification dispatcher (WhatsApp + email, best-effort)
    let whatsapp = WhatsAppClient::new(config.whatsapp.clone())
        .context("Failed to build WhatsApp client")?;
    let email = EmailService::new(config.email.clone(), config.temple.clone());
    let notifier = NotificationDispatcher::new(whatsapp, email, config.temple.clone());
    info!(
        test_mode = config.whatsapp.test_mode,
        "Notification dispatcher configured"
    );

    // Admin session tokens
    let admin_tokens = AdminTokenService::new(
        &config.admin.jwt_secret,
        config.admin.session_expiry_minutes,
    );

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        razorpay: Arc::new(razorpay),
        razorpay_config: Arc::new(config.razorpay.clone()),
        certificates: Arc::new(certificates),
        notifier: Arc::new(notifier),
        admin_tokens: Arc::new(admin_tokens),
        admin_config: Arc::new(config.admin.clone()),
        temple: Arc::new(config.temple.clone()),
        public_url: config.server.public_url.clone(),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
