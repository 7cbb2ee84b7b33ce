//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Payment gateway configuration.
    pub razorpay: RazorpayConfig,
    /// Admin authentication configuration.
    pub admin: AdminConfig,
    /// Temple identity used in receipts and notifications.
    pub temple: TempleConfig,
    /// WhatsApp (Twilio) delivery configuration.
    pub whatsapp: WhatsAppConfig,
    /// Email delivery configuration.
    pub email: EmailConfig,
    /// Certificate renderer configuration.
    pub certificate: CertificateConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public base URL used when building download links.
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_public_url() -> String {
    "http://localhost:8080".to_string()
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Razorpay payment gateway configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayConfig {
    /// API key id (public, shared with the checkout client).
    pub key_id: String,
    /// API key secret used for order creation and signature verification.
    pub key_secret: String,
    /// Gateway API base URL.
    #[serde(default = "default_razorpay_url")]
    pub api_url: String,
    /// Settlement currency.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Request timeout in seconds for gateway calls.
    #[serde(default = "default_gateway_timeout")]
    pub timeout_secs: u64,
}

fn default_razorpay_url() -> String {
    "https://api.razorpay.com/v1".to_string()
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_gateway_timeout() -> u64 {
    15
}

/// Admin authentication configuration.
///
/// Admin access is a single shared credential verified server-side; a
/// signed session token is issued at login and required on every admin
/// request.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Argon2 hash of the admin password.
    pub password_hash: String,
    /// Secret key for signing admin session tokens.
    pub jwt_secret: String,
    /// Session token expiry in minutes.
    #[serde(default = "default_session_expiry")]
    pub session_expiry_minutes: i64,
}

fn default_session_expiry() -> i64 {
    60
}

/// Temple identity fields rendered into receipts and messages.
#[derive(Debug, Clone, Deserialize)]
pub struct TempleConfig {
    /// Temple display name.
    pub name: String,
    /// Subtitle printed under the name (e.g. the registered trust).
    #[serde(default)]
    pub subtitle: String,
    /// Public contact phone printed in messages.
    pub contact_phone: String,
    /// Admin phone receiving WhatsApp alerts.
    pub admin_phone: String,
    /// Admin email receiving alert mails.
    pub admin_email: String,
}

/// WhatsApp delivery configuration (Twilio).
#[derive(Debug, Clone, Deserialize)]
pub struct WhatsAppConfig {
    /// Twilio account SID.
    pub account_sid: String,
    /// Twilio auth token.
    pub auth_token: String,
    /// Sender number in E.164 form.
    pub from_number: String,
    /// Twilio API base URL.
    #[serde(default = "default_twilio_url")]
    pub api_url: String,
    /// When true, messages are logged instead of sent.
    #[serde(default)]
    pub test_mode: bool,
    /// Request timeout in seconds.
    #[serde(default = "default_gateway_timeout")]
    pub timeout_secs: u64,
}

fn default_twilio_url() -> String {
    "https://api.twilio.com/2010-04-01".to_string()
}

/// Email delivery configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// SMTP relay host.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    /// SMTP port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP username.
    #[serde(default)]
    pub smtp_username: String,
    /// SMTP password.
    #[serde(default)]
    pub smtp_password: String,
    /// From address on outgoing mail.
    #[serde(default = "default_from_email")]
    pub from_email: String,
    /// Display name on outgoing mail.
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    1025
}

fn default_from_email() -> String {
    "noreply@temple.org".to_string()
}

fn default_from_name() -> String {
    "Devasthana".to_string()
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: default_from_email(),
            from_name: default_from_name(),
        }
    }
}

/// Certificate renderer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CertificateConfig {
    /// Base URL of the external certificate renderer.
    #[serde(default = "default_certificate_url")]
    pub base_url: String,
    /// Request timeout in seconds. A hung renderer must not stall
    /// requests indefinitely.
    #[serde(default = "default_certificate_timeout")]
    pub timeout_secs: u64,
}

fn default_certificate_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_certificate_timeout() -> u64 {
    5
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("DEVASTHANA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
