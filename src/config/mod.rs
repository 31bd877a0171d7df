use std::env;
use std::str::FromStr;
use std::time::Duration;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

const DEFAULT_PORT: u16 = 5550;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";
const DEFAULT_PAYSTACK_BASE_URL: &str = "https://api.paystack.co";

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    /// Base URL of the identity service that re-issues user tokens.
    pub auth_url: String,
    pub paystack_secret_key: String,
    pub paystack_base_url: String,
    pub frontend_url: String,
    pub invite_base_url: String,
    /// `None` falls back to logging mail instead of sending it.
    pub smtp: Option<SmtpConfig>,
    pub mail_from: String,
    pub operator_email: String,
    pub http_timeout: Duration,
    pub cors_allowed_origins: Vec<String>,
    /// Enables HSTS; set by `RUST_ENV=production`.
    pub production: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let frontend_url = url_var("FRONTEND_URL", "http://localhost:3000");

        Self {
            database_url: var_or("DATABASE_URL", "postgres://localhost/eventnest"),
            port: parsed_var("PORT", DEFAULT_PORT),
            db_max_connections: parsed_var("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
            auth_url: url_var("AUTH_URL", "http://localhost:4000"),
            paystack_secret_key: var_or("PAYSTACK_SECRET_KEY", ""),
            paystack_base_url: url_var("PAYSTACK_BASE_URL", DEFAULT_PAYSTACK_BASE_URL),
            invite_base_url: url_var("INVITE_BASE_URL", &frontend_url),
            frontend_url,
            smtp: smtp_from_env(),
            mail_from: var_or("MAIL_FROM", "EventNest <no-reply@eventnest.local>"),
            operator_email: var_or("OPERATOR_EMAIL", "operations@eventnest.local"),
            http_timeout: Duration::from_secs(parsed_var(
                "HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )),
            cors_allowed_origins: var_or("CORS_ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS)
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            production: env::var("RUST_ENV")
                .map(|v| v.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
        }
    }
}

fn smtp_from_env() -> Option<SmtpConfig> {
    let host = env::var("SMTP_HOST").ok().filter(|h| !h.trim().is_empty())?;

    Some(SmtpConfig {
        host,
        port: parsed_var("SMTP_PORT", 587),
        username: var_or("SMTP_USERNAME", ""),
        password: var_or("SMTP_PASSWORD", ""),
    })
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Like [`var_or`], without a trailing slash so paths can be appended.
fn url_var(key: &str, default: &str) -> String {
    var_or(key, default).trim_end_matches('/').to_string()
}

fn parsed_var<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Config: invalid value for {}, using default", key);
            default
        }),
        Err(_) => default,
    }
}
