//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.

use std::env;
use std::str::FromStr;
use std::sync::{OnceLock, RwLock};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub version: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    pub reset_token_expiry_minutes: u64,
    pub institution_email_domain: String,
    pub strict_status_transitions: bool,
    pub db_checkout_warn_ms: u64,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub email_from_name: String,
    pub frontend_url: String,
    pub recaptcha_secret_key: String,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.into())
}

/// Reads and parses `key`, falling back to `default` when unset or malformed.
fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring malformed value for {key}: {raw:?}");
            default
        }),
        Err(_) => default,
    }
}

fn flag(key: &str) -> bool {
    matches!(
        env::var(key).map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Ok("true") | Ok("1") | Ok("yes")
    )
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Missing values fall back to development defaults. `JWT_SECRET` is left
    /// empty when unset; the server refuses to start without it.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: var_or("APP_ENV", "development"),
            project_name: var_or("PROJECT_NAME", "helpdesk"),
            version: var_or("APP_VERSION", env!("CARGO_PKG_VERSION")),
            log_level: var_or("LOG_LEVEL", "api=info,services=info"),
            log_file: var_or("LOG_FILE", "api.log"),
            log_to_stdout: flag("LOG_TO_STDOUT"),
            database_path: var_or("DATABASE_PATH", "data/helpdesk.db"),
            host: var_or("HOST", "127.0.0.1"),
            port: parsed_or("PORT", 3000),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_default(),
            jwt_duration_minutes: parsed_or("JWT_DURATION_MINUTES", 1440),
            reset_token_expiry_minutes: parsed_or("RESET_TOKEN_EXPIRY_MINUTES", 60),
            institution_email_domain: var_or("INSTITUTION_EMAIL_DOMAIN", "unison.mx"),
            strict_status_transitions: flag("STRICT_STATUS_TRANSITIONS"),
            db_checkout_warn_ms: parsed_or("DB_CHECKOUT_WARN_MS", 5000),
            smtp_host: env::var("SMTP_HOST").unwrap_or_default(),
            smtp_port: parsed_or("SMTP_PORT", 587),
            smtp_username: env::var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            email_from_name: var_or("EMAIL_FROM_NAME", "Soporte TI"),
            frontend_url: var_or("FRONTEND_URL", "http://localhost:5173"),
            recaptcha_secret_key: env::var("RECAPTCHA_SECRET_KEY").unwrap_or_default(),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock cannot be acquired.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Returns `true` when running with `APP_ENV=production`.
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock
                .write()
                .expect("Failed to acquire AppConfig write lock");
            *guard = AppConfig::from_env();
        }
    }

    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_project_name(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.project_name = value.into());
    }

    pub fn set_version(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.version = value.into());
    }

    pub fn set_log_level(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_level = value.into());
    }

    pub fn set_log_to_stdout(value: bool) {
        AppConfig::set_field(|cfg| cfg.log_to_stdout = value);
    }

    pub fn set_database_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_path = value.into());
    }

    pub fn set_host(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.host = value.into());
    }

    pub fn set_port(value: u16) {
        AppConfig::set_field(|cfg| cfg.port = value);
    }

    pub fn set_jwt_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.jwt_secret = value.into());
    }

    pub fn set_jwt_duration_minutes(value: impl Into<u64>) {
        AppConfig::set_field(|cfg| cfg.jwt_duration_minutes = value.into());
    }

    pub fn set_reset_token_expiry_minutes(value: impl Into<u64>) {
        AppConfig::set_field(|cfg| cfg.reset_token_expiry_minutes = value.into());
    }

    pub fn set_institution_email_domain(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.institution_email_domain = value.into());
    }

    pub fn set_strict_status_transitions(value: bool) {
        AppConfig::set_field(|cfg| cfg.strict_status_transitions = value);
    }

    pub fn set_db_checkout_warn_ms(value: impl Into<u64>) {
        AppConfig::set_field(|cfg| cfg.db_checkout_warn_ms = value.into());
    }

    pub fn set_smtp_host(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.smtp_host = value.into());
    }

    pub fn set_frontend_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.frontend_url = value.into());
    }

    pub fn set_email_from_name(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.email_from_name = value.into());
    }

    pub fn set_recaptcha_secret_key(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.recaptcha_secret_key = value.into());
    }
}
