use std::env;

/// AppConfig
///
/// Holds the application's entire configuration state. This struct is designed to be
/// immutable once loaded, ensuring consistency across all threads and services.
/// It is pulled into the application state via FromRef, embodying the "immutable AppConfig"
/// part of the Unified State Pattern.
#[derive(Clone)]
pub struct AppConfig {
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // Lifetime of the userRole/userName session cookies, in seconds.
    pub cookie_max_age_secs: i64,
    // Runtime environment marker. Controls the log output format.
    pub env: Env,
}

/// Env
///
/// Defines the runtime context, used to switch between development conveniences
/// (pretty logs) and production-grade infrastructure (structured JSON logs).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

/// One week, matching the max-age the portal's login flow stamps on both cookies.
pub const DEFAULT_COOKIE_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;

impl Default for AppConfig {
    /// default
    ///
    /// Provides a safe, non-panicking AppConfig instance primarily used for test setup.
    /// This allows us to instantiate the configuration without needing to set environment
    /// variables for lightweight unit or integration testing state scaffolding.
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            cookie_max_age_secs: DEFAULT_COOKIE_MAX_AGE_SECS,
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// The canonical function for initializing the application configuration at startup.
    /// It reads all parameters from environment variables and implements the **fail-fast**
    /// principle.
    ///
    /// # Panics
    /// Panics if an environment variable is present but malformed (e.g. a non-numeric
    /// cookie max-age). This prevents the application from starting with a broken
    /// session lifetime.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let cookie_max_age_secs = match env::var("SESSION_COOKIE_MAX_AGE") {
            Ok(raw) => raw
                .parse::<i64>()
                .expect("FATAL: SESSION_COOKIE_MAX_AGE must be an integer number of seconds"),
            Err(_) => DEFAULT_COOKIE_MAX_AGE_SECS,
        };

        Self {
            bind_addr,
            cookie_max_age_secs,
            env,
        }
    }
}
