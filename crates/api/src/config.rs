use std::time::Duration;

use fieldbook_booking::OrchestratorConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `180`). Must exceed the
    /// worst case of a slot search, see [`ServerConfig::check_request_timeout`].
    pub request_timeout_secs: u64,
    /// Minutes east of UTC used to compute "tomorrow" for slot searches
    /// (default: `0`).
    pub utc_offset_minutes: i32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                    |
    /// |--------------------------------|----------------------------|
    /// | `HOST`                         | `0.0.0.0`                  |
    /// | `PORT`                         | `3000`                     |
    /// | `CORS_ORIGINS`                 | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`         | `180`                      |
    /// | `SCHEDULER_UTC_OFFSET_MINUTES` | `0`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "180".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let utc_offset_minutes: i32 = std::env::var("SCHEDULER_UTC_OFFSET_MINUTES")
            .unwrap_or_else(|_| "0".into())
            .parse()
            .expect("SCHEDULER_UTC_OFFSET_MINUTES must be a valid i32");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            utc_offset_minutes,
        }
    }

    /// Reject a request timeout that could fire while a slot search is still
    /// legitimately waiting on the scheduler.
    pub fn check_request_timeout(&self, orchestrator: &OrchestratorConfig) -> Result<(), String> {
        let request_timeout = Duration::from_secs(self.request_timeout_secs);
        let worst_case = orchestrator.worst_case_scheduler_time();
        if request_timeout <= worst_case {
            return Err(format!(
                "REQUEST_TIMEOUT_SECS ({}) must exceed the worst-case scheduler time of {}s",
                self.request_timeout_secs,
                worst_case.as_secs(),
            ));
        }
        Ok(())
    }
}
