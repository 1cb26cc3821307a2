//! Orchestrator tuning loaded from the environment.

use std::str::FromStr;
use std::time::Duration;

use fieldbook_core::search_window::{
    DEFAULT_SEARCH_WEEKS, DEFAULT_WINDOW_START_HOUR, MAX_SEARCH_WEEKS,
};

/// Default upper bound on a single scheduler RPC.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(20);

/// Tunable parameters for the booking workflows.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Upper bound on each scheduler RPC.
    pub rpc_timeout: Duration,
    /// Number of weekly windows searched before giving up, at most
    /// [`MAX_SEARCH_WEEKS`].
    pub search_weeks: u32,
    /// Wall-clock hour each search window boundary is pinned to.
    pub window_start_hour: u32,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
            search_weeks: DEFAULT_SEARCH_WEEKS,
            window_start_hour: DEFAULT_WINDOW_START_HOUR,
        }
    }
}

impl OrchestratorConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default | Allowed  |
    /// |-------------------------------|---------|----------|
    /// | `SCHEDULER_RPC_TIMEOUT_SECS`  | `20`    | `>= 1`   |
    /// | `SCHEDULER_SEARCH_WEEKS`      | `4`     | `1..=4`  |
    /// | `SCHEDULER_WINDOW_START_HOUR` | `1`     | `0..=23` |
    pub fn from_env() -> Result<Self, String> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let defaults = Self::default();

        let rpc_timeout_secs: u64 = parse_or(
            &var,
            "SCHEDULER_RPC_TIMEOUT_SECS",
            defaults.rpc_timeout.as_secs(),
        )?;
        let search_weeks: u32 = parse_or(&var, "SCHEDULER_SEARCH_WEEKS", defaults.search_weeks)?;
        let window_start_hour: u32 =
            parse_or(&var, "SCHEDULER_WINDOW_START_HOUR", defaults.window_start_hour)?;

        if rpc_timeout_secs == 0 {
            return Err("SCHEDULER_RPC_TIMEOUT_SECS must be at least 1".to_string());
        }
        if !(1..=MAX_SEARCH_WEEKS).contains(&search_weeks) {
            return Err(format!(
                "SCHEDULER_SEARCH_WEEKS must be between 1 and {MAX_SEARCH_WEEKS}, got {search_weeks}"
            ));
        }
        if window_start_hour > 23 {
            return Err(format!(
                "SCHEDULER_WINDOW_START_HOUR must be between 0 and 23, got {window_start_hour}"
            ));
        }

        Ok(Self {
            rpc_timeout: Duration::from_secs(rpc_timeout_secs),
            search_weeks,
            window_start_hour,
        })
    }

    /// Longest a slot search can spend waiting on the scheduler: open,
    /// select, create and close plus one availability check per window,
    /// each bounded by `rpc_timeout`.
    pub fn worst_case_scheduler_time(&self) -> Duration {
        let weeks = self.search_weeks.clamp(1, MAX_SEARCH_WEEKS);
        self.rpc_timeout * (weeks + 4)
    }
}

fn parse_or<T: FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, String> {
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
