use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Default training prefix: 52 weeks of daily rows.
pub const DEFAULT_TRAIN_ROWS: usize = 52 * 7;

/// Analysis run configuration.
///
/// All file paths come from here; nothing in the library crates reads the
/// environment or hardcodes a path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the daily `day,week,amount` CSV ledger.
    pub input: PathBuf,
    /// Path the result table is written to.
    pub output: PathBuf,
    /// Number of leading daily rows used to fit the baseline.
    pub train_rows: usize,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            input: PathBuf::from(env_or("DRIFTWATCH_INPUT", "dataset.csv")),
            output: PathBuf::from(env_or("DRIFTWATCH_OUTPUT", "results.csv")),
            train_rows: env_usize("DRIFTWATCH_TRAIN_ROWS", DEFAULT_TRAIN_ROWS),
        }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  input:      {}", self.input.display());
        tracing::info!("  output:     {}", self.output.display());
        tracing::info!("  train_rows: {}", self.train_rows);
    }

    /// Return a view safe for machine consumption.
    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "input": self.input,
            "output": self.output,
            "train_rows": self.train_rows,
        })
    }
}
