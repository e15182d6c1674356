// crates/server/src/logging.rs
//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Crates whose events follow the configured level. Everything else logs at warn.
const SERVICE_TARGETS: &[&str] = &[
    "bhoomi_ai",
    "bhoomi_ai_server",
    "bhoomi_ai_jobs",
    "bhoomi_ai_core",
    "tower_http",
];

/// Install the global fmt subscriber. `RUST_LOG` overrides `log_level`.
pub fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directives(log_level))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(())
}

fn default_directives(log_level: &str) -> String {
    let level = log_level.trim().to_lowercase();
    std::iter::once("warn".to_string())
        .chain(SERVICE_TARGETS.iter().map(|target| format!("{target}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}
