// src/logging.rs

//! Logging setup for `atlas-ops` using `tracing` + `tracing-subscriber`.
//!
//! The level comes from `--log-level`, then `ATLAS_OPS_LOG` (any name
//! `tracing::Level` parses, e.g. "info", "DEBUG"), then `warn`. Logs go
//! to STDERR so that stdout carries only task output and rendered results.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Environment variable consulted when no `--log-level` is given.
pub const LOG_ENV_VAR: &str = "ATLAS_OPS_LOG";

const DEFAULT_LEVEL: Level = Level::WARN;

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_value = std::env::var(LOG_ENV_VAR).ok();
    let level = resolve_level(cli_level, env_value.as_deref());

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("initialising logging: {err}"))?;

    Ok(())
}

/// Pick the effective level; unparsable environment values are ignored.
pub fn resolve_level(cli_level: Option<LogLevel>, env_value: Option<&str>) -> Level {
    cli_level
        .map(Level::from)
        .or_else(|| env_value.and_then(|value| value.trim().parse().ok()))
        .unwrap_or(DEFAULT_LEVEL)
}
