// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::types::CaptureMode;

/// Command-line arguments for `atlas-ops`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "atlas-ops",
    version,
    about = "Run named, multi-step shell tasks from a declarative file.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `ATLAS_OPS_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Write a starter automation configuration file.
    Init {
        /// Where to write the template configuration.
        #[arg(long, value_name = "PATH", default_value = "atlas_ops.yml")]
        path: PathBuf,

        /// Overwrite an existing file if present.
        #[arg(long)]
        force: bool,
    },

    /// Print the installed version.
    Version,

    /// Inspect configuration.
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Work with configured tasks.
    #[command(subcommand)]
    Tasks(TasksCommand),

    /// Validate local tooling requirements.
    #[command(subcommand)]
    Env(EnvCommand),
}

/// `--config` shared by every subcommand that reads the configuration.
#[derive(Debug, Clone, Args)]
pub struct ConfigArg {
    /// Path to the atlas_ops.yml file.
    ///
    /// Default: discovered by walking up from the current directory.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommand {
    /// Show the resolved automation configuration path.
    Path,

    /// Validate the automation configuration and exit non-zero on errors.
    Validate(ConfigArg),
}

#[derive(Debug, Clone, Subcommand)]
pub enum TasksCommand {
    /// List available tasks from the automation configuration.
    List(ConfigArg),

    /// Run one or more tasks from the automation configuration.
    Run(RunArgs),
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Task names to run in order.
    #[arg(required = true, value_name = "NAME")]
    pub names: Vec<String>,

    #[command(flatten)]
    pub config: ConfigArg,

    /// Keep going after a failing step, and run every listed task even
    /// after one fails.
    #[arg(long)]
    pub no_stop_on_error: bool,

    /// Output handling: `streaming` echoes output live, `buffered` captures
    /// it and prints failing output afterwards.
    ///
    /// If omitted, the config's `capture` key or `streaming` is used.
    #[arg(long, value_name = "MODE")]
    pub capture: Option<CaptureMode>,
}

impl RunArgs {
    pub fn stop_on_error(&self) -> bool {
        !self.no_stop_on_error
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum EnvCommand {
    /// Run every requirement check and exit with the number of failures.
    Check(ConfigArg),

    /// Print sample tasks to copy into your automation configuration.
    Example,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
