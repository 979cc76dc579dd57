// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! A failing child command is *not* an error: it is reported through
//! [`crate::engine::StepResult::returncode`]. The variants here cover
//! configuration problems and programmer errors such as constructing a
//! step without a command.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Configuration file not found: {0}")]
    ConfigNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid task definition: {0}")]
    InvalidTask(String),

    #[error("Unknown task(s): {}. Available: {}", .missing.join(", "), .available.join(", "))]
    UnknownTasks {
        missing: Vec<String>,
        available: Vec<String>,
    },

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AtlasError>;
