// src/config/model.rs

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

use crate::engine::{EnvMap, Task};
use crate::types::CaptureMode;

/// Top-level configuration exactly as deserialized from disk.
///
/// ```yaml
/// project: atlas-core
/// environment: dev
/// env:
///   RUST_LOG: info
/// requirements:
///   - name: git
///     check: git --version
/// tasks:
///   lint:
///     description: Run static analysis
///     steps:
///       - run: cargo clippy
///         workdir: crates/core
///         env: { CLIPPY_CONF_DIR: "." }
/// ```
///
/// Nothing here is validated yet; see [`AtlasConfig`] for the checked form.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAtlasConfig {
    #[serde(default)]
    pub project: Option<Scalar>,

    #[serde(default = "default_environment")]
    pub environment: String,

    /// Default capture mode for `tasks run` when no `--capture` is given.
    #[serde(default)]
    pub capture: Option<CaptureMode>,

    /// Environment applied beneath every step's own `env`.
    #[serde(default)]
    pub env: BTreeMap<String, Scalar>,

    #[serde(default)]
    pub requirements: Vec<Requirement>,

    /// All tasks from `tasks.<name>`.
    #[serde(default)]
    pub tasks: BTreeMap<String, RawTask>,
}

fn default_environment() -> String {
    "local".to_string()
}

impl Default for RawAtlasConfig {
    fn default() -> Self {
        Self {
            project: None,
            environment: default_environment(),
            capture: None,
            env: BTreeMap::new(),
            requirements: Vec::new(),
            tasks: BTreeMap::new(),
        }
    }
}

/// `tasks.<name>` entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTask {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub steps: Vec<RawStep>,
}

/// One entry of `tasks.<name>.steps`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStep {
    /// Shell command; optional here so that a missing `run` becomes a
    /// readable validation error instead of a parse error.
    #[serde(default)]
    pub run: Option<String>,

    #[serde(default)]
    pub workdir: Option<PathBuf>,

    #[serde(default)]
    pub env: BTreeMap<String, Scalar>,
}

/// A prerequisite check for the local environment (`env check`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Requirement {
    pub name: String,
    pub check: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Scalar config value that is used as a string.
///
/// Lets `PORT: 8080` or `DEBUG: true` be written without quotes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => f.write_str(s),
            Scalar::Integer(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Validated configuration, ready to hand tasks to the engine.
#[derive(Debug, Clone)]
pub struct AtlasConfig {
    pub project: String,
    pub environment: String,
    pub capture: Option<CaptureMode>,
    pub env: EnvMap,
    pub requirements: Vec<Requirement>,
    pub tasks: BTreeMap<String, Task>,
    /// File this configuration was loaded from, if any.
    pub source_path: Option<PathBuf>,
}

impl AtlasConfig {
    pub fn task(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(String::as_str)
    }

    /// Resolve task names in the order given.
    ///
    /// Fails with [`AtlasError::UnknownTasks`](crate::errors::AtlasError::UnknownTasks)
    /// listing every unknown name and every available one.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> crate::errors::Result<Vec<Task>> {
        let missing: Vec<String> = names
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| !self.tasks.contains_key(*name))
            .map(str::to_string)
            .collect();

        if !missing.is_empty() {
            return Err(crate::errors::AtlasError::UnknownTasks {
                missing,
                available: self.task_names().map(str::to_string).collect(),
            });
        }

        Ok(names
            .iter()
            .filter_map(|name| self.tasks.get(name.as_ref()).cloned())
            .collect())
    }
}
