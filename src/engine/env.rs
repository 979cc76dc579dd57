// src/engine/env.rs

//! Ambient environment snapshot and per-step composition.
//!
//! The process environment is read once into an [`EnvSnapshot`] and never
//! touched again. Each step gets a freshly composed map with precedence,
//! lowest to highest:
//!
//! 1. the snapshot,
//! 2. `base_env`,
//! 3. the step's own `env`.
//!
//! A key set at a higher level replaces the lower value entirely.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};

use crate::engine::model::EnvMap;

/// Fully composed environment handed to a child process.
pub type ComposedEnv = BTreeMap<OsString, OsString>;

/// Immutable copy of a process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<OsString, OsString>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars_os().collect(),
        }
    }

    /// A snapshot with no variables at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.vars.get(key.as_ref()).map(OsString::as_os_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Layer `base_env` and then `step_env` over this snapshot.
    pub fn compose(&self, base_env: &EnvMap, step_env: &EnvMap) -> ComposedEnv {
        let mut env = self.vars.clone();
        for (key, value) in base_env.iter().chain(step_env.iter()) {
            env.insert(OsString::from(key), OsString::from(value));
        }
        env
    }
}
