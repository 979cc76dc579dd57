// src/exec/backend.rs

//! Pluggable step executor abstraction.
//!
//! The orchestrator talks to a `StepExecutor` instead of spawning processes
//! itself. Production code uses [`super::CommandRunner`]; tests can provide
//! an executor that returns scripted results without touching the OS.

use std::future::Future;
use std::pin::Pin;

use crate::engine::{EnvMap, StepResult, TaskStep};

/// Boxed future returned by [`StepExecutor::run_step`].
pub type StepFuture<'a> = Pin<Box<dyn Future<Output = StepResult> + Send + 'a>>;

/// Executes exactly one step and reports its outcome.
///
/// Implementations must not fail: a step that cannot be started or exits
/// non-zero is reported through [`StepResult::returncode`].
pub trait StepExecutor: Send + Sync {
    fn run_step<'a>(&'a self, step: &'a TaskStep, base_env: &'a EnvMap) -> StepFuture<'a>;
}
