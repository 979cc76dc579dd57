// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running step commands, using
//! `tokio::process::Command`, and turning each process into a
//! [`StepResult`](crate::engine::StepResult).
//!
//! - [`backend`] provides the `StepExecutor` trait the orchestrator drives,
//!   which tests can replace with a fake implementation.
//! - [`capture`] holds the streaming and buffered output strategies.
//! - [`runner`] is the production `CommandRunner`.

pub mod backend;
pub mod capture;
pub mod runner;

pub use backend::{StepExecutor, StepFuture};
pub use capture::{
    capture_for, echo_captured, read_captured, BufferCapture, Captured, OutputCapture,
    StreamCapture,
};
pub use runner::{CommandRunner, LAUNCH_FAILURE_CODE, UNKNOWN_EXIT_CODE};

use crate::engine::{RunOptions, Task, TaskResult};
use crate::types::CaptureMode;

/// Run `tasks` sequentially with a fresh [`CommandRunner`] for `mode`.
pub async fn run_tasks(tasks: &[Task], mode: CaptureMode, options: &RunOptions) -> Vec<TaskResult> {
    CommandRunner::new(mode).run_tasks(tasks, options).await
}
