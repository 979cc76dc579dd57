// src/engine/mod.rs

//! Task execution engine.
//!
//! - [`model`] holds the step/task value types and their results.
//! - [`env`] captures the ambient environment and composes per-step maps.
//! - [`orchestrator`] drives tasks through a [`crate::exec::StepExecutor`].
//!
//! The engine never returns an error for a failing child command; failure
//! is data on [`StepResult`] and [`TaskResult`].

pub mod env;
pub mod model;
pub mod orchestrator;

pub use env::{ComposedEnv, EnvSnapshot};
pub use model::{EnvMap, StepResult, StepStatus, Task, TaskResult, TaskRunState, TaskStep};
pub use orchestrator::{run_task, run_tasks, RunOptions};
