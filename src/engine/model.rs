// src/engine/model.rs

//! Value types exchanged between the orchestrator, the runner and callers.
//!
//! `TaskStep` and `Task` are validated on construction and read-only
//! afterwards. `StepResult` and `TaskResult` are plain data produced by a
//! single run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::{AtlasError, Result};

/// Environment overrides keyed by variable name.
pub type EnvMap = BTreeMap<String, String>;

/// One shell command plus its working directory and environment overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStep {
    command: String,
    workdir: Option<PathBuf>,
    env: EnvMap,
}

impl TaskStep {
    /// Create a step running `command` through the system shell.
    ///
    /// Fails with [`AtlasError::InvalidTask`] if the command is empty.
    pub fn new(command: impl Into<String>) -> Result<Self> {
        let command = command.into();
        if command.trim().is_empty() {
            return Err(AtlasError::InvalidTask(
                "step command must not be empty".to_string(),
            ));
        }
        Ok(Self {
            command,
            workdir: None,
            env: EnvMap::new(),
        })
    }

    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(workdir.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn workdir(&self) -> Option<&Path> {
        self.workdir.as_deref()
    }

    pub fn env(&self) -> &EnvMap {
        &self.env
    }
}

/// A named, ordered list of steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    name: String,
    description: String,
    steps: Vec<TaskStep>,
}

impl Task {
    /// Fails with [`AtlasError::InvalidTask`] if `steps` is empty.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        steps: Vec<TaskStep>,
    ) -> Result<Self> {
        let name = name.into();
        if steps.is_empty() {
            return Err(AtlasError::InvalidTask(format!(
                "Task '{name}' must define at least one step"
            )));
        }
        Ok(Self {
            name,
            description: description.into(),
            steps,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn steps(&self) -> &[TaskStep] {
        &self.steps
    }
}

/// Per-step status over the full declared step list of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Succeeded,
    Failed(i32),
    /// Never executed because an earlier step failed under stop-on-error.
    Skipped,
}

/// Outcome of executing one [`TaskStep`].
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub step: TaskStep,
    pub returncode: i32,
    pub output: String,
    pub duration: Duration,
}

impl StepResult {
    pub fn ok(&self) -> bool {
        self.returncode == 0
    }

    pub fn status(&self) -> StepStatus {
        if self.ok() {
            StepStatus::Succeeded
        } else {
            StepStatus::Failed(self.returncode)
        }
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration.as_secs_f64()
    }
}

/// Terminal state of a single task run, as seen from which steps ran.
///
/// This says nothing about success: combine it with [`TaskResult::ok`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskRunState {
    /// Every declared step ran. Some may have failed, either with
    /// stop-on-error off or when the failing step was the last one, where
    /// there was nothing left to abandon.
    Completed,
    /// A step failed and at least one later step was abandoned.
    StoppedOnFailure,
}

/// Outcome of executing one [`Task`].
///
/// `steps` only holds results for steps that actually ran, so it is a strict
/// prefix of `task.steps()` when execution stopped early. Use
/// [`TaskResult::statuses`] for a view covering every declared step.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskResult {
    pub task: Task,
    pub steps: Vec<StepResult>,
}

impl TaskResult {
    /// True when no executed step failed (vacuously true for no steps).
    pub fn ok(&self) -> bool {
        self.steps.iter().all(StepResult::ok)
    }

    /// `StoppedOnFailure` exactly when declared steps were left unexecuted.
    pub fn state(&self) -> TaskRunState {
        if self.steps.len() < self.task.steps().len() {
            TaskRunState::StoppedOnFailure
        } else {
            TaskRunState::Completed
        }
    }

    pub fn stopped_early(&self) -> bool {
        self.state() == TaskRunState::StoppedOnFailure
    }

    /// Declared steps that never ran.
    pub fn skipped_steps(&self) -> &[TaskStep] {
        let executed = self.steps.len().min(self.task.steps().len());
        &self.task.steps()[executed..]
    }

    /// One status per declared step, `Skipped` for the unexecuted tail.
    pub fn statuses(&self) -> Vec<StepStatus> {
        self.steps
            .iter()
            .map(StepResult::status)
            .chain(self.skipped_steps().iter().map(|_| StepStatus::Skipped))
            .collect()
    }

    /// Index (0-based) and result of the first failing step, if any.
    pub fn first_failure(&self) -> Option<(usize, &StepResult)> {
        self.steps.iter().enumerate().find(|(_, s)| !s.ok())
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }
}
