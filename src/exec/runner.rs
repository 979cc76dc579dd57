// src/exec/runner.rs

//! Single-step process runner.

use std::process::{ExitStatus, Stdio};
use std::time::Instant;

use tokio::process::Command;
use tracing::{debug, error, info};

use crate::engine::{
    orchestrator, EnvMap, EnvSnapshot, RunOptions, StepResult, Task, TaskResult, TaskStep,
};
use crate::exec::backend::{StepExecutor, StepFuture};
use crate::exec::capture::{capture_for, OutputCapture};
use crate::types::CaptureMode;

/// Exit code reported when the step process could not be started at all
/// (shell missing, working directory missing, permission denied).
pub const LAUNCH_FAILURE_CODE: i32 = 127;

/// Exit code reported when the OS gives neither an exit code nor a signal.
pub const UNKNOWN_EXIT_CODE: i32 = -1;

/// Runs [`TaskStep`]s as shell commands.
///
/// The capture strategy and the ambient environment snapshot are fixed at
/// construction; every call to [`CommandRunner::execute`] spawns exactly one
/// child process.
#[derive(Debug)]
pub struct CommandRunner {
    capture: Box<dyn OutputCapture>,
    ambient: EnvSnapshot,
}

impl CommandRunner {
    /// Runner for `mode` over a snapshot of the current process environment.
    pub fn new(mode: CaptureMode) -> Self {
        Self::with_capture(capture_for(mode), EnvSnapshot::capture())
    }

    pub fn streaming() -> Self {
        Self::new(CaptureMode::Streaming)
    }

    pub fn buffered() -> Self {
        Self::new(CaptureMode::Buffered)
    }

    pub fn with_capture(capture: Box<dyn OutputCapture>, ambient: EnvSnapshot) -> Self {
        Self { capture, ambient }
    }

    /// Replace the ambient environment snapshot.
    pub fn with_ambient(mut self, ambient: EnvSnapshot) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn capture_mode(&self) -> CaptureMode {
        self.capture.mode()
    }

    pub fn ambient(&self) -> &EnvSnapshot {
        &self.ambient
    }

    /// Execute one step and wait for it to exit with its output drained.
    ///
    /// Never fails: launch errors become [`LAUNCH_FAILURE_CODE`] with the
    /// error text as output.
    pub async fn execute(&self, step: &TaskStep, base_env: &EnvMap) -> StepResult {
        let env = self.ambient.compose(base_env, step.env());

        let mut cmd = shell_command(step.command());
        cmd.env_clear()
            .envs(&env)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = step.workdir() {
            cmd.current_dir(dir);
        }

        info!(
            command = %step.command(),
            workdir = ?step.workdir(),
            capture = %self.capture.mode(),
            "starting step process"
        );

        let start = Instant::now();
        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(err) => {
                error!(command = %step.command(), error = %err, "failed to launch step process");
                let location = step
                    .workdir()
                    .map(|dir| format!(" in {}", dir.display()))
                    .unwrap_or_default();
                return StepResult {
                    step: step.clone(),
                    returncode: LAUNCH_FAILURE_CODE,
                    output: format!(
                        "atlas-ops: failed to launch `{}`{location}: {err}\n",
                        step.command()
                    ),
                    duration: start.elapsed(),
                };
            }
        };

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let (captured, status) = tokio::join!(self.capture.collect(stdout, stderr), child.wait());
        let duration = start.elapsed();

        if let Some(err) = &captured.error {
            error!(command = %step.command(), error = %err, "failed to capture step output");
        }
        let mut output = captured.into_output();

        let returncode = match status {
            Ok(status) => exit_code(status),
            Err(err) => {
                error!(command = %step.command(), error = %err, "failed waiting for step process");
                output.push_str(&format!("atlas-ops: failed waiting for process: {err}\n"));
                UNKNOWN_EXIT_CODE
            }
        };

        info!(
            command = %step.command(),
            returncode,
            duration_ms = duration.as_millis() as u64,
            "step process exited"
        );

        StepResult {
            step: step.clone(),
            returncode,
            output,
            duration,
        }
    }

    pub async fn run_task(&self, task: &Task, options: &RunOptions) -> TaskResult {
        orchestrator::run_task(self, task, options).await
    }

    pub async fn run_tasks(&self, tasks: &[Task], options: &RunOptions) -> Vec<TaskResult> {
        orchestrator::run_tasks(self, tasks, options).await
    }
}

impl StepExecutor for CommandRunner {
    fn run_step<'a>(&'a self, step: &'a TaskStep, base_env: &'a EnvMap) -> StepFuture<'a> {
        Box::pin(self.execute(step, base_env))
    }
}

/// Build a shell command appropriate for the platform.
fn shell_command(script: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(script);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(script);
        c
    }
}

/// Map an exit status to a single integer code.
///
/// A process killed by signal `N` reports `128 + N`, the same value a shell
/// would show in `$?`.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            debug!(signal, "step process terminated by signal");
            return 128 + signal;
        }
    }

    UNKNOWN_EXIT_CODE
}
