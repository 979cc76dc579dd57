// src/report.rs

//! Console rendering of task results.
//!
//! Renderers return strings so the CLI decides where they go and tests can
//! assert on them directly.

use std::fmt::Write as _;

use crate::engine::{StepStatus, Task, TaskResult};

const OK_MARK: &str = "✅";
const FAIL_MARK: &str = "❌";
const SKIP_MARK: &str = "⏭";

/// Rendering switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Print the captured output of failed steps (useful in buffered mode,
    /// where nothing was shown live).
    pub show_failed_output: bool,
}

/// Render one task result: a header line plus one line per declared step.
pub fn render_task_result(result: &TaskResult, opts: RenderOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Task '{}':", result.task.name());

    for (index, (step, status)) in result
        .task
        .steps()
        .iter()
        .zip(result.statuses())
        .enumerate()
    {
        let location = step
            .workdir()
            .map(|dir| format!(" (cwd: {})", dir.display()))
            .unwrap_or_default();
        let mark = match status {
            StepStatus::Succeeded => OK_MARK,
            StepStatus::Failed(_) => FAIL_MARK,
            StepStatus::Skipped => SKIP_MARK,
        };

        let _ = write!(out, "  {mark} Step {}: {}{location}", index + 1, step.command());

        match (status, result.steps.get(index)) {
            (StepStatus::Skipped, _) => {
                let _ = writeln!(out, " (skipped)");
            }
            (StepStatus::Failed(code), Some(ran)) => {
                let _ = writeln!(out, " [{:.2}s]", ran.duration_secs());
                let _ = writeln!(out, "     ↳ exited with code {code}");
                if opts.show_failed_output && !ran.output.trim().is_empty() {
                    for line in ran.output.lines() {
                        let _ = writeln!(out, "       | {line}");
                    }
                }
            }
            (_, Some(ran)) => {
                let _ = writeln!(out, " [{:.2}s]", ran.duration_secs());
            }
            (_, None) => {
                let _ = writeln!(out);
            }
        }
    }

    out
}

/// Render the closing summary.
///
/// `not_run` lists tasks the caller chose not to start after a failure.
pub fn render_summary(results: &[TaskResult], not_run: &[Task]) -> String {
    let mut out = String::new();

    if !not_run.is_empty() {
        let names: Vec<&str> = not_run.iter().map(Task::name).collect();
        let _ = writeln!(out, "Not run after failure: {}", names.join(", "));
    }

    let failures = results.iter().filter(|r| !r.ok()).count();
    if failures > 0 {
        let _ = writeln!(out, "{failures} task(s) failed");
    } else if not_run.is_empty() {
        let _ = writeln!(out, "All tasks completed successfully.");
    }

    out
}

/// Process exit status for a run: 0 when every task is ok, 1 otherwise.
pub fn exit_status(results: &[TaskResult]) -> i32 {
    if results.iter().all(TaskResult::ok) { 0 } else { 1 }
}
