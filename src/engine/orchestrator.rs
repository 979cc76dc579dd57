// src/engine/orchestrator.rs

//! Sequential task orchestration.
//!
//! Steps within a task and tasks within a list are awaited strictly one at
//! a time. Stop-on-error is enforced here between steps of a single task;
//! whether a failed task should prevent later tasks is left to the caller,
//! so [`run_tasks`] always attempts every task it is given.

use tracing::{debug, info};

use crate::engine::model::{EnvMap, StepResult, Task, TaskResult};
use crate::exec::StepExecutor;

/// Knobs shared by [`run_task`] and [`run_tasks`].
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Abandon the remaining steps of a task after its first failing step.
    pub stop_on_error: bool,
    /// Environment layered between the ambient environment and step overrides.
    pub base_env: EnvMap,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            stop_on_error: true,
            base_env: EnvMap::new(),
        }
    }
}

impl RunOptions {
    pub fn stop_on_error(mut self, stop_on_error: bool) -> Self {
        self.stop_on_error = stop_on_error;
        self
    }

    pub fn base_env(mut self, base_env: EnvMap) -> Self {
        self.base_env = base_env;
        self
    }
}

/// Run every step of `task` in order through `executor`.
///
/// With `stop_on_error`, the first failing step ends the task and the
/// remaining steps are absent from the returned `steps`.
pub async fn run_task<E>(executor: &E, task: &Task, options: &RunOptions) -> TaskResult
where
    E: StepExecutor + ?Sized,
{
    info!(
        task = %task.name(),
        steps = task.steps().len(),
        stop_on_error = options.stop_on_error,
        "running task"
    );

    let mut results: Vec<StepResult> = Vec::with_capacity(task.steps().len());

    for (index, step) in task.steps().iter().enumerate() {
        let result = executor.run_step(step, &options.base_env).await;
        let ok = result.ok();
        let returncode = result.returncode;
        results.push(result);

        if !ok {
            info!(
                task = %task.name(),
                step = index + 1,
                returncode,
                "step failed"
            );
            if options.stop_on_error {
                debug!(
                    task = %task.name(),
                    abandoned = task.steps().len() - (index + 1),
                    "stop_on_error set; abandoning remaining steps"
                );
                break;
            }
        }
    }

    let result = TaskResult {
        task: task.clone(),
        steps: results,
    };

    info!(
        task = %task.name(),
        ok = result.ok(),
        state = ?result.state(),
        "task finished"
    );

    result
}

/// Run `tasks` in order, returning one result per task.
///
/// A failed task never stops the list; callers inspect [`TaskResult::ok`]
/// and decide what to do with the rest.
pub async fn run_tasks<E>(executor: &E, tasks: &[Task], options: &RunOptions) -> Vec<TaskResult>
where
    E: StepExecutor + ?Sized,
{
    let mut results = Vec::with_capacity(tasks.len());
    for task in tasks {
        results.push(run_task(executor, task, options).await);
    }
    results
}
