use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use atlas_ops::engine::{ComposedEnv, EnvMap, EnvSnapshot, StepResult, TaskStep};
use atlas_ops::exec::{StepExecutor, StepFuture};

/// A step as seen by [`FakeExecutor`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub command: String,
    /// Environment the step would have run with, composed over an empty
    /// ambient snapshot.
    pub env: ComposedEnv,
}

/// A fake executor that:
/// - records which step commands were "run", in order
/// - reports exit code 0 unless a code was scripted for the command
/// - echoes the command back as the step output.
#[derive(Debug, Clone, Default)]
pub struct FakeExecutor {
    exit_codes: HashMap<String, i32>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every step whose command is `command` exit with `code`.
    pub fn exit_with(mut self, command: &str, code: i32) -> Self {
        self.exit_codes.insert(command.to_string(), code);
        self
    }

    pub fn executed(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|call| call.command.clone())
            .collect()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl StepExecutor for FakeExecutor {
    fn run_step<'a>(&'a self, step: &'a TaskStep, base_env: &'a EnvMap) -> StepFuture<'a> {
        Box::pin(async move {
            let env = EnvSnapshot::empty().compose(base_env, step.env());
            self.calls.lock().unwrap().push(RecordedCall {
                command: step.command().to_string(),
                env,
            });

            let returncode = self.exit_codes.get(step.command()).copied().unwrap_or(0);
            StepResult {
                step: step.clone(),
                returncode,
                output: format!("{}\n", step.command()),
                duration: Duration::from_millis(1),
            }
        })
    }
}
