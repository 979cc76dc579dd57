#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use atlas_ops::config::{AtlasConfig, RawAtlasConfig, RawStep, RawTask, Requirement, Scalar};
use atlas_ops::engine::{Task, TaskStep};

/// Build a validated [`Task`] from plain command strings.
///
/// Panics on invalid input, which is what a test wants.
pub fn task(name: &str, commands: &[&str]) -> Task {
    let steps = commands
        .iter()
        .map(|cmd| TaskStep::new(*cmd).expect("valid step command"))
        .collect();
    Task::new(name, format!("{name} task"), steps).expect("valid task")
}

/// Builder for [`Task`] when steps need a workdir or env.
pub struct TaskBuilder {
    name: String,
    description: String,
    steps: Vec<TaskStep>,
}

impl TaskBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            steps: Vec::new(),
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn step(mut self, command: &str) -> Self {
        self.steps
            .push(TaskStep::new(command).expect("valid step command"));
        self
    }

    pub fn step_with(mut self, step: TaskStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn build(self) -> Task {
        Task::new(self.name, self.description, self.steps).expect("valid task")
    }
}

/// Builder for `RawAtlasConfig` to simplify config validation tests.
pub struct ConfigBuilder {
    config: RawAtlasConfig,
}

impl ConfigBuilder {
    pub fn new(project: &str) -> Self {
        Self {
            config: RawAtlasConfig {
                project: Some(Scalar::String(project.to_string())),
                ..RawAtlasConfig::default()
            },
        }
    }

    pub fn environment(mut self, environment: &str) -> Self {
        self.config.environment = environment.to_string();
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.config
            .env
            .insert(key.to_string(), Scalar::String(value.to_string()));
        self
    }

    pub fn requirement(mut self, name: &str, check: &str) -> Self {
        self.config.requirements.push(Requirement {
            name: name.to_string(),
            check: check.to_string(),
            description: None,
        });
        self
    }

    pub fn with_task(mut self, name: &str, task: RawTask) -> Self {
        self.config.tasks.insert(name.to_string(), task);
        self
    }

    pub fn raw(self) -> RawAtlasConfig {
        self.config
    }

    pub fn build(self) -> AtlasConfig {
        AtlasConfig::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

/// Builder for [`RawTask`].
#[derive(Default)]
pub struct RawTaskBuilder {
    task: RawTask,
}

impl RawTaskBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: &str) -> Self {
        self.task.description = Some(description.to_string());
        self
    }

    pub fn run(mut self, command: &str) -> Self {
        self.task.steps.push(RawStep {
            run: Some(command.to_string()),
            workdir: None,
            env: BTreeMap::new(),
        });
        self
    }

    pub fn run_in(mut self, command: &str, workdir: &str) -> Self {
        self.task.steps.push(RawStep {
            run: Some(command.to_string()),
            workdir: Some(PathBuf::from(workdir)),
            env: BTreeMap::new(),
        });
        self
    }

    pub fn raw_step(mut self, step: RawStep) -> Self {
        self.task.steps.push(step);
        self
    }

    pub fn build(self) -> RawTask {
        self.task
    }
}
