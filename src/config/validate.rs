// src/config/validate.rs

use std::collections::BTreeMap;

use crate::config::model::{AtlasConfig, RawAtlasConfig, RawStep, RawTask, Requirement, Scalar};
use crate::engine::{EnvMap, Task, TaskStep};
use crate::errors::{AtlasError, Result};

impl TryFrom<RawAtlasConfig> for AtlasConfig {
    type Error = AtlasError;

    fn try_from(raw: RawAtlasConfig) -> std::result::Result<Self, Self::Error> {
        let project = validate_project(&raw)?;
        ensure_has_tasks(&raw)?;
        validate_requirements(&raw.requirements)?;
        let env = convert_env(&raw.env, "top-level 'env'")?;

        let mut tasks = BTreeMap::new();
        for (name, raw_task) in raw.tasks.iter() {
            tasks.insert(name.clone(), build_task(name, raw_task)?);
        }

        Ok(AtlasConfig {
            project,
            environment: raw.environment,
            capture: raw.capture,
            env,
            requirements: raw.requirements,
            tasks,
            source_path: None,
        })
    }
}

fn validate_project(cfg: &RawAtlasConfig) -> Result<String> {
    let Some(project) = cfg.project.as_ref() else {
        return Err(AtlasError::ConfigError(
            "Configuration requires a top-level 'project' key".to_string(),
        ));
    };

    let project = project.to_string();
    if project.trim().is_empty() {
        return Err(AtlasError::ConfigError(
            "Configuration requires a 'project' name".to_string(),
        ));
    }
    Ok(project)
}

fn ensure_has_tasks(cfg: &RawAtlasConfig) -> Result<()> {
    if cfg.tasks.is_empty() {
        return Err(AtlasError::ConfigError(
            "Configuration must define at least one task under 'tasks'".to_string(),
        ));
    }
    Ok(())
}

fn validate_requirements(requirements: &[Requirement]) -> Result<()> {
    for requirement in requirements {
        if requirement.name.trim().is_empty() || requirement.check.trim().is_empty() {
            return Err(AtlasError::ConfigError(
                "Requirement entries must include 'name' and 'check'".to_string(),
            ));
        }
    }
    Ok(())
}

fn build_task(name: &str, raw: &RawTask) -> Result<Task> {
    if raw.steps.is_empty() {
        return Err(AtlasError::ConfigError(format!(
            "Task '{name}' must define at least one step"
        )));
    }

    let steps = raw
        .steps
        .iter()
        .enumerate()
        .map(|(index, step)| build_step(name, index + 1, step))
        .collect::<Result<Vec<_>>>()?;

    let description = raw.description.as_deref().unwrap_or("").trim();
    Task::new(name, description, steps)
}

fn build_step(task: &str, index: usize, raw: &RawStep) -> Result<TaskStep> {
    let command = match raw.run.as_deref() {
        Some(run) if !run.trim().is_empty() => run,
        _ => {
            return Err(AtlasError::ConfigError(format!(
                "Task '{task}' step {index} is missing a 'run' command"
            )));
        }
    };

    let env = convert_env(&raw.env, &format!("task '{task}' step {index}"))?;
    let mut step = TaskStep::new(command)?.with_envs(env);
    if let Some(dir) = raw.workdir.as_ref().filter(|d| !d.as_os_str().is_empty()) {
        step = step.with_workdir(dir.clone());
    }
    Ok(step)
}

fn convert_env(raw: &BTreeMap<String, Scalar>, context: &str) -> Result<EnvMap> {
    raw.iter()
        .map(|(key, value)| {
            if key.is_empty() || key.contains('=') || key.contains('\0') {
                return Err(AtlasError::ConfigError(format!(
                    "{context} has an invalid environment variable name '{key}'"
                )));
            }
            Ok((key.clone(), value.to_string()))
        })
        .collect()
}
