// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod report;
pub mod types;

use std::io::{self, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::cli::{CliArgs, Command, ConfigCommand, EnvCommand, RunArgs, TasksCommand};
use crate::config::templates::{CONFIG_TEMPLATE, TASKS_HELP};
use crate::config::{find_default_config, load_config, AtlasConfig};
use crate::engine::{RunOptions, TaskResult, TaskStep};
use crate::errors::Result;
use crate::exec::{CommandRunner, StepExecutor};
use crate::fs::{FileSystem, RealFileSystem};
use crate::report::{exit_status, render_summary, render_task_result, RenderOptions};
use crate::types::CaptureMode;

/// High-level entry point used by `main.rs`.
///
/// Returns the process exit status the command asks for; configuration
/// and I/O problems come back as errors.
pub async fn run(args: CliArgs) -> Result<i32> {
    match args.command {
        Command::Init { path, force } => init_config(&RealFileSystem, &path, force),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
        Command::Config(ConfigCommand::Path) => {
            println!("{}", find_default_config(None)?.display());
            Ok(0)
        }
        Command::Config(ConfigCommand::Validate(arg)) => {
            load_config(arg.config.as_deref())?;
            println!("Configuration looks good ✅");
            Ok(0)
        }
        Command::Tasks(TasksCommand::List(arg)) => {
            let cfg = load_config(arg.config.as_deref())?;
            print!("{}", list_tasks(&cfg));
            Ok(0)
        }
        Command::Tasks(TasksCommand::Run(run_args)) => run_selected_tasks(&run_args).await,
        Command::Env(EnvCommand::Check(arg)) => {
            let cfg = load_config(arg.config.as_deref())?;
            check_requirements(&CommandRunner::streaming(), &cfg, &mut io::stdout()).await
        }
        Command::Env(EnvCommand::Example) => {
            println!("{}", TASKS_HELP.trim());
            Ok(0)
        }
    }
}

/// Write the starter configuration, refusing to clobber without `force`.
pub fn init_config(fs: &dyn FileSystem, path: &Path, force: bool) -> Result<i32> {
    if fs.exists(path) && !force {
        println!(
            "Configuration already exists at {}. Use --force to overwrite.",
            path.display()
        );
        return Ok(1);
    }

    let contents = format!("{}\n", CONFIG_TEMPLATE.trim());
    fs.write(path, contents.as_bytes())?;
    println!("Created template configuration at {}", path.display());
    Ok(0)
}

/// Task listing as printed by `tasks list`.
pub fn list_tasks(cfg: &AtlasConfig) -> String {
    let mut out = format!(
        "Tasks for project '{}' ({}):\n",
        cfg.project, cfg.environment
    );
    for (name, task) in cfg.tasks.iter() {
        let count = task.steps().len();
        let description = if task.description().is_empty() {
            "no description"
        } else {
            task.description()
        };
        out.push_str(&format!(
            "- {name}: {description} ({count} step{})\n",
            if count == 1 { "" } else { "s" }
        ));
    }
    out
}

/// `tasks run`: resolve the capture mode, then run the selected tasks with a
/// [`CommandRunner`] and print the report to stdout.
async fn run_selected_tasks(args: &RunArgs) -> Result<i32> {
    let cfg = load_config(args.config.config.as_deref())?;

    let mode = args.capture.or(cfg.capture).unwrap_or_default();
    let render = RenderOptions {
        show_failed_output: mode == CaptureMode::Buffered,
    };
    let runner = CommandRunner::new(mode);

    info!(
        tasks = ?args.names,
        capture = %mode,
        stop_on_error = args.stop_on_error(),
        "running selected tasks"
    );

    run_tasks_report(
        &runner,
        &cfg,
        args.names.as_slice(),
        args.stop_on_error(),
        render,
        &mut io::stdout(),
    )
    .await
}

/// Run the named tasks of `cfg` through `executor`, writing the per-task
/// report and the summary to `out` as each task finishes.
///
/// With `stop_on_error` no further task is started after the first failed
/// one and the rest are listed as not run; otherwise every task runs through
/// [`engine::run_tasks`]. Returns the exit status for the run.
pub async fn run_tasks_report<E, W>(
    executor: &E,
    cfg: &AtlasConfig,
    names: &[String],
    stop_on_error: bool,
    render: RenderOptions,
    out: &mut W,
) -> Result<i32>
where
    E: StepExecutor + ?Sized,
    W: Write,
{
    let selected = cfg.select(names)?;
    let options = RunOptions::default()
        .stop_on_error(stop_on_error)
        .base_env(cfg.env.clone());

    writeln!(
        out,
        "Running {} task(s) defined for {} ({})...\n",
        selected.len(),
        cfg.project,
        cfg.environment
    )?;
    out.flush()?;

    let mut results: Vec<TaskResult> = Vec::with_capacity(selected.len());
    let mut not_run = Vec::new();

    if stop_on_error {
        let mut remaining = selected.into_iter();
        while let Some(task) = remaining.next() {
            let result = engine::run_task(executor, &task, &options).await;
            write!(out, "{}", render_task_result(&result, render))?;
            out.flush()?;
            let failed = !result.ok();
            results.push(result);
            if failed {
                not_run.extend(remaining.by_ref());
                debug!(skipped = not_run.len(), "stopping after failed task");
                break;
            }
        }
    } else {
        results = engine::run_tasks(executor, &selected, &options).await;
        for result in &results {
            write!(out, "{}", render_task_result(result, render))?;
        }
    }

    writeln!(out)?;
    write!(out, "{}", render_summary(&results, &not_run))?;
    out.flush()?;
    Ok(exit_status(&results))
}

/// `env check`: run each requirement's check command through `executor`.
///
/// Returns the number of failed requirements (capped at 255) as the exit
/// status.
pub async fn check_requirements<E, W>(executor: &E, cfg: &AtlasConfig, out: &mut W) -> Result<i32>
where
    E: StepExecutor + ?Sized,
    W: Write,
{
    if cfg.requirements.is_empty() {
        writeln!(out, "No tooling requirements defined; skipping checks.")?;
        return Ok(0);
    }

    let mut failures: i32 = 0;

    for requirement in &cfg.requirements {
        writeln!(out, "Checking {}...", requirement.name)?;
        out.flush()?;
        let step = match TaskStep::new(requirement.check.as_str()) {
            Ok(step) => step,
            Err(err) => {
                failures += 1;
                writeln!(out, "❌ {}: {err}", requirement.name)?;
                continue;
            }
        };

        let result = executor.run_step(&step, &cfg.env).await;
        if result.ok() {
            writeln!(out, "✅ {} is available", requirement.name)?;
        } else {
            failures += 1;
            writeln!(
                out,
                "❌ {} failed with exit code {}",
                requirement.name, result.returncode
            )?;
        }
    }

    if failures > 0 {
        writeln!(
            out,
            "\n{failures} requirement(s) failed. Please address them before continuing."
        )?;
    } else {
        writeln!(out, "\nAll requirements satisfied.")?;
    }
    out.flush()?;
    Ok(failures.min(255))
}
