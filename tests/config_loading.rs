// tests/config_loading.rs

mod common;
use crate::common::TestResult;

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{tempdir, NamedTempFile};

use atlas_ops::config::{
    find_default_config, find_default_config_with, load_and_validate, load_and_validate_with,
    parse_str, AtlasConfig, ConfigFormat,
};
use atlas_ops::errors::AtlasError;
use atlas_ops::fs::MockFileSystem;
use atlas_ops::types::CaptureMode;
use atlas_ops_test_utils::builders::{ConfigBuilder, RawTaskBuilder};

const SAMPLE_YAML: &str = r#"
project: atlas-core
environment: dev
capture: buffered
env:
  SHARED: base
  PORT: 8080
requirements:
  - name: git
    description: Ensure git CLI is present
    check: git --version
tasks:
  lint:
    description: "  Run static analysis  "
    steps:
      - run: make lint
  deploy:
    steps:
      - run: make build
        workdir: services/api
        env:
          DEBUG: true
          RATIO: 0.5
      - run: make deploy
"#;

fn write_temp(suffix: &str, contents: &str) -> std::io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile()?;
    write!(file, "{contents}")?;
    Ok(file)
}

fn config_error(result: atlas_ops::errors::Result<AtlasConfig>) -> String {
    match result {
        Err(AtlasError::ConfigError(msg)) => msg,
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn yaml_config_loads_into_engine_tasks() -> TestResult {
    let file = write_temp(".yml", SAMPLE_YAML)?;

    let cfg = load_and_validate(file.path())?;

    assert_eq!(cfg.project, "atlas-core");
    assert_eq!(cfg.environment, "dev");
    assert_eq!(cfg.capture, Some(CaptureMode::Buffered));
    assert_eq!(cfg.env.get("PORT").map(String::as_str), Some("8080"));
    assert_eq!(cfg.requirements.len(), 1);
    assert_eq!(cfg.requirements[0].check, "git --version");
    assert_eq!(cfg.source_path.as_deref(), Some(file.path()));

    let lint = cfg.task("lint").expect("lint task");
    assert_eq!(lint.description(), "Run static analysis");
    assert_eq!(lint.steps().len(), 1);

    let deploy = cfg.task("deploy").expect("deploy task");
    assert_eq!(deploy.description(), "");
    let build = &deploy.steps()[0];
    assert_eq!(build.command(), "make build");
    assert_eq!(build.workdir(), Some(Path::new("services/api")));
    assert_eq!(build.env().get("DEBUG").map(String::as_str), Some("true"));
    assert_eq!(build.env().get("RATIO").map(String::as_str), Some("0.5"));
    assert!(deploy.steps()[1].workdir().is_none());

    Ok(())
}

#[test]
fn toml_config_is_selected_by_extension() -> TestResult {
    let file = write_temp(
        ".toml",
        r#"
project = "atlas-core"

[tasks.test]
description = "Run tests"

[[tasks.test.steps]]
run = "cargo test"

[tasks.test.steps.env]
RUST_BACKTRACE = 1
"#,
    )?;

    let cfg = load_and_validate(file.path())?;

    assert_eq!(cfg.environment, "local");
    let test = cfg.task("test").expect("test task");
    assert_eq!(test.steps()[0].command(), "cargo test");
    assert_eq!(
        test.steps()[0].env().get("RUST_BACKTRACE").map(String::as_str),
        Some("1")
    );

    Ok(())
}

#[test]
fn format_detection_defaults_to_yaml() {
    assert_eq!(ConfigFormat::from_path(Path::new("atlas_ops.toml")), ConfigFormat::Toml);
    assert_eq!(ConfigFormat::from_path(Path::new("atlas_ops.TOML")), ConfigFormat::Toml);
    assert_eq!(ConfigFormat::from_path(Path::new("atlas_ops.yml")), ConfigFormat::Yaml);
    assert_eq!(ConfigFormat::from_path(Path::new("atlas_ops")), ConfigFormat::Yaml);
}

#[test]
fn missing_project_is_rejected() {
    let raw = parse_str("tasks:\n  a:\n    steps:\n      - run: echo a\n", ConfigFormat::Yaml)
        .expect("parses");

    let msg = config_error(AtlasConfig::try_from(raw));

    assert!(msg.contains("'project'"));
}

#[test]
fn empty_document_reports_missing_project() {
    let raw = parse_str("   \n", ConfigFormat::Yaml).expect("empty parses");

    let msg = config_error(AtlasConfig::try_from(raw));

    assert!(msg.contains("top-level 'project' key"));
}

#[test]
fn config_without_tasks_is_rejected() {
    let raw = ConfigBuilder::new("atlas").raw();

    let msg = config_error(AtlasConfig::try_from(raw));

    assert!(msg.contains("at least one task"));
}

#[test]
fn task_without_steps_is_rejected() {
    let raw = ConfigBuilder::new("atlas")
        .with_task("empty", RawTaskBuilder::new().build())
        .raw();

    let msg = config_error(AtlasConfig::try_from(raw));

    assert_eq!(msg, "Task 'empty' must define at least one step");
}

#[test]
fn step_without_run_is_rejected_with_its_index() {
    let raw = parse_str(
        r#"
project: atlas
tasks:
  build:
    steps:
      - run: make
      - workdir: /tmp
"#,
        ConfigFormat::Yaml,
    )
    .expect("parses");

    let msg = config_error(AtlasConfig::try_from(raw));

    assert_eq!(msg, "Task 'build' step 2 is missing a 'run' command");
}

#[test]
fn blank_run_is_rejected() {
    let raw = ConfigBuilder::new("atlas")
        .with_task("t", RawTaskBuilder::new().run("   ").build())
        .raw();

    let msg = config_error(AtlasConfig::try_from(raw));

    assert!(msg.contains("missing a 'run' command"));
}

#[test]
fn invalid_env_names_are_rejected() {
    let raw = ConfigBuilder::new("atlas")
        .env("BAD=NAME", "x")
        .with_task("t", RawTaskBuilder::new().run("true").build())
        .raw();

    let msg = config_error(AtlasConfig::try_from(raw));

    assert!(msg.contains("invalid environment variable name"));
}

#[test]
fn requirement_without_check_is_rejected() {
    let raw = ConfigBuilder::new("atlas")
        .requirement("git", " ")
        .with_task("t", RawTaskBuilder::new().run("true").build())
        .raw();

    let msg = config_error(AtlasConfig::try_from(raw));

    assert!(msg.contains("'name' and 'check'"));
}

#[test]
fn malformed_yaml_is_a_yaml_error() -> TestResult {
    let file = write_temp(".yml", "project: [unterminated\n")?;

    match load_and_validate(file.path()) {
        Err(AtlasError::YamlError(_)) => Ok(()),
        other => panic!("Expected YamlError, got: {:?}", other),
    }
}

#[test]
fn missing_file_is_not_found() {
    let result = load_and_validate("/definitely/not/here/atlas_ops.yml");

    assert!(matches!(result, Err(AtlasError::ConfigNotFound(_))));
}

#[test]
fn select_resolves_names_in_requested_order() -> TestResult {
    let cfg = ConfigBuilder::new("atlas")
        .with_task("a", RawTaskBuilder::new().run("echo a").build())
        .with_task("b", RawTaskBuilder::new().run("echo b").build())
        .build();

    let tasks = cfg.select(&["b", "a", "b"])?;

    let names: Vec<&str> = tasks.iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["b", "a", "b"]);

    Ok(())
}

#[test]
fn select_reports_unknown_and_available_tasks() {
    let cfg = ConfigBuilder::new("atlas")
        .with_task("lint", RawTaskBuilder::new().run("make lint").build())
        .build();

    match cfg.select(&["lint", "nope", "gone"]) {
        Err(AtlasError::UnknownTasks { missing, available }) => {
            assert_eq!(missing, vec!["nope", "gone"]);
            assert_eq!(available, vec!["lint"]);
        }
        other => panic!("Expected UnknownTasks, got: {:?}", other),
    }
}

#[test]
fn discovery_walks_up_parent_directories() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("/repo/atlas_ops.yml", SAMPLE_YAML);

    let found = find_default_config_with(&fs, Path::new("/repo/services/api"))?;
    assert_eq!(found, PathBuf::from("/repo/atlas_ops.yml"));

    let cfg = load_and_validate_with(&fs, &found)?;
    assert_eq!(cfg.project, "atlas-core");

    Ok(())
}

#[test]
fn discovery_prefers_the_nearest_directory() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("/repo/atlas_ops.yml", SAMPLE_YAML);
    fs.add_file("/repo/services/atlas_ops.toml", "project = \"svc\"");

    let found = find_default_config_with(&fs, Path::new("/repo/services/api"))?;

    assert_eq!(found, PathBuf::from("/repo/services/atlas_ops.toml"));

    Ok(())
}

#[test]
fn discovery_without_any_config_suggests_flag() {
    let fs = MockFileSystem::new();
    fs.add_file("/elsewhere/atlas_ops.yml", SAMPLE_YAML);

    match find_default_config_with(&fs, Path::new("/repo/sub")) {
        Err(AtlasError::ConfigNotFound(msg)) => assert!(msg.contains("--config")),
        other => panic!("Expected ConfigNotFound, got: {:?}", other),
    }
}

#[test]
fn discovery_on_real_filesystem_finds_parent_config() -> TestResult {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("atlas_ops.yml"), SAMPLE_YAML)?;
    let nested = dir.path().join("a").join("b");
    std::fs::create_dir_all(&nested)?;

    let found = find_default_config(Some(&nested))?;

    assert_eq!(found, dir.path().join("atlas_ops.yml"));

    Ok(())
}
