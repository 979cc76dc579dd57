// tests/model_invariants.rs

use std::path::Path;
use std::time::Duration;

use atlas_ops::engine::{StepResult, StepStatus, Task, TaskResult, TaskRunState, TaskStep};
use atlas_ops::errors::AtlasError;
use atlas_ops::types::CaptureMode;

#[test]
fn empty_command_fails_loudly() {
    assert!(matches!(TaskStep::new(""), Err(AtlasError::InvalidTask(_))));
    assert!(matches!(TaskStep::new("  \t"), Err(AtlasError::InvalidTask(_))));
}

#[test]
fn task_without_steps_fails_loudly() {
    match Task::new("empty", "nothing here", Vec::new()) {
        Err(AtlasError::InvalidTask(msg)) => assert!(msg.contains("'empty'")),
        other => panic!("Expected InvalidTask, got: {:?}", other),
    }
}

#[test]
fn step_builders_set_workdir_and_env() {
    let step = TaskStep::new("make")
        .unwrap()
        .with_workdir("/srv")
        .with_env("A", "1")
        .with_envs([("B", "2"), ("A", "3")]);

    assert_eq!(step.command(), "make");
    assert_eq!(step.workdir(), Some(Path::new("/srv")));
    assert_eq!(step.env().get("A").map(String::as_str), Some("3"));
    assert_eq!(step.env().get("B").map(String::as_str), Some("2"));
}

#[test]
fn step_result_status_follows_returncode() {
    let step = TaskStep::new("true").unwrap();
    let mut result = StepResult {
        step,
        returncode: 0,
        output: String::new(),
        duration: Duration::from_millis(1500),
    };

    assert!(result.ok());
    assert_eq!(result.status(), StepStatus::Succeeded);
    assert!((result.duration_secs() - 1.5).abs() < f64::EPSILON);

    result.returncode = -1;
    assert!(!result.ok());
    assert_eq!(result.status(), StepStatus::Failed(-1));
}

#[test]
fn task_result_with_no_steps_run_is_vacuously_ok() {
    let task = Task::new("t", "", vec![TaskStep::new("true").unwrap()]).unwrap();
    let result = TaskResult {
        task,
        steps: Vec::new(),
    };

    assert!(result.ok());
    assert_eq!(result.state(), TaskRunState::StoppedOnFailure);
    assert_eq!(result.statuses(), vec![StepStatus::Skipped]);
    assert_eq!(result.total_duration(), Duration::ZERO);
}

#[test]
fn capture_mode_parses_from_cli_strings() {
    assert_eq!("streaming".parse::<CaptureMode>(), Ok(CaptureMode::Streaming));
    assert_eq!(" Buffered ".parse::<CaptureMode>(), Ok(CaptureMode::Buffered));
    assert!("loud".parse::<CaptureMode>().is_err());
    assert_eq!(CaptureMode::default(), CaptureMode::Streaming);
    assert_eq!(CaptureMode::Buffered.to_string(), "buffered");
}
