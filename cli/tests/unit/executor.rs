//! Executor tests: step order, failure handling and task file lifetime.

#![allow(clippy::expect_used)]

use tokio_util::sync::CancellationToken;

use newrelic_cli::application::services::execute::Executor;
use newrelic_cli::domain::{ExecutionError, VariableBindings};
use newrelic_cli::infra::task_engine::TempTaskfiles;

use crate::mocks::{RecordingEngine, recipe};

const THREE_STEPS: &str = r#"
name: three-steps
install:
  - name: A
    cmds: ["echo a"]
  - name: B
    cmds: ["echo {{.GREETING}}"]
  - name: C
    cmds: ["echo c"]
"#;

fn bindings() -> VariableBindings {
    let mut b = VariableBindings::new();
    b.insert("GREETING", "hello");
    b
}

#[tokio::test]
async fn test_steps_run_in_declared_order() {
    let engine = RecordingEngine::default();
    let executor = Executor {
        writer: &TempTaskfiles,
        engine: &engine,
    };

    executor
        .execute(&recipe(THREE_STEPS), &bindings(), &CancellationToken::new())
        .await
        .expect("all steps succeed");

    assert_eq!(engine.tasks(), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_failing_step_stops_later_steps() {
    let engine = RecordingEngine::failing(&["B"]);
    let executor = Executor {
        writer: &TempTaskfiles,
        engine: &engine,
    };

    let err = executor
        .execute(&recipe(THREE_STEPS), &bindings(), &CancellationToken::new())
        .await
        .expect_err("step B fails");

    assert!(matches!(err, ExecutionError::Step { ref step, .. } if step == "B"));
    assert_eq!(engine.tasks(), vec!["A", "B"], "C must never run");
}

#[tokio::test]
async fn test_all_steps_share_one_rendered_taskfile() {
    let engine = RecordingEngine::default();
    let executor = Executor {
        writer: &TempTaskfiles,
        engine: &engine,
    };

    executor
        .execute(&recipe(THREE_STEPS), &bindings(), &CancellationToken::new())
        .await
        .expect("success");

    let runs = engine.runs();
    assert!(runs.iter().all(|r| r.file_existed));
    assert!(runs.iter().all(|r| r.taskfile == runs[0].taskfile));
    let contents = &runs[0].contents;
    assert!(contents.contains("echo hello"), "placeholder substituted: {contents}");
    assert!(contents.contains("GREETING: hello"), "vars section: {contents}");
}

#[tokio::test]
async fn test_taskfile_removed_after_success() {
    let engine = RecordingEngine::default();
    let executor = Executor {
        writer: &TempTaskfiles,
        engine: &engine,
    };

    executor
        .execute(&recipe(THREE_STEPS), &bindings(), &CancellationToken::new())
        .await
        .expect("success");

    let path = &engine.runs()[0].taskfile;
    assert!(!path.exists(), "{} still exists", path.display());
}

#[tokio::test]
async fn test_taskfile_removed_after_failure() {
    let engine = RecordingEngine::failing(&["A"]);
    let executor = Executor {
        writer: &TempTaskfiles,
        engine: &engine,
    };

    executor
        .execute(&recipe(THREE_STEPS), &bindings(), &CancellationToken::new())
        .await
        .expect_err("step A fails");

    let path = &engine.runs()[0].taskfile;
    assert!(!path.exists(), "{} still exists", path.display());
}

#[tokio::test]
async fn test_cancellation_mid_recipe_stops_remaining_steps() {
    let engine = RecordingEngine::cancelling_at("B");
    let executor = Executor {
        writer: &TempTaskfiles,
        engine: &engine,
    };
    let cancel = CancellationToken::new();

    let err = executor
        .execute(&recipe(THREE_STEPS), &bindings(), &cancel)
        .await
        .expect_err("cancelled");

    assert!(matches!(err, ExecutionError::Cancelled { ref step } if step == "B"));
    assert!(cancel.is_cancelled());
    assert_eq!(engine.tasks(), vec!["A", "B"]);
    assert!(!engine.runs()[0].taskfile.exists());
}
