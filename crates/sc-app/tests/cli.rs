mod common;

use std::process::Command;
use sc_app::cli;
use common::{FakePipeline, generator};

#[tokio::test]
async fn malformed_json_fails_at_input_parsing() {
    // a load attempt would surface as model_generation
    let outcome = cli::run("{name: cat", || async {
        Err(anyhow::anyhow!("model loaded for unparsable input"))
    })
    .await;

    assert!(!outcome.success);
    assert_eq!(outcome.body["success"], false);
    assert_eq!(outcome.body["stage"], "input_parsing");
    assert!(outcome.body["error"].as_str().unwrap().starts_with("Invalid JSON input"));
}

#[tokio::test]
async fn pipeline_failure_is_model_generation() {
    let dir = tempfile::tempdir().unwrap();
    let uploads = dir.path().to_path_buf();
    let outcome = cli::run(r#"{"name":"cat"}"#, || async move {
        Ok(generator(FakePipeline::Broken, &uploads))
    })
    .await;

    assert!(!outcome.success);
    assert_eq!(outcome.body["stage"], "model_generation");
}

#[tokio::test]
async fn missing_name_generates_an_object() {
    let dir = tempfile::tempdir().unwrap();
    let uploads = dir.path().to_path_buf();
    let outcome = cli::run(r#"{"concept":"mammals"}"#, || async move {
        Ok(generator(FakePipeline::Tetrahedron, &uploads))
    })
    .await;

    assert!(outcome.success, "{}", outcome.body);
    assert_eq!(outcome.body["prompt"], "an object");
    assert_eq!(outcome.body["concept"], "mammals");
    assert!(outcome.body["filename"].as_str().unwrap().starts_with("shap_e_object_"));
}

#[tokio::test]
async fn uncoercible_difficulty_is_not_an_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let uploads = dir.path().to_path_buf();
    let outcome = cli::run(r#"{"name":"cat","difficulty":"hard"}"#, || async move {
        Ok(generator(FakePipeline::Tetrahedron, &uploads))
    })
    .await;

    assert!(outcome.success, "{}", outcome.body);
    assert_eq!(outcome.body["prompt"], "a cat");
    assert!(outcome.body["difficulty"].is_null());
}

#[tokio::test]
async fn non_object_json_fails_at_input_parsing() {
    let outcome = cli::run("[1, 2, 3]", || async {
        Err(anyhow::anyhow!("model loaded for a non-object document"))
    })
    .await;

    assert!(!outcome.success);
    assert_eq!(outcome.body["stage"], "input_parsing");
}

#[tokio::test]
async fn load_failure_is_model_generation() {
    let outcome = cli::run(r#"{"name":"cat"}"#, || async {
        Err(anyhow::anyhow!("runtime unreachable"))
    })
    .await;

    assert!(!outcome.success);
    assert_eq!(outcome.body["stage"], "model_generation");
    assert_eq!(outcome.body["error"], "runtime unreachable");
}

#[tokio::test]
async fn success_prints_record() {
    let dir = tempfile::tempdir().unwrap();
    let uploads = dir.path().to_path_buf();
    let outcome = cli::run(r#"{"name":"cat"}"#, || async move {
        Ok(generator(FakePipeline::Tetrahedron, &uploads))
    })
    .await;

    assert!(outcome.success);
    assert_eq!(outcome.body["prompt"], "a cat");
    assert!(outcome.body["fileSize"].as_u64().unwrap() > 0);
}

#[test]
fn binary_rejects_malformed_json() {
    let output = Command::new(env!("CARGO_BIN_EXE_shape-generate"))
        .arg("not json")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["stage"], "input_parsing");
}

#[test]
fn binary_reports_unreachable_runtime() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_shape-generate"))
        .arg(r#"{"name":"cat"}"#)
        .env("SHAPE_RUNTIME_URL", "http://127.0.0.1:9")
        .env("SHAPE_UPLOADS_DIR", dir.path())
        .env("SHAPE_DEVICE", "auto")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["stage"], "model_generation");
}
