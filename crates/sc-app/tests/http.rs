mod common;

use std::sync::Arc;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;
use sc_app::backend::{GenState, router};
use common::{FakePipeline, generator};

fn post_generate(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn generate_returns_obj_record() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(Arc::new(GenState::new(generator(FakePipeline::Tetrahedron, dir.path()))));

    let response = app
        .oneshot(post_generate(r#"{"name":"elephant","concept":"mammals","difficulty":3}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let record = json_body(response).await;
    assert_eq!(record["success"], true);
    assert_eq!(record["format"], "obj");
    assert_eq!(record["prompt"], "an elephant");
    assert_eq!(record["concept"], "mammals");
    assert_eq!(record["difficulty"], 3);
    assert_eq!(record["modelProvider"], "OpenAI Shap-E");

    let filename = record["filename"].as_str().unwrap();
    assert!(filename.starts_with("shap_e_elephant_"));
    assert!(filename.ends_with(".obj"));
    assert_eq!(record["modelUrl"], format!("/api/3d-models/{filename}"));

    let on_disk = std::fs::metadata(dir.path().join(filename)).unwrap().len();
    assert!(on_disk > 0);
    assert_eq!(record["fileSize"], on_disk);

    // primary export succeeded, so no fallback file
    let entries = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[tokio::test]
async fn pipeline_failure_is_a_500_with_detail() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(Arc::new(GenState::new(generator(FakePipeline::Broken, dir.path()))));

    let response = app.oneshot(post_generate(r#"{"name":"cat"}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response).await;
    assert!(body["detail"].as_str().unwrap().contains("CUDA out of memory"));
}

#[tokio::test]
async fn missing_name_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(Arc::new(GenState::new(generator(FakePipeline::Tetrahedron, dir.path()))));

    let response = app
        .oneshot(post_generate(r#"{"description":"a cat"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn json_syntax_error_is_a_400() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(Arc::new(GenState::new(generator(FakePipeline::Tetrahedron, dir.path()))));

    let response = app.oneshot(post_generate(r#"{"name": "cat""#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_content_type_is_a_415() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(Arc::new(GenState::new(generator(FakePipeline::Tetrahedron, dir.path()))));

    let request = Request::builder()
        .method("POST")
        .uri("/generate")
        .body(Body::from(r#"{"name":"cat"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn health_reports_model_and_uploads() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(Arc::new(GenState::new(generator(FakePipeline::Tetrahedron, dir.path()))));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model"], "openai/shap-e");
    assert_eq!(body["device"], "cpu");
    assert_eq!(body["precision"], "float32");
    assert_eq!(body["uploadsDir"]["exists"], true);
}
