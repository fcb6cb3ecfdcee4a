//! Drives `ShapERuntime` against an in-process stand-in for the inference runtime.

use std::time::Duration;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use sc_core::SamplingParams;
use sc_shape::{
    Device, DevicePreference, PipelineError, PipelineLoader, Precision, ShapERuntime, load_pipeline,
};
use tokio::net::TcpListener;

async fn spawn_runtime(cuda: bool, has_fp16_variant: bool) -> String {
    let app = Router::new()
        .route(
            "/device",
            get(move || async move { Json(json!({ "cuda_available": cuda })) }),
        )
        .route(
            "/pipelines",
            post(move |Json(body): Json<Value>| async move {
                if body.get("variant").is_some() && !has_fp16_variant {
                    return (StatusCode::NOT_FOUND, "no fp16 variant published").into_response();
                }
                let id = format!("{}-{}", body["device"].as_str().unwrap_or("?"), body["torch_dtype"].as_str().unwrap_or("?"));
                Json(json!({ "pipeline_id": id })).into_response()
            }),
        )
        .route(
            "/pipelines/{id}/generate",
            post(|Path(id): Path<String>, Json(body): Json<Value>| async move {
                if body["output_type"] != "mesh" || body["num_inference_steps"] != 64 {
                    return (StatusCode::BAD_REQUEST, "unexpected sampling parameters").into_response();
                }
                let prompt = body["prompt"].as_str().unwrap_or_default();
                if prompt.contains("explode") {
                    return (StatusCode::INTERNAL_SERVER_ERROR, format!("{id}: CUDA out of memory")).into_response();
                }
                if prompt.contains("garble") {
                    return Json(json!({ "verts": "not a list", "faces": [] })).into_response();
                }
                Json(json!({
                    "verts": [[0, 0, 0], [1, 0, 0], [0, 1, 0], [0, 0, 1]],
                    "faces": [[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
                    "vertex_channels": {
                        "R": [1, 0, 0, 1],
                        "G": [0, 1, 0, 1],
                        "B": [0, 0, 1, 1]
                    }
                }))
                .into_response()
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/")
}

fn runtime(url: &str) -> ShapERuntime {
    ShapERuntime::new(url, Duration::from_secs(10)).unwrap()
}

#[tokio::test]
async fn probes_cuda() {
    let url = spawn_runtime(true, true).await;
    assert!(runtime(&url).cuda_available().await.unwrap());
}

#[tokio::test]
async fn loads_and_generates_a_mesh() {
    let url = spawn_runtime(false, true).await;
    let runtime = runtime(&url);

    let pipeline = load_pipeline(&runtime, "openai/shap-e", DevicePreference::Auto)
        .await
        .unwrap();
    assert_eq!(pipeline.device(), Device::Cpu);
    assert_eq!(pipeline.precision(), Precision::Float32);

    let mesh = pipeline
        .generate("a tetrahedron", &SamplingParams::default())
        .await
        .unwrap();
    assert_eq!(mesh.vertices().len(), 4);
    assert_eq!(mesh.faces().len(), 4);
    assert!(mesh.colors().is_some());
}

#[tokio::test]
async fn falls_back_to_plain_fp16_when_variant_missing() {
    let url = spawn_runtime(true, false).await;
    let runtime = runtime(&url);

    let pipeline = load_pipeline(&runtime, "openai/shap-e", DevicePreference::Auto)
        .await
        .unwrap();
    assert_eq!(pipeline.device(), Device::Cuda);
    assert_eq!(pipeline.precision(), Precision::Float16);
}

#[tokio::test]
async fn runtime_errors_carry_status_and_body() {
    let url = spawn_runtime(false, true).await;
    let runtime = runtime(&url);
    let pipeline = load_pipeline(&runtime, "openai/shap-e", DevicePreference::Auto)
        .await
        .unwrap();

    let err = pipeline
        .generate("an explode", &SamplingParams::default())
        .await
        .unwrap_err();
    match err {
        PipelineError::Runtime { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("CUDA out of memory"));
        }
        other => panic!("expected runtime error, got {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_mesh_is_malformed_not_transport() {
    let url = spawn_runtime(false, true).await;
    let runtime = runtime(&url);
    let pipeline = load_pipeline(&runtime, "openai/shap-e", DevicePreference::Auto)
        .await
        .unwrap();

    let err = pipeline
        .generate("a garbled mesh", &SamplingParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::MalformedMesh(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_runtime_is_a_transport_error() {
    // nothing listens on the discard port
    let runtime = runtime("http://127.0.0.1:9");
    match load_pipeline(&runtime, "openai/shap-e", DevicePreference::Auto).await {
        Err(PipelineError::Transport(_)) => {}
        Err(other) => panic!("expected transport error, got {other:?}"),
        Ok(_) => panic!("loaded a pipeline from a closed port"),
    }
}
