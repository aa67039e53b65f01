//! HTTP contract tests for the classifier service.
//!
//! The LLM is replaced by in-process stubs so the router can be driven with
//! `tower::ServiceExt::oneshot`.

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use serde_json::{Value, json};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use symptom_classifier_service::{AppState, SymptomPipeline, TextGenerator, build_router};
use tower::ServiceExt;

struct FixedReply {
    reply: &'static str,
    calls: AtomicUsize,
}

#[async_trait]
impl TextGenerator for FixedReply {
    async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.to_string())
    }
}

struct Unreachable;

#[async_trait]
impl TextGenerator for Unreachable {
    async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
        Err(anyhow::anyhow!("connection refused"))
    }
}

fn stub(reply: &'static str) -> Arc<FixedReply> {
    Arc::new(FixedReply {
        reply,
        calls: AtomicUsize::new(0),
    })
}

fn app_with(generator: Option<Arc<dyn TextGenerator>>) -> Router {
    build_router(AppState::new(
        SymptomPipeline::new(generator),
        "XYZ Hospital",
    ))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn classify_request(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/classify-symptom")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn classify(app: Router, payload: Value) -> (StatusCode, Value) {
    send(app, classify_request(payload.to_string())).await
}

#[tokio::test]
async fn classifies_general_symptom() {
    let (status, body) = classify(
        app_with(Some(stub("General"))),
        json!({ "symptom": "I have fever" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "symptom": "I have fever",
            "category": "General",
            "answer": "'I have fever' seems general. We're directing you to the general ward for consultation with a doctor.",
            "recommendation": "Visit General Ward",
            "urgency": "Low",
            "hospital": "XYZ Hospital",
            "status": "success"
        })
    );
}

#[tokio::test]
async fn classifies_emergency_symptom() {
    let (status, body) = classify(
        app_with(Some(stub("Emergency"))),
        json!({ "symptom": "chest pain and can't breathe" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "Emergency");
    assert_eq!(body["urgency"], "Critical");
    assert!(
        body["recommendation"]
            .as_str()
            .unwrap()
            .contains("Emergency Room")
    );
    assert_eq!(
        body["answer"],
        "'chest pain and can't breathe' indicates a medical emergency. Please seek immediate medical help!"
    );
}

#[tokio::test]
async fn classifies_mental_health_symptom() {
    let (status, body) = classify(
        app_with(Some(stub("Mental Health"))),
        json!({ "symptom": "  I feel anxious all the time  " }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["symptom"], "I feel anxious all the time");
    assert_eq!(body["category"], "Mental Health");
    assert_eq!(body["urgency"], "Medium");
    assert_eq!(body["recommendation"], "Mental Health Counseling");
}

#[tokio::test]
async fn unrecognized_model_output_routes_to_general() {
    let (status, body) = classify(
        app_with(Some(stub("Unclear"))),
        json!({ "symptom": "something feels off" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "General");
    assert_eq!(body["urgency"], "Low");
}

#[tokio::test]
async fn blank_symptoms_are_rejected_before_the_model_is_called() {
    let generator = stub("General");

    for payload in [
        json!({ "symptom": "" }),
        json!({ "symptom": "   " }),
        json!({}),
        json!({ "symptom": null }),
    ] {
        let (status, body) = classify(app_with(Some(generator.clone())), payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Please provide a symptom." }));
    }

    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let (status, body) = send(
        app_with(Some(stub("General"))),
        classify_request("{not json".to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please provide a symptom.");
}

#[tokio::test]
async fn non_object_bodies_are_bad_requests() {
    let generator = stub("General");

    for payload in [
        json!(["x"]),
        json!("I have fever"),
        json!({ "symptom": 42 }),
        json!({ "symptom": ["I have fever"] }),
    ] {
        let (status, body) = classify(app_with(Some(generator.clone())), payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Please provide a symptom." }));
    }

    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn oversized_body_is_a_failed_request_not_a_missing_symptom() {
    let generator = stub("General");
    let symptom = "a".repeat(3 * 1024 * 1024);

    let (status, body) = classify(
        app_with(Some(generator.clone())),
        json!({ "symptom": symptom }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "failed");
    assert_ne!(body["error"], "Please provide a symptom.");
    assert!(body["error"].as_str().unwrap().contains("length limit"));
    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_adapter_is_an_internal_error() {
    let (status, body) = classify(app_with(None), json!({ "symptom": "I have fever" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({
            "error": "LLM not initialized. Please provide API key.",
            "status": "failed"
        })
    );
}

#[tokio::test]
async fn upstream_failure_is_reported_without_a_category() {
    let (status, body) = classify(
        app_with(Some(Arc::new(Unreachable))),
        json!({ "symptom": "I have fever" }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "failed");
    assert_eq!(body["error"], "connection refused");
    assert!(body.get("category").is_none());
}

#[tokio::test]
async fn health_does_not_need_the_adapter() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app_with(None), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "healthy",
            "service": "Medical Symptom Classifier",
            "hospital": "XYZ Hospital"
        })
    );
}

#[tokio::test]
async fn responses_carry_a_correlation_id() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app_with(None).oneshot(request).await.unwrap();

    let correlation_id = response
        .headers()
        .get("x-correlation-id")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(uuid::Uuid::parse_str(correlation_id).is_ok());
}
