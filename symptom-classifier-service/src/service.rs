use axum::{
    Router,
    extract::{Request, State, rejection::JsonRejection},
    http::HeaderValue,
    middleware::{Next, from_fn},
    response::{Json, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Instrument, error, info, warn};
use uuid::Uuid;

use crate::{
    error::ServiceError,
    models::{ClassificationResponse, ClassifyRequest, HealthResponse},
    workflow::SymptomPipeline,
};

pub const SERVICE_NAME: &str = "Medical Symptom Classifier";
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<SymptomPipeline>,
    pub hospital_name: Arc<str>,
}

impl AppState {
    pub fn new(pipeline: SymptomPipeline, hospital_name: impl Into<Arc<str>>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            hospital_name: hospital_name.into(),
        }
    }
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/classify-symptom", post(classify_symptom))
        .layer(from_fn(correlation_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Tag every request with a correlation id and run it inside a matching span
async fn correlation_id_middleware(mut request: Request, next: Next) -> Response {
    let correlation_id = Uuid::new_v4().to_string();
    let header = HeaderValue::from_str(&correlation_id).ok();

    if let Some(value) = &header {
        request
            .headers_mut()
            .insert(CORRELATION_ID_HEADER, value.clone());
    }

    let span = tracing::info_span!("http_request", correlation_id = %correlation_id);
    let mut response = next.run(request).instrument(span).await;

    if let Some(value) = header {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }
    response
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "description": "LLM-assisted triage of free-text symptom descriptions",
        "endpoints": {
            "POST /classify-symptom": "Classify a symptom as General, Emergency or Mental Health",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        hospital: state.hospital_name.to_string(),
    })
}

async fn classify_symptom(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ClassificationResponse>, ServiceError> {
    let symptom = validate_symptom(payload)?;

    info!(symptom_length = symptom.len(), "classifying symptom");

    let classification = state.pipeline.classify(&symptom).await.map_err(|e| {
        error!(error = %e, "symptom classification failed");
        e
    })?;

    info!(
        category = %classification.category,
        urgency = %classification.urgency,
        "symptom classified"
    );

    Ok(Json(ClassificationResponse {
        classification,
        hospital: state.hospital_name.to_string(),
        status: "success".to_string(),
    }))
}

/// Extract the trimmed symptom from a `{"symptom": string}` object.
///
/// Bodies that parse but have the wrong shape count as a missing symptom.
/// Bodies that could not be read at all (e.g. over the size limit) are a
/// request failure, not a validation error.
fn validate_symptom(payload: Result<Json<Value>, JsonRejection>) -> Result<String, ServiceError> {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(JsonRejection::BytesRejection(rejection)) => {
            error!(error = %rejection.body_text(), "failed to read classification body");
            return Err(ServiceError::Request(rejection.body_text()));
        }
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected classification body");
            return Err(ServiceError::missing_symptom());
        }
    };

    // Structs also deserialize from sequences, so the object check comes first
    if !body.is_object() {
        warn!("classification body is not a JSON object");
        return Err(ServiceError::missing_symptom());
    }

    let request: ClassifyRequest = serde_json::from_value(body).map_err(|e| {
        warn!(error = %e, "classification body has an invalid symptom");
        ServiceError::missing_symptom()
    })?;

    match request.symptom.as_deref().map(str::trim) {
        Some(symptom) if !symptom.is_empty() => Ok(symptom.to_string()),
        _ => Err(ServiceError::missing_symptom()),
    }
}
