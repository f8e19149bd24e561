use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use diagnosis_core::core::classifier::Classifier;
use diagnosis_core::core::ranking::{self, DEFAULT_TOP_K};
use diagnosis_core::core::vocabulary;
use diagnosis_core::DiagnosisEngine;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

const MODEL_PATH: &str = "model.bin";
const DESCRIPTION_PATH: &str = "symptom_Description.csv";
const PRECAUTION_PATH: &str = "symptom_precaution.csv";
const BIND_ADDR: &str = "127.0.0.1:5000";

/// One row of the inference response, probability already rendered for
/// display.
#[derive(Serialize)]
struct CandidateRow {
    disease: String,
    probability: String,
    description: String,
    precautions: Vec<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "prediction failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// `POST /predict` - scores a symptom list against the trained model.
///
/// Body: `{"symptoms": ["itching", "skin rash", ...]}`. A missing field is
/// an empty symptom list; a field that is not an array of strings is a 400
/// naming the offending entry. Unknown symptoms never fail the request.
async fn predict(
    State(engine): State<Arc<DiagnosisEngine>>,
    Json(payload): Json<Value>,
) -> Result<Json<Vec<CandidateRow>>, ApiError> {
    let body = payload
        .as_object()
        .ok_or_else(|| ApiError::BadRequest("request body must be a JSON object".to_string()))?;
    let symptoms = vocabulary::symptom_list(body.get("symptoms").unwrap_or(&Value::Null))
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let candidates = engine
        .diagnose(&symptoms, DEFAULT_TOP_K)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(
        candidates
            .into_iter()
            .map(|candidate| CandidateRow {
                disease: candidate.disease,
                probability: ranking::as_percentage(candidate.probability),
                description: candidate.description,
                precautions: candidate.precautions,
            })
            .collect(),
    ))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let model_path = env_or("MODEL_PATH", MODEL_PATH);
    let description_path = env_or("DESCRIPTION_PATH", DESCRIPTION_PATH);
    let precaution_path = env_or("PRECAUTION_PATH", PRECAUTION_PATH);

    let engine = match DiagnosisEngine::from_files(
        Path::new(&model_path),
        Path::new(&description_path),
        Path::new(&precaution_path),
    ) {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            tracing::error!("could not load the serving context: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(
        diseases = engine.model().classifier.classes().len(),
        symptoms = engine.model().vocabulary.len(),
        "trained model loaded"
    );

    // The engine is immutable once built, so it is shared plainly across
    // request handlers. CORS mirrors the browser client's needs.
    let app = Router::new()
        .route("/predict", post(predict))
        .with_state(engine)
        .layer(CorsLayer::permissive());

    let addr = env_or("BIND_ADDR", BIND_ADDR);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("could not bind {addr}: {e}");
            std::process::exit(1);
        });
    tracing::info!(%addr, "diagnosis API listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {e}");
        std::process::exit(1);
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
