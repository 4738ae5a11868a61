//! HTTP API Server for Recommendations
//!
//! Three routes: a welcome banner, a health probe and the recommendation
//! endpoint. Request bodies are parsed leniently (numeric strings are
//! accepted, missing keys default to zero or empty) before validation.

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing::info;

use crate::config::{ApiConfig, Config};
use crate::error::{Error, Result};
use crate::recommendation::{decide, ClassifierArtifact, RecommendationRequest};

pub const WELCOME_MESSAGE: &str = "Welcome to the Sports Recommendation System API!";

/// Shared application state
pub struct AppState {
    pub config: Arc<Config>,
    pub classifier: Arc<ClassifierArtifact>,
}

/// Successful recommendation body
#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommended_sport: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub classifier: ClassifierHealth,
}

#[derive(Debug, Serialize)]
pub struct ClassifierHealth {
    pub trees: usize,
    pub training_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holdout_accuracy: Option<f64>,
}

/// Build the router with its middleware stack
pub fn router(state: Arc<AppState>) -> Router {
    let api = state.config.api.clone();

    let routes = Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/recommend", post(recommend))
        .with_state(state);

    with_middleware(routes, &api)
}

/// Wrap `routes` in tracing, panic recovery, timeout, body limit and CORS
pub fn with_middleware(routes: Router, api: &ApiConfig) -> Router {
    let app = routes.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(TimeoutLayer::new(api.request_timeout))
            .layer(DefaultBodyLimit::max(api.max_body_size)),
    );

    if api.cors_enabled {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Render a handler panic as the JSON 500 every other failure gets
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    Error::internal(format!("handler panicked: {}", detail)).into_response()
}

/// Start the API server, returning once `shutdown` resolves
pub async fn start_server<F>(state: Arc<AppState>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = format!("{}:{}", state.config.api.host, state.config.api.port);
    let app = router(state);

    info!("🚀 Starting recommendation API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

/// Welcome banner
async fn home() -> &'static str {
    WELCOME_MESSAGE
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        classifier: ClassifierHealth {
            trees: state.classifier.n_trees(),
            training_rows: state.classifier.training_rows(),
            holdout_accuracy: state.classifier.holdout_accuracy(),
        },
    })
}

/// Recommend a sport for the posted profile
async fn recommend(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<RecommendResponse>> {
    let Json(body) = payload.map_err(|rejection| Error::invalid_format(rejection.body_text()))?;
    let request = parse_request(&body)?;

    let recommendation = decide(&request, state.classifier.as_ref())?;

    Ok(Json(RecommendResponse {
        recommended_sport: recommendation.to_string(),
    }))
}

// ============================================================================
// Request parsing
// ============================================================================

/// Read `age`, `bmi`, `goal` and `preference` out of a JSON object.
///
/// Missing keys become 0 / empty string. Present keys of the wrong type are
/// malformed input, not validation failures.
pub fn parse_request(body: &Value) -> Result<RecommendationRequest> {
    let fields = body
        .as_object()
        .ok_or_else(|| Error::invalid_format("request body must be a JSON object"))?;

    let age = integer_field(fields, "age")?;
    let bmi = real_field(fields, "bmi")?;
    let goal = text_field(fields, "goal")?;
    let preference = text_field(fields, "preference")?;

    Ok(RecommendationRequest::new(age, bmi, goal, preference))
}

fn integer_field(fields: &Map<String, Value>, key: &str) -> Result<i64> {
    match fields.get(key) {
        None => Ok(0),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .ok_or_else(|| Error::invalid_format(format!("{} is not a usable number: {}", key, n))),
        Some(Value::String(s)) => s.trim().parse().map_err(|_| {
            Error::invalid_format(format!("invalid literal for {}: '{}'", key, s))
        }),
        Some(other) => Err(Error::invalid_format(format!(
            "{} must be an integer, got {}",
            key, other
        ))),
    }
}

fn real_field(fields: &Map<String, Value>, key: &str) -> Result<f64> {
    let value = match fields.get(key) {
        None => return Ok(0.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(other) => {
            return Err(Error::invalid_format(format!(
                "{} must be a number, got {}",
                key, other
            )))
        }
    };

    value
        .filter(|v| !v.is_nan())
        .ok_or_else(|| Error::invalid_format(format!("could not convert {} to a number", key)))
}

fn text_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Result<&'a str> {
    match fields.get(key) {
        None => Ok(""),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(Error::invalid_format(format!(
            "{} must be a string, got {}",
            key, other
        ))),
    }
}
