use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use sports_recommender::api::{router, with_middleware, WELCOME_MESSAGE};
use sports_recommender::config::{ApiConfig, ModelConfig};
use sports_recommender::{AppState, ClassifierArtifact, Config, Sport};

fn app() -> Router {
    let config = Config {
        model: ModelConfig {
            n_trees: 20,
            ..ModelConfig::default()
        },
        ..Config::default()
    };
    let classifier = ClassifierArtifact::train(&config.model).expect("classifier trains");
    router(Arc::new(AppState {
        config: Arc::new(config),
        classifier: Arc::new(classifier),
    }))
}

async fn post_recommend(app: Router, body: Body) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/recommend")
                .header(header::CONTENT_TYPE, "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn recommend(payload: Value) -> (StatusCode, Value) {
    post_recommend(app(), Body::from(payload.to_string())).await
}

#[tokio::test]
async fn home_returns_welcome_message() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], WELCOME_MESSAGE.as_bytes());
}

#[tokio::test]
async fn health_reports_classifier() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["classifier"]["trees"], 20);
    assert_eq!(body["classifier"]["training_rows"], 5);
}

#[tokio::test]
async fn youth_outdoor_recommendation() {
    let (status, body) = recommend(json!({"age": 12, "bmi": 18.0, "goal": "", "preference": "outdoor"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommended_sport"], "Football or basketball to encourage teamwork.");
}

#[tokio::test]
async fn young_adult_fitness_recommendation() {
    let (status, body) =
        recommend(json!({"age": 25, "bmi": 22.0, "goal": "Fitness", "preference": "indoor"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommended_sport"], "Gym or weight training.");
}

#[tokio::test]
async fn adult_weight_loss_recommendation() {
    let (status, body) =
        recommend(json!({"age": 35, "bmi": 28.0, "goal": "weight loss", "preference": "outdoor"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommended_sport"], "Yoga or swimming as low-impact options.");
}

#[tokio::test]
async fn senior_and_high_bmi_phrases() {
    let (_, body) = recommend(json!({"age": 80, "bmi": 55.0, "goal": "competition", "preference": "outdoor"})).await;
    assert_eq!(
        body["recommended_sport"],
        "Walking, yoga, or light stretching for older individuals."
    );

    let (_, body) = recommend(json!({"age": 60, "bmi": 45.0, "goal": "chess", "preference": "moon"})).await;
    assert_eq!(body["recommended_sport"], "Swimming or yoga as low-impact activities.");
}

#[tokio::test]
async fn out_of_range_age_is_bad_request() {
    let (status, body) = recommend(json!({"age": 5, "bmi": 22.0})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Age must be between 10 and 100.");
}

#[tokio::test]
async fn out_of_range_bmi_is_bad_request() {
    let (status, body) = recommend(json!({"age": 30, "bmi": 5})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BMI must be between 10 and 60.");
}

#[tokio::test]
async fn empty_object_fails_age_validation() {
    let (status, body) = recommend(json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Age"));
}

#[tokio::test]
async fn classifier_path_returns_trained_label() {
    let (status, body) =
        recommend(json!({"age": 60, "bmi": 25.0, "goal": "recreation", "preference": "outdoor"})).await;
    assert_eq!(status, StatusCode::OK);

    let sport: Sport = body["recommended_sport"].as_str().unwrap().parse().unwrap();
    assert!(!matches!(sport, Sport::Yoga | Sport::Gym | Sport::Pilates));
}

#[tokio::test]
async fn classifier_path_indoor_never_outdoor_only_sport() {
    let (status, body) =
        recommend(json!({"age": 65, "bmi": 30.0, "goal": "competition", "preference": "indoor"})).await;
    assert_eq!(status, StatusCode::OK);

    let sport: Sport = body["recommended_sport"].as_str().unwrap().parse().unwrap();
    assert!(!matches!(sport, Sport::Football | Sport::Tennis | Sport::Running));
}

#[tokio::test]
async fn identical_requests_get_identical_answers() {
    let payload = json!({"age": 55, "bmi": 27.0, "goal": "fitness", "preference": "outdoor"});
    let (_, first) = recommend(payload.clone()).await;
    let (_, second) = recommend(payload).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn unrecognized_category_is_server_error() {
    let (status, body) =
        recommend(json!({"age": 60, "bmi": 25.0, "goal": "chess", "preference": "indoor"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("chess"));
}

#[tokio::test]
async fn malformed_types_are_server_errors() {
    let (status, body) = recommend(json!({"age": "old", "bmi": 25.0})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());

    let (status, _) = post_recommend(app(), Body::from("{not json")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn infinite_bmi_is_bad_request() {
    for bmi in [json!("inf"), json!("-inf")] {
        let (status, body) = recommend(json!({"age": 25, "bmi": bmi})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "BMI must be between 10 and 60.");
    }
}

#[tokio::test]
async fn padded_goal_is_not_trimmed() {
    let (status, body) =
        recommend(json!({"age": 25, "bmi": 22.0, "goal": " fitness ", "preference": "indoor"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["recommended_sport"],
        "Indoor rock climbing for an active workout."
    );
}

async fn exploding_handler() -> &'static str {
    panic!("handler exploded")
}

#[tokio::test]
async fn handler_panic_becomes_json_500() {
    let app = with_middleware(
        Router::new().route("/explode", get(exploding_handler)),
        &ApiConfig::default(),
    );

    let response = app
        .oneshot(Request::builder().uri("/explode").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"error": "An internal error occurred"}));
}
