//! End-to-end tests for the HTTP surface: dataset on disk, engine bootstrap,
//! router, request/response bodies.

use std::{io::Write, sync::Arc};

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use disha_engine::{config::Config, engine::RecommendEngine, routes};

const SURVEY_CSV: &str = "\
grade,goals,skill_level,study_hours,interests,recommended_courses
10,career,beginner,4,\"['python', 'math']\",\"['CS101']\"
11,exam,intermediate,6,\"['physics', 'math']\",\"['PHY201', 'MATH110']\"
12,hobby,advanced,2,\"['art']\",\"['ART100']\"
9,career,intermediate,5,\"['python', 'web']\",\"['CS101', 'WEB210']\"
8,exam,beginner,3,\"['math']\",\"['MATH110']\"
";

fn test_app() -> (Router, Vec<String>) {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SURVEY_CSV.as_bytes()).unwrap();
    file.flush().unwrap();

    let config = Config {
        dataset_path: file.path().to_str().unwrap().to_string(),
        ..Config::default()
    };
    let engine = RecommendEngine::bootstrap(&config).unwrap();
    let vocabulary = engine.course_vocabulary().to_vec();

    (routes::app(Arc::new(engine)), vocabulary)
}

fn recommend_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/recommend")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn recommends_courses_for_a_seen_profile() {
    let (app, vocabulary) = test_app();

    let response = app
        .oneshot(recommend_request(&json!({
            "grade": 10,
            "goals": "career",
            "skill_level": "beginner",
            "study_hours": 4,
            "interests": ["python", "math"],
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let courses = body["recommended_courses"].as_array().unwrap();
    assert!(!courses.is_empty());
    for course in courses {
        assert!(vocabulary.contains(&course.as_str().unwrap().to_string()));
    }
}

#[tokio::test]
async fn unknown_goal_is_rejected_with_400() {
    let (app, _) = test_app();

    let response = app
        .oneshot(recommend_request(&json!({
            "grade": 10,
            "goals": "fame",
            "skill_level": "beginner",
            "study_hours": 4,
            "interests": ["python"],
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("goals"));
}

#[tokio::test]
async fn unknown_interests_are_tolerated() {
    let (app, vocabulary) = test_app();

    let response = app
        .oneshot(recommend_request(&json!({
            "grade": 10,
            "goals": "career",
            "skill_level": "beginner",
            "study_hours": 4,
            "interests": ["python", "falconry"],
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    for course in body["recommended_courses"].as_array().unwrap() {
        assert!(vocabulary.contains(&course.as_str().unwrap().to_string()));
    }
}

#[tokio::test]
async fn malformed_body_is_rejected_before_encoding() {
    let (app, _) = test_app();

    // Missing skill_level and mistyped grade.
    let response = app
        .oneshot(recommend_request(&json!({
            "grade": "ten",
            "goals": "career",
            "study_hours": 4,
            "interests": [],
        })))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let (app, _) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
}
