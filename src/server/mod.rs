// SPDX-License-Identifier: MIT

//! Stateless HTTP front for the requirement tooling
//!
//! Every request carries the tree it is about; the service keeps nothing
//! between calls except the immutable [`Config`].

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::catalog::{Course, DependencyIndex};
use crate::config::Config;
use crate::error::AppError;
use crate::requirement::{decode, is_satisfied, Projector, RequirementError, Validator};

type SharedConfig = Arc<Config>;

/// Build the application router
pub fn router(config: Config) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/requirements/validate", post(validate_tree))
        .route("/api/requirements/check", post(check_tree))
        .route("/api/requirements/graph", post(graph_tree))
        .route("/api/catalog/dependents", post(catalog_dependents))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(config))
}

pub async fn serve(config: Config) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = router(config);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Error response: `{"error": ..., "kind": ...}`
#[derive(Debug)]
pub struct ApiError(AppError);

impl<E: Into<AppError>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self.0 {
            AppError::Requirement(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.kind()),
            AppError::CourseNotFound { .. } => (StatusCode::NOT_FOUND, "CourseNotFound"),
            AppError::MissingRequirements { .. } => {
                (StatusCode::NOT_FOUND, "MissingRequirements")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal"),
        };
        log::warn!("Request failed ({}): {}", kind, self.0);
        (status, Json(json!({ "error": self.0.to_string(), "kind": kind }))).into_response()
    }
}

/// Unwrap a JSON body, reporting an unreadable one as a malformed tree
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| RequirementError::malformed(rejection.body_text()).into())
}

fn validator_for(config: &Config, course: Option<&str>) -> Validator {
    match course {
        Some(code) => config.validator().with_owner(code),
        None => config.validator(),
    }
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
struct ValidateRequest {
    tree: Value,
    /// Course the tree belongs to, checked for self-reference
    course: Option<String>,
}

async fn validate_tree(
    State(config): State<SharedConfig>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let payload = body(payload)?;
    let tree = decode(&payload.tree)?;
    validator_for(&config, payload.course.as_deref()).validate(&tree)?;
    Ok(Json(json!({ "valid": true })))
}

#[derive(Debug, Deserialize)]
struct CheckRequest {
    tree: Value,
    #[serde(default)]
    completed: Vec<String>,
    course: Option<String>,
}

async fn check_tree(
    State(config): State<SharedConfig>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let payload = body(payload)?;
    let tree = decode(&payload.tree)?;
    validator_for(&config, payload.course.as_deref()).validate(&tree)?;

    let completed: HashSet<String> = payload.completed.into_iter().collect();
    Ok(Json(json!({ "satisfied": is_satisfied(&tree, &completed) })))
}

#[derive(Debug, Deserialize)]
struct GraphRequest {
    tree: Value,
    focus: String,
    title: Option<String>,
}

async fn graph_tree(
    State(config): State<SharedConfig>,
    payload: Result<Json<GraphRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let payload = body(payload)?;
    let tree = decode(&payload.tree)?;
    validator_for(&config, Some(&payload.focus)).validate(&tree)?;

    let mut projector = Projector::new(payload.focus);
    if let Some(title) = payload.title {
        projector = projector.with_title(title);
    }
    Ok(Json(serde_json::to_value(projector.project(&tree))?))
}

#[derive(Debug, Deserialize)]
struct DependentsRequest {
    courses: Vec<Course>,
    course: String,
    #[serde(default)]
    transitive: bool,
}

async fn catalog_dependents(
    payload: Result<Json<DependentsRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let payload = body(payload)?;
    let index = DependencyIndex::from_courses(&payload.courses);
    if !index.contains(&payload.course) {
        return Err(AppError::course_not_found(payload.course).into());
    }

    let dependents = if payload.transitive {
        index.all_dependents(&payload.course)
    } else {
        index.leading_to(&payload.course)
    };
    Ok(Json(json!({ "course": payload.course, "dependents": dependents })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirement::MAX_SUPPORTED_DEPTH;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::{header, Request};
    use serde::de::DeserializeOwned;

    /// Run the JSON extractor over a raw request body
    async fn extract<T: DeserializeOwned>(raw: &str) -> Result<Json<T>, JsonRejection> {
        let request = Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(raw.to_string()))
            .unwrap();
        Json::<T>::from_request(request, &()).await
    }

    fn state() -> State<SharedConfig> {
        State(Arc::new(Config::default()))
    }

    fn calculus_tree() -> Value {
        json!({"type": "Group", "content": {"operator": "AND", "groups": [
            {"type": "Course", "content": "MATH133"},
            {"type": "Group", "content": {"operator": "OR", "groups": [
                {"type": "Course", "content": "MATH139"},
                {"type": "Course", "content": "MATH140"}
            ]}}
        ]}})
    }

    #[tokio::test]
    async fn test_health_check() {
        let Json(body) = health_check().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_validate_ok() {
        let payload = ValidateRequest {
            tree: calculus_tree(),
            course: Some("MATH222".into()),
        };
        let Json(body) = validate_tree(state(), Ok(Json(payload))).await.unwrap();
        assert_eq!(body["valid"], true);
    }

    #[tokio::test]
    async fn test_validate_cycle() {
        let payload = ValidateRequest {
            tree: calculus_tree(),
            course: Some("MATH140".into()),
        };
        let err = validate_tree(state(), Ok(Json(payload))).await.unwrap_err();
        assert!(matches!(&err.0, AppError::Requirement(e) if e.kind() == "CycleDetected"));
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_validate_malformed() {
        let payload = ValidateRequest {
            tree: json!({"type": "Leaf"}),
            course: None,
        };
        let err = validate_tree(state(), Ok(Json(payload))).await.unwrap_err();
        assert!(matches!(&err.0, AppError::Requirement(e) if e.kind() == "MalformedTree"));
    }

    #[tokio::test]
    async fn test_unreadable_body_is_malformed_tree() {
        let payload = extract::<ValidateRequest>(r#"{"course": "MATH222"}"#).await;
        assert!(payload.is_err());

        let err = validate_tree(state(), payload).await.unwrap_err();
        assert!(matches!(&err.0, AppError::Requirement(e) if e.kind() == "MalformedTree"));
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);

        let payload = extract::<CheckRequest>(r#"{"tree": {}, "completed": "MATH133"}"#).await;
        let err = check_tree(state(), payload).await.unwrap_err();
        assert!(matches!(&err.0, AppError::Requirement(e) if e.kind() == "MalformedTree"));
    }

    #[tokio::test]
    async fn test_tree_past_supported_depth_reaches_validator() {
        let mut tree = json!({"type": "Course", "content": "MATH240"});
        for _ in 0..MAX_SUPPORTED_DEPTH {
            tree = json!({"type": "Group", "content": {"operator": "AND", "groups": [tree]}});
        }
        let raw = json!({"tree": tree, "completed": []}).to_string();
        let limited = State(Arc::new(Config {
            max_depth: MAX_SUPPORTED_DEPTH,
            ..Config::default()
        }));

        let err = check_tree(limited, extract(&raw).await).await.unwrap_err();
        assert!(matches!(
            &err.0,
            AppError::Requirement(RequirementError::DepthExceeded { limit })
                if *limit == MAX_SUPPORTED_DEPTH
        ));
    }

    #[tokio::test]
    async fn test_check() {
        let payload = CheckRequest {
            tree: calculus_tree(),
            completed: vec!["MATH133".into(), "MATH140".into()],
            course: None,
        };
        let Json(body) = check_tree(state(), Ok(Json(payload))).await.unwrap();
        assert_eq!(body["satisfied"], true);

        let payload = CheckRequest {
            tree: calculus_tree(),
            completed: vec!["MATH133".into()],
            course: None,
        };
        let Json(body) = check_tree(state(), Ok(Json(payload))).await.unwrap();
        assert_eq!(body["satisfied"], false);
    }

    #[tokio::test]
    async fn test_check_respects_configured_depth() {
        let shallow = State(Arc::new(Config {
            max_depth: 2,
            ..Config::default()
        }));
        let payload = CheckRequest {
            tree: calculus_tree(),
            completed: vec![],
            course: None,
        };
        let err = check_tree(shallow, Ok(Json(payload))).await.unwrap_err();
        assert!(matches!(&err.0, AppError::Requirement(e) if e.kind() == "DepthExceeded"));
    }

    #[tokio::test]
    async fn test_graph() {
        let payload = GraphRequest {
            tree: calculus_tree(),
            focus: "MATH222".into(),
            title: Some("Calculus 3".into()),
        };
        let Json(body) = graph_tree(state(), Ok(Json(payload))).await.unwrap();
        assert_eq!(
            body,
            json!({
                "nodes": [
                    {"id": 1, "label": "MATH222", "title": "Calculus 3"},
                    {"id": 2, "label": "MATH133"},
                    {"id": 3, "label": "MATH139"},
                    {"id": 4, "label": "MATH140"}
                ],
                "edges": [
                    {"from": 2, "to": 1},
                    {"from": 3, "to": 1},
                    {"from": 4, "to": 1}
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_dependents() {
        let courses: Vec<Course> = serde_json::from_value(json!([
            {"_id": "MATH133"},
            {"_id": "MATH222", "logicalPrerequisites": calculus_tree()},
            {"_id": "MATH314", "logicalPrerequisites": {"type": "Course", "content": "MATH222"}}
        ]))
        .unwrap();

        let payload = DependentsRequest {
            courses: courses.clone(),
            course: "MATH133".into(),
            transitive: false,
        };
        let Json(body) = catalog_dependents(Ok(Json(payload))).await.unwrap();
        assert_eq!(body["dependents"], json!(["MATH222"]));

        let payload = DependentsRequest {
            courses: courses.clone(),
            course: "MATH133".into(),
            transitive: true,
        };
        let Json(body) = catalog_dependents(Ok(Json(payload))).await.unwrap();
        assert_eq!(body["dependents"], json!(["MATH222", "MATH314"]));

        let payload = DependentsRequest {
            courses,
            course: "PHYS101".into(),
            transitive: false,
        };
        let err = catalog_dependents(Ok(Json(payload))).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_router_builds() {
        let _ = router(Config::default());
    }
}
