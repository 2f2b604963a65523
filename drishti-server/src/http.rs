//! HTTP surface for the vision service

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use drishti_api::{ErrorCode, GetObjectPointCloudsRequest, ServiceError, VisionServer};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub struct ApiState {
    pub server: Arc<VisionServer>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: String,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/v1/object_point_clouds", post(get_object_point_clouds))
        .route("/healthz", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidArgument => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: ServiceError) -> Response {
    let code = err.code();
    warn!(code = code.as_str(), error = %err, "object point clouds request failed");
    (
        status_for(code),
        Json(ErrorResponse {
            error: err.to_string(),
            code: code.as_str().to_string(),
        }),
    )
        .into_response()
}

async fn get_object_point_clouds(
    State(state): State<ApiState>,
    Json(request): Json<GetObjectPointCloudsRequest>,
) -> Response {
    match state.server.get_object_point_clouds(&request).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use drishti_api::ResourceDirectory;
    use tower::ServiceExt;

    fn empty_state() -> ApiState {
        ApiState {
            server: Arc::new(VisionServer::new(Arc::new(ResourceDirectory::new()))),
        }
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorCode::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::InvalidArgument), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(ErrorCode::Internal),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_missing_camera_maps_to_404() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/object_point_clouds")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"name":"fakeCamera","clustering_radius_mm":5.0}"#,
            ))
            .unwrap();
        let response = router(empty_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bad_radius_maps_to_400() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/object_point_clouds")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"name":"fakeCamera","clustering_radius_mm":0.0}"#,
            ))
            .unwrap();
        let response = router(empty_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/healthz")
            .body(Body::empty())
            .unwrap();
        let response = router(empty_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
