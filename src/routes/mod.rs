mod home;
pub mod upload;
pub mod videos;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::AppError;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        home::root,
        videos::list_videos,
        upload::upload_video,
    ),
    components(
        schemas(
            home::RootResponse,
            videos::ListVideosResponse,
            videos::VideoView,
            videos::AuthorView,
            upload::UploadVideoRequest,
            upload::UploadVideoResponse,
        )
    ),
    tags(
        (name = "General", description = "General API information"),
        (name = "Videos", description = "Newsfeed listing and video upload")
    ),
    info(
        title = "ClipShare API",
        version = "0.1.0",
        description = "A Rust/Axum backend for sharing videos: paginated newsfeed listing plus base64 uploads persisted to object storage",
    )
)]
struct ApiDoc;

// Browsers send bare OPTIONS as well as preflights; both must succeed with an
// empty body and no store access.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub fn create_routes(state: AppState) -> Router {
    let swagger_router: Router = SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into();

    let list_cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let upload_cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-captcha-token"),
        ]);

    let list_routes = Router::new()
        .route(
            "/videos",
            get(videos::list_videos)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(list_cors);

    let upload_routes = Router::new()
        .route(
            "/videos/upload",
            post(upload::upload_video)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(upload_cors);

    let app_routes = Router::new()
        .route("/", get(home::root))
        .merge(list_routes)
        .merge(upload_routes)
        .with_state(state);

    Router::new().merge(swagger_router).merge(app_routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::entities::video;
    use crate::services::s3::StorageService;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn test_app(db: sea_orm::DatabaseConnection) -> Router {
        let config = Config {
            database_url: "postgres://localhost/clipshare".to_string(),
            storage_access_key_id: "AKIATEST".to_string(),
            storage_secret_access_key: "secret".to_string(),
            storage_endpoint: "https://storage.example.dev".to_string(),
            storage_bucket: "files".to_string(),
            cdn_base_url: "https://cdn.example.dev".to_string(),
        };
        create_routes(AppState {
            db: Arc::new(db),
            storage: StorageService::new(&config),
        })
    }

    fn empty_db() -> sea_orm::DatabaseConnection {
        MockDatabase::new(DatabaseBackend::Postgres).into_connection()
    }

    #[tokio::test]
    async fn options_short_circuits_with_empty_body() {
        let app = test_app(empty_db());

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/videos")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn preflight_advertises_upload_methods_and_headers() {
        let app = test_app(empty_db());

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/videos/upload")
                    .header("origin", "https://clipshare.example")
                    .header("access-control-request-method", "POST")
                    .header("access-control-request-headers", "content-type,x-captcha-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        let methods = headers["access-control-allow-methods"].to_str().unwrap();
        assert!(methods.contains("POST"));
        let allowed = headers["access-control-allow-headers"].to_str().unwrap();
        assert!(allowed.to_lowercase().contains("x-captcha-token"));
    }

    #[tokio::test]
    async fn wrong_method_is_405_with_json_error() {
        let app = test_app(empty_db());

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/videos")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Method not allowed");
    }

    #[tokio::test]
    async fn upload_with_failed_captcha_is_400() {
        let app = test_app(empty_db());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/videos/upload")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"captchaVerified": false, "videoFile": "AAAA", "title": "Cat video"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Captcha not passed");
    }

    #[tokio::test]
    async fn malformed_limit_rejects_with_json_error() {
        let app = test_app(empty_db());

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/videos?limit=abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(value["error"].as_str().unwrap().contains("limit"));
    }

    #[tokio::test]
    async fn malformed_json_body_rejects_with_json_error() {
        let app = test_app(empty_db());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/videos/upload")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(value["error"].is_string());
    }

    #[tokio::test]
    async fn list_returns_page_with_cors_header() {
        let row = video::Model {
            id: Uuid::new_v4(),
            title: "Cat video".to_string(),
            description: None,
            author_name: "Anonymous".to_string(),
            author_avatar: None,
            video_url: "https://cdn.example.dev/projects/AKIATEST/bucket/videos/x.mp4"
                .to_string(),
            thumbnail_url: None,
            video_type: "regular".to_string(),
            category: "animals".to_string(),
            duration: 0,
            views: 0,
            likes: 0,
            dislikes: 0,
            is_nsfw: false,
            is_nsfl: false,
            show_in_newsfeed: true,
            allow_comments: true,
            video_format: "hd".to_string(),
            uploaded_at: None,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row]])
            .into_connection();
        let app = test_app(db);

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/videos?type=regular&category=animals")
                    .header("origin", "https://clipshare.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["videos"][0]["title"], "Cat video");
        assert_eq!(value["videos"][0]["uploadedAt"], serde_json::Value::Null);
    }
}
