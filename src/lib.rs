//! Backend for a gamified city-exploration app: daily photo challenges,
//! user accounts with streaks, a submission feed and a leaderboard, persisted
//! as two JSON documents plus an uploads directory.

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::any::Any;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
};

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod maintenance;
pub mod middleware;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

use handlers::{
    accounts, challenges, files, health, leaderboard, submissions, upload, user, AppState,
};

/// Room for the text fields and part headers that ride along with the photo.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

pub fn create_app(state: AppState) -> Router {
    let config = &state.config;

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true);

    let mut router = Router::new()
        .route("/", get(health::index))
        .route("/api/daily-challenge", get(challenges::daily_challenge))
        .route("/api/create-account", post(accounts::create_account))
        .route("/api/upload-submission", post(upload::upload_submission))
        .route("/api/submissions", get(submissions::list_submissions))
        .route("/api/leaderboard", get(leaderboard::leaderboard))
        .route("/api/user/:user_id", get(user::get_user))
        .route("/api/health", get(health::health))
        .route("/uploads/:filename", get(files::serve_upload));

    if config.enable_debug_routes {
        router = router
            .route("/api/debug/files", get(health::debug_files))
            .route("/api/test-submission", post(upload::test_submission));
    }

    router
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(
            config.max_file_size + MULTIPART_OVERHEAD,
        ))
        .layer(axum::middleware::from_fn(middleware::request_logging))
        .layer(cors)
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Global error handler: {}", details);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Something went wrong!",
            "status": StatusCode::INTERNAL_SERVER_ERROR.as_u16()
        })),
    )
        .into_response()
}
