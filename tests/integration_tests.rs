use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use city_quest_server::{config::Config, create_app, handlers::AppState};
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "----cityquestboundary";

struct TestApp {
    app: Router,
    dir: TempDir,
}

impl TestApp {
    async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    async fn with_config(tweak: impl FnOnce(&mut Config)) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::with_dirs(dir.path().join("data"), dir.path().join("uploads"));
        tweak(&mut config);
        let state = AppState::new(config).await.expect("Failed to build state");
        Self {
            app: create_app(state),
            dir,
        }
    }

    fn uploads_dir(&self) -> PathBuf {
        self.dir.path().join("uploads")
    }

    fn uploaded_files(&self) -> usize {
        std::fs::read_dir(self.uploads_dir()).unwrap().count()
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn create_account(&self, name: &str, email: &str) -> (StatusCode, Value) {
        let body = json!({ "name": name, "email": email, "password": "pw123" });
        self.send(
            Request::builder()
                .method("POST")
                .uri("/api/create-account")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn upload(&self, fields: &[(&str, &str)], file: Option<FilePart<'_>>) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri("/api/upload-submission")
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={}", BOUNDARY),
                )
                .body(Body::from(multipart_body(fields, file)))
                .unwrap(),
        )
        .await
    }

    async fn upload_photo(&self, user_id: &str) -> (StatusCode, Value) {
        self.upload(
            &[("challengeId", "1"), ("userId", user_id), ("userName", "Mia")],
            Some(FilePart::jpeg(b"\xFF\xD8\xFFfakejpeg")),
        )
        .await
    }
}

struct FilePart<'a> {
    filename: &'a str,
    content_type: &'a str,
    data: &'a [u8],
}

impl<'a> FilePart<'a> {
    fn jpeg(data: &'a [u8]) -> Self {
        Self {
            filename: "campus.jpg",
            content_type: "image/jpeg",
            data,
        }
    }
}

fn multipart_body(fields: &[(&str, &str)], file: Option<FilePart<'_>>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"photo\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, file.filename, file.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(file.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["users"], 0);
    assert_eq!(body["submissions"], 0);
    assert_eq!(body["uploadedFiles"], 0);
}

#[tokio::test]
async fn test_index_lists_endpoints() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["users"], 0);
    let endpoints = body["availableEndpoints"].as_array().unwrap();
    assert!(endpoints.contains(&json!("POST /api/upload-submission")));
}

#[tokio::test]
async fn test_daily_challenge() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/daily-challenge").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["title"].is_string());
    assert!(body["funFact"].is_string());
}

#[tokio::test]
async fn test_leaderboard_after_account_creation() {
    let app = TestApp::new().await;
    for i in 0..5 {
        let (status, body) = app
            .create_account(&format!("user{}", i), &format!("user{}@example.com", i))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["id"], i + 1);
        assert!(body["user"].get("password").is_none());
    }
    app.upload_photo("3").await;
    app.upload_photo("3").await;
    app.upload_photo("5").await;

    let (status, body) = app.get("/api/leaderboard").await;

    assert_eq!(status, StatusCode::OK);
    let board = body.as_array().unwrap();
    assert_eq!(board.len(), 5);
    let ranks: Vec<i64> = board.iter().map(|e| e["rank"].as_i64().unwrap()).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    let streaks: Vec<i64> = board.iter().map(|e| e["streak"].as_i64().unwrap()).collect();
    assert_eq!(streaks, vec![2, 1, 0, 0, 0]);
    assert_eq!(board[0]["name"], "user2");
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let app = TestApp::new().await;
    app.create_account("Ada", "ada@example.com").await;

    let (status, body) = app.create_account("Other Ada", "ada@example.com").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User already exists");
    let (_, health) = app.get("/api/health").await;
    assert_eq!(health["users"], 1);
}

#[tokio::test]
async fn test_upload_increments_streak() {
    let app = TestApp::new().await;
    app.create_account("Mia", "mia@example.com").await;

    let (status, body) = app.upload_photo("1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Submission uploaded successfully");
    let submission = &body["submission"];
    assert_eq!(submission["id"], 1);
    assert_eq!(submission["challengeId"], 1);
    assert_eq!(submission["userId"], 1);
    assert_eq!(submission["userName"], "Mia");
    let photo_url = submission["photoUrl"].as_str().unwrap();
    assert!(photo_url.starts_with("/uploads/photo-"));
    assert!(photo_url.ends_with(".jpg"));

    let (_, user) = app.get("/api/user/1").await;
    assert_eq!(user["streak"], 1);

    let (_, feed) = app.get("/api/submissions").await;
    let feed = feed.as_array().unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0]["fileExists"], true);
    assert_eq!(app.uploaded_files(), 1);
}

#[tokio::test]
async fn test_non_image_rejected_before_write() {
    let app = TestApp::new().await;

    let (status, body) = app
        .upload(
            &[("challengeId", "1"), ("userId", "1")],
            Some(FilePart {
                filename: "notes.txt",
                content_type: "text/plain",
                data: b"just text",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Only image files are allowed!");
    assert_eq!(app.uploaded_files(), 0);
    let (_, feed) = app.get("/api/submissions").await;
    assert!(feed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_oversized_upload_rejected() {
    let app = TestApp::new().await;
    let data = vec![0u8; 5 * 1024 * 1024 + 1];

    let (status, body) = app
        .upload(
            &[("challengeId", "1"), ("userId", "1")],
            Some(FilePart::jpeg(&data)),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "File too large. Maximum size is 5MB.");
    assert_eq!(app.uploaded_files(), 0);
}

#[tokio::test]
async fn test_upload_without_file_or_fields() {
    let app = TestApp::new().await;

    let (status, body) = app.upload(&[("challengeId", "1"), ("userId", "1")], None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file uploaded");

    let (status, body) = app
        .upload(&[("userId", "1")], Some(FilePart::jpeg(b"jpeg")))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields: challengeId and userId");
    assert_eq!(app.uploaded_files(), 0);
}

#[tokio::test]
async fn test_submissions_newest_first_and_stable_reads() {
    let app = TestApp::new().await;
    for _ in 0..3 {
        let (status, _) = app.upload_photo("1").await;
        assert_eq!(status, StatusCode::OK);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let (_, first) = app.get("/api/submissions").await;
    let ids: Vec<i64> = first
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);

    let (_, second) = app.get("/api/submissions").await;
    assert_eq!(first, second);

    let (_, board_a) = app.get("/api/leaderboard").await;
    let (_, board_b) = app.get("/api/leaderboard").await;
    assert_eq!(board_a, board_b);
}

#[tokio::test]
async fn test_removed_file_reported_missing() {
    let app = TestApp::new().await;
    let (_, body) = app.upload_photo("1").await;
    let photo_url = body["submission"]["photoUrl"].as_str().unwrap().to_string();
    let filename = photo_url.trim_start_matches("/uploads/");

    std::fs::remove_file(app.uploads_dir().join(filename)).unwrap();

    let (_, feed) = app.get("/api/submissions").await;
    let feed = feed.as_array().unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0]["photoUrl"], photo_url.as_str());
    assert_eq!(feed[0]["fileExists"], false);
}

#[tokio::test]
async fn test_get_user() {
    let app = TestApp::new().await;
    app.create_account("Lena", "lena@example.com").await;

    let (status, body) = app.get("/api/user/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Lena");
    assert!(body.get("password").is_none());

    let (status, body) = app.get("/api/user/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");

    let (status, _) = app.get("/api/user/abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_serves_uploaded_file() {
    let app = TestApp::new().await;
    let (_, body) = app.upload_photo("1").await;
    let photo_url = body["submission"]["photoUrl"].as_str().unwrap().to_string();

    let response = app
        .app
        .clone()
        .oneshot(Request::builder().uri(photo_url.as_str()).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "image/jpeg");
    assert_eq!(response.headers()["cache-control"], "no-cache");
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"\xFF\xD8\xFFfakejpeg");

    let (status, body) = app.get("/uploads/missing.jpg").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "File not found");
}

#[tokio::test]
async fn test_debug_routes() {
    let app = TestApp::new().await;
    app.upload_photo("1").await;

    let (status, body) = app.get("/api/debug/files").await;
    assert_eq!(status, StatusCode::OK);
    let files = body["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert!(files[0]["url"].as_str().unwrap().starts_with("/uploads/photo-"));

    let (status, body) = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/api/test-submission")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["submission"]["id"], 2);
    assert_eq!(body["submission"]["userName"], "Test User");

    let (_, feed) = app.get("/api/submissions").await;
    let synthetic = feed
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["id"] == 2)
        .unwrap()
        .clone();
    assert_eq!(synthetic["fileExists"], false);
}

#[tokio::test]
async fn test_debug_routes_can_be_disabled() {
    let app = TestApp::with_config(|config| config.enable_debug_routes = false).await;

    let (status, body) = app.get("/api/debug/files").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn test_unknown_route_returns_json() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/nothing-here").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_malformed_json_body_uses_error_envelope() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/api/create-account")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(body["status"], 400);
    let (_, health) = app.get("/api/health").await;
    assert_eq!(health["users"], 0);
}

#[tokio::test]
async fn test_upload_without_multipart_uses_error_envelope() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/api/upload-submission")
                .body(Body::from("photo"))
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(body["status"], 400);
    assert_eq!(app.uploaded_files(), 0);
}

#[tokio::test]
async fn test_state_persists_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_dirs(dir.path().join("data"), dir.path().join("uploads"));

    {
        let app = create_app(AppState::new(config.clone()).await.unwrap());
        let body = json!({ "name": "Kai", "email": "kai@example.com", "password": "pw" });
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/create-account")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let stored = std::fs::read_to_string(dir.path().join("data").join("users.json")).unwrap();
    let stored: Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(stored[0]["email"], "kai@example.com");
    assert_eq!(stored[0]["streak"], 0);

    let state = AppState::new(config).await.unwrap();
    assert_eq!(state.database.counts().await, (1, 0));
}
