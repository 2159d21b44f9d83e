//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use precinct_api::AppState;
use precinct_auth::PasswordHasher;
use precinct_core::config::AppConfig;
use precinct_database::Database;
use precinct_database::memory::MemoryDatabase;
use precinct_entity::officer::{NewOfficer, Rank};
use precinct_storage::LocalFileSink;

/// Password given to every officer created by [`TestApp::create_officer`].
pub const PASSWORD: &str = "quartz-Lantern-orbit-47";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store handles for direct setup and assertions
    pub db: Database,
    /// The in-memory backend, for failure injection
    pub memory: MemoryDatabase,
    /// Application config
    pub config: AppConfig,
    _uploads: TempDir,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let uploads = TempDir::new().expect("Failed to create upload dir");

        let mut config = AppConfig::default();
        config.database.provider = "memory".to_string();
        config.auth.token_secret = "integration-test-secret".to_string();
        config.uploads.directory = uploads.path().to_string_lossy().into_owned();

        let memory = MemoryDatabase::new();
        let db = Database::memory(memory.clone());
        let sink = LocalFileSink::new(&config.uploads)
            .await
            .expect("Failed to init upload sink");

        let state = AppState::new(config.clone(), db.clone(), Arc::new(sink));
        let router = precinct_api::build_app(state);

        Self {
            router,
            db,
            memory,
            config,
            _uploads: uploads,
        }
    }

    /// Insert an officer with [`PASSWORD`].
    pub async fn create_officer(&self, officer_id: &str, rank: Rank, designation: Option<&str>) {
        let password_hash = PasswordHasher::new()
            .hash_password(PASSWORD)
            .expect("Failed to hash password");
        self.db
            .officers
            .insert(NewOfficer {
                officer_id: officer_id.to_string(),
                name: format!("Officer {officer_id}"),
                gender: None,
                rank,
                designation: designation.map(String::from),
                email: None,
                phone: None,
                password_hash,
            })
            .await
            .expect("Failed to create test officer");
    }

    /// Create an officer and sign in as them.
    pub async fn signed_in(&self, officer_id: &str, rank: Rank, designation: Option<&str>) -> String {
        self.create_officer(officer_id, rank, designation).await;
        self.login(officer_id).await
    }

    /// Login and return the session token
    pub async fn login(&self, officer_id: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({
                    "officer_id": officer_id,
                    "password": PASSWORD,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.data()["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Make a JSON HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a prepared request.
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            set_cookie,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// `Set-Cookie` header, if any
    pub set_cookie: Option<String>,
}

impl TestResponse {
    /// The `data` member of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The `message` member of an error body.
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}
