#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use studyhub_api::auth::jwt::{generate_access_token, JwtConfig};
use studyhub_api::config::ServerConfig;
use studyhub_api::router::build_app_router;
use studyhub_api::state::AppState;
use studyhub_core::memory::InMemoryCatalogStore;
use studyhub_core::roles::{ROLE_ADMIN, ROLE_USER};
use studyhub_core::store::UserStore;
use studyhub_core::types::DbId;
use studyhub_core::user::CreateUser;

pub const ADMIN_EMAIL: &str = "admin@studyhub.test";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        admin_emails: vec![ADMIN_EMAIL.to_string()],
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Router plus a handle on its in-memory store for setup and fault injection.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryCatalogStore>,
    pub config: ServerConfig,
}

/// Build the full application router over a fresh in-memory store.
///
/// Uses the same [`build_app_router`] as the binary, so requests pass
/// through the production middleware stack.
pub fn build_test_app() -> TestApp {
    let config = test_config();
    let store = Arc::new(InMemoryCatalogStore::new());
    let state = AppState::new(store.clone(), config.clone());
    TestApp {
        router: build_app_router(state, &config),
        store,
        config,
    }
}

impl TestApp {
    /// Insert a user straight into the store and mint a token for it.
    ///
    /// Skips password hashing; use the auth endpoints when the password matters.
    pub async fn seed_user(&self, email: &str, admin: bool) -> (DbId, String) {
        let role = if admin { ROLE_ADMIN } else { ROLE_USER };
        let user = self
            .store
            .create_user(&CreateUser {
                name: email.split('@').next().unwrap_or("user").to_string(),
                email: email.to_string(),
                password_hash: "unused".to_string(),
                role: role.to_string(),
            })
            .await
            .expect("seeding a user should succeed");
        let token = generate_access_token(user.id, role, &self.config.jwt)
            .expect("token generation should succeed");
        (user.id, token)
    }

    pub async fn admin_token(&self) -> String {
        self.seed_user(ADMIN_EMAIL, true).await.1
    }

    pub async fn user_token(&self) -> String {
        self.seed_user("student@studyhub.test", false).await.1
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

/// POST an arbitrary body verbatim, with an optional content type.
pub async fn post_raw(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    content_type: Option<&str>,
    body: &'static str,
) -> Response {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    app.clone()
        .oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> Response {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn put_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send(app, Method::PUT, uri, token, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, token: Option<&str>) -> Response {
    send(app, Method::PUT, uri, token, None).await
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> Response {
    send(app, Method::DELETE, uri, token, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
