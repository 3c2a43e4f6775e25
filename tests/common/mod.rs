#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use chrono::Utc;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use porch::auth::generate_token;
use porch::server::{AppState, create_router};
use porch::store::{SqliteStore, Store};
use porch::types::{Pipeline, Role, Token};

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// A router over a fresh database with one power user, one runner scoped
/// to `ptest one` and one regular user without a pipeline.
pub struct TestApp {
    pub temp_dir: TempDir,
    pub store: Arc<SqliteStore>,
    pub router: Router,
    pub admin: Token,
    pub runner: Token,
    pub orphan: Token,
}

pub fn ptest_one() -> Pipeline {
    Pipeline {
        name: "ptest one".to_string(),
        uri: "https://github.com/wtsi-npg/ptest".to_string(),
        version: "0.3.14".to_string(),
    }
}

pub fn ptest_two() -> Pipeline {
    Pipeline {
        name: "ptest two".to_string(),
        uri: "https://github.com/wtsi-npg/ptest-two".to_string(),
        version: "1.0.0".to_string(),
    }
}

fn issue(store: &SqliteStore, description: &str, role: Role, pipeline: Option<Pipeline>) -> Token {
    let token = Token {
        id: Uuid::new_v4().to_string(),
        token: generate_token(),
        description: description.to_string(),
        role,
        pipeline,
        date_issued: Utc::now(),
        date_revoked: None,
    };
    store.create_token(&token).expect("create token");
    token
}

impl TestApp {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let store = Arc::new(SqliteStore::new(temp_dir.path().join("porch.db")).expect("open store"));
        store.initialize().expect("initialize store");

        store.create_pipeline(&ptest_one()).expect("create ptest one");
        store.create_pipeline(&ptest_two()).expect("create ptest two");

        let admin = issue(&store, "Seqfarm host, admin", Role::PowerUser, None);
        let runner = issue(&store, "Seqfarm host, job runner", Role::RegularUser, Some(ptest_one()));
        let orphan = issue(&store, "Unassigned host", Role::RegularUser, None);

        let router = create_router(Arc::new(AppState::new(store.clone())));

        Self {
            temp_dir,
            store,
            router,
            admin,
            runner,
            orphan,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).expect("serialize body")))
                .expect("build request"),
            None => builder.body(Body::empty()).expect("build request"),
        };

        self.send(request).await
    }

    /// GET with a raw `Authorization` header value.
    pub async fn get_with_authorization(&self, uri: &str, authorization: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(header::AUTHORIZATION, authorization)
            .body(Body::empty())
            .expect("build request");

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("route request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }
}
