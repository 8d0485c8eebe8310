//! Shared helpers for router-level tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use prorep::{
    config::{AuthConfig, Config, LogFormat, ServerConfig, StoreBackend, StoreConfig},
    db::MemoryStore,
    guard::RouteTable,
    services::{LogMailer, Mailer},
    AppResult, AppState,
};

pub const ADMIN_CODE: &str = "admin-code";
pub const EDIT_CODE: &str = "edit-me";

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            rust_log: "debug".into(),
            log_format: LogFormat::Pretty,
            request_timeout_secs: 30,
            public_base_url: "http://localhost:8080".into(),
        },
        store: StoreConfig {
            backend: StoreBackend::Memory,
            database_url: None,
            max_connections: 1,
        },
        auth: AuthConfig {
            jwt_secret: "integration-secret".into(),
            session_ttl_days: 7,
            admin_signup_code: Some(ADMIN_CODE.into()),
            problem_edit_code: Some(EDIT_CODE.into()),
            reset_token_ttl_minutes: 30,
        },
    }
}

pub fn test_app() -> Router {
    test_app_with_mailer(Arc::new(LogMailer))
}

pub fn test_app_with_mailer(mailer: Arc<dyn Mailer>) -> Router {
    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        test_config(),
        RouteTable::canonical(),
        mailer,
    );
    prorep::app(state)
}

/// Keeps every reset link it is asked to deliver
#[derive(Default)]
pub struct OutboxMailer {
    links: Mutex<Vec<String>>,
}

impl OutboxMailer {
    /// Token of the most recent link
    pub fn last_token(&self) -> Option<String> {
        let links = self.links.lock().unwrap();
        links
            .last()
            .and_then(|link| link.split("token=").nth(1))
            .map(str::to_string)
    }
}

#[async_trait]
impl Mailer for OutboxMailer {
    async fn send_reset_link(&self, _email: &str, link: &str) -> AppResult<()> {
        self.links.lock().unwrap().push(link.to_string());
        Ok(())
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }

    /// `name=value` pairs from every `Set-Cookie`, joined for a `Cookie` header
    pub fn cookie_header(&self) -> String {
        self.set_cookies()
            .iter()
            .filter_map(|c| c.split(';').next())
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect()
    }
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    extra: &[(&str, &str)],
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    for (name, value) in extra {
        builder = builder.header(*name, *value);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> TestResponse {
    send(app, Method::GET, uri, cookie, &[], None).await
}

pub async fn post(app: &Router, uri: &str, cookie: Option<&str>, body: Value) -> TestResponse {
    send(app, Method::POST, uri, cookie, &[], Some(body)).await
}

/// Sign up and return the `Cookie` header for the new session
pub async fn sign_up(app: &Router, email: &str, role: &str) -> String {
    let mut body = serde_json::json!({
        "email": email,
        "password": "secret-pw",
        "role": role,
    });
    if role == "admin" {
        body["admin_code"] = ADMIN_CODE.into();
    }
    let res = post(app, "/signup", None, body).await;
    assert_eq!(res.status, StatusCode::CREATED, "{:?}", res.body);
    res.cookie_header()
}

/// Create a problem as the admin behind `cookie`, returning its id
pub async fn create_problem(app: &Router, cookie: &str, body: Value) -> String {
    let res = post(app, "/admin/problems", Some(cookie), body).await;
    assert_eq!(res.status, StatusCode::CREATED, "{:?}", res.body);
    res.body["id"].as_str().unwrap().to_string()
}
