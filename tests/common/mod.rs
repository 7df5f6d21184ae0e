#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde_json::Value;
use std::{
    collections::BTreeMap,
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

pub const OWNER: &str = "owner";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body was not json")
    }

    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    pub fn assert_redirect(&self, to: &str) {
        assert!(
            self.status.is_redirection(),
            "expected redirect, got {}",
            self.status
        );
        assert_eq!(self.location(), Some(to));
    }
}

/// Drives the router with a cookie store shared across requests.
pub struct TestApp {
    app: Router,
    cookies: BTreeMap<String, String>,
    db_path: PathBuf,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();

        let mut db_path = std::env::temp_dir();
        db_path.push(format!(
            "snipbox-test-{}-{}.sqlite",
            std::process::id(),
            nanos
        ));

        let database_url = format!("sqlite:{}", db_path.display());
        let storage = snipbox::db::SnippetStorage::open(&database_url)
            .await
            .expect("failed to open test database");

        let mut cfg = snipbox::Config::default();
        cfg.basic.owner_username = OWNER.to_string();
        cfg.basic.secret_key = "s".repeat(64);

        let state = snipbox::SnipboxState::new(storage, &cfg).expect("failed to build state");
        Self {
            app: snipbox::snipbox_router(state),
            cookies: BTreeMap::new(),
            db_path,
        }
    }

    /// Same server, fresh browser.
    pub fn forget_cookies(&mut self) {
        self.cookies.clear();
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&mut self, uri: &str) -> TestResponse {
        self.send(Method::POST, uri, None).await
    }

    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn signup(&mut self, username: &str, password: &str) -> TestResponse {
        self.post_form("/signup", &[("username", username), ("password", password)])
            .await
    }

    pub async fn login(&mut self, username: &str, password: &str) -> TestResponse {
        self.post_form("/login", &[("username", username), ("password", password)])
            .await
    }

    /// Sign up as the owner and add a snippet, returning its id.
    pub async fn owner_adds(&mut self, category: &str, title: &str, code: &str) -> i64 {
        self.post_form(
            "/admin/add",
            &[("category", category), ("title", title), ("code", code)],
        )
        .await
        .assert_redirect("/admin");
        let listing = self.get("/admin").await.json();
        listing["snippets"]
            .as_array()
            .expect("snippets array")
            .iter()
            .filter(|s| s["title"] == title)
            .filter_map(|s| s["id"].as_i64())
            .max()
            .expect("snippet was added")
    }

    /// GET with a hand-written `Cookie` header instead of the stored jar.
    pub async fn send_raw_cookie(&mut self, uri: &str, cookie: &str) -> TestResponse {
        let saved = std::mem::take(&mut self.cookies);
        for pair in cookie.split(';') {
            if let Some((k, v)) = pair.trim().split_once('=') {
                self.cookies.insert(k.to_string(), v.to_string());
            }
        }
        let resp = self.get(uri).await;
        self.cookies = saved;
        resp
    }

    async fn send(&mut self, method: Method, uri: &str, form: Option<String>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if !self.cookies.is_empty() {
            let cookie = self
                .cookies
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(header::COOKIE, cookie);
        }
        let body = match form {
            Some(form) => {
                builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(form)
            }
            None => Body::empty(),
        };

        let resp = self
            .app
            .clone()
            .oneshot(builder.body(body).expect("failed to build request"))
            .await
            .expect("request failed");

        self.store_cookies(resp.headers());
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read response body")
            .to_vec();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    fn store_cookies(&mut self, headers: &HeaderMap) {
        for value in headers.get_all(header::SET_COOKIE) {
            let Ok(value) = value.to_str() else { continue };
            let pair = value.split(';').next().unwrap_or_default();
            let Some((name, val)) = pair.split_once('=') else {
                continue;
            };
            let removed = val.is_empty() || value.to_ascii_lowercase().contains("max-age=0");
            if removed {
                self.cookies.remove(name.trim());
            } else {
                self.cookies
                    .insert(name.trim().to_string(), val.trim().to_string());
            }
        }
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.db_path);
    }
}

fn encode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for b in raw.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}
