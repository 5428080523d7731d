#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use books_db::{create_pool, run_migrations, DbPool, DbRuntimeSettings};
use books_server::{app, AppState};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// A router over a fresh on-disk database. Keep `_dir` alive for the test.
pub struct TestApp {
    pub router: Router,
    pub pool: DbPool,
    _dir: TempDir,
}

pub fn setup_app() -> TestApp {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("books.db");
    let pool = create_pool(
        path.to_str().expect("utf-8 temp path"),
        DbRuntimeSettings::default(),
    )
    .expect("failed to create pool");
    {
        let conn = pool.get().expect("failed to get connection");
        run_migrations(&conn).expect("failed to run migrations");
    }

    TestApp {
        router: app(AppState { pool: pool.clone() }),
        pool,
        _dir: dir,
    }
}

impl TestApp {
    pub async fn send(&self, method: &str, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn create(&self, title: &str, pages: i64) {
        let (status, _) = self
            .send("POST", &format!("/books?title={title}&pages={pages}"))
            .await;
        assert_eq!(status, StatusCode::OK, "seeding {title} should succeed");
    }

    pub fn seed(&self, count: usize) {
        let conn = self.pool.get().unwrap();
        for i in 0..count {
            conn.execute(
                "INSERT INTO books (title, pages, created_at) VALUES (?1, ?2, '2024-01-01')",
                rusqlite::params![format!("Book {i}"), 100 + i as i64],
            )
            .unwrap();
        }
    }
}

pub fn success() -> Value {
    serde_json::json!({"status_code": 200, "message": "success"})
}

pub fn internal_error() -> Value {
    serde_json::json!({"status_code": 500, "message": "Internal Server Error"})
}

pub fn ids(body: &Value) -> Vec<i64> {
    body["result"]["books"]
        .as_array()
        .expect("books should be an array")
        .iter()
        .map(|b| b["id"].as_i64().expect("id should be an integer"))
        .collect()
}
