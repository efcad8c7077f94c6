#![allow(clippy::expect_used, dead_code)]
//! Test helpers for integration tests.
//!
//! Provides utilities for:
//! - Building an isolated service per test (each owns a fresh scheduler)
//! - Making HTTP requests
//! - Asserting on responses

use std::sync::Arc;

use salvo::http::header::HeaderName;
use salvo::http::{Method, ReqBody, StatusCode};
use salvo::prelude::*;
use salvo::test::{ResponseExt, TestClient};
use serde_json::Value;

use medsched_test::SchedulerHandler;
use medsched_test::component::Scheduler;
use medsched_test::component::config::{
    CalendarConfig, LoggingConfig, ServerConfig, Settings, StoreBackend, StoreConfig,
};

pub use tracing;

/// Test configuration - static struct instead of loading from file.
#[must_use]
pub fn test_config(seed_demo_data: bool) -> Settings {
    Settings {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5800,
            serve_origin: None,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
        store: StoreConfig {
            backend: StoreBackend::Memory,
            seed_demo_data,
            meetings_per_day: 4,
        },
        calendar: CalendarConfig::default(),
    }
}

/// Wraps `scheduler` in the same router `main` serves.
#[must_use]
pub fn service_for(scheduler: Scheduler) -> Service {
    let router = Router::new()
        .hoop(SchedulerHandler {
            scheduler: Arc::new(scheduler),
        })
        .push(medsched_test::app::api::routes());
    Service::new(router)
}

/// ## Summary
/// Creates a service over an empty in-memory scheduler.
///
/// Built fresh for every call so tests never share records.
#[must_use]
pub fn create_test_service() -> Service {
    service_for(Scheduler::in_memory(chrono_tz::UTC))
}

/// Creates a service over a scheduler in `tz`.
#[must_use]
pub fn create_test_service_in(tz: chrono_tz::Tz) -> Service {
    service_for(Scheduler::in_memory(tz))
}

/// ## Summary
/// Creates a service seeded with the demo hospitals and meetings.
///
/// ## Panics
/// Panics if the scheduler cannot be built from the test configuration.
#[must_use]
pub fn create_seeded_test_service() -> Service {
    let scheduler = Scheduler::new(&test_config(true)).expect("test config should be valid");
    service_for(scheduler)
}

/// Test request builder for constructing HTTP requests.
pub struct TestRequest {
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl TestRequest {
    /// Creates a new test request with the given method and path.
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Adds a header to the request.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets a JSON request body.
    #[must_use]
    pub fn json_body(self, value: &Value) -> Self {
        self.header("Content-Type", "application/json; charset=utf-8")
            .body(value.to_string().into_bytes())
    }

    /// Sends the request to the test service and returns the response.
    pub async fn send(self, service: &Service) -> TestResponse {
        let url = format!("http://127.0.0.1:5800{}", self.path);

        let mut client = match self.method.as_str() {
            "POST" => TestClient::post(&url),
            "PUT" => TestClient::put(&url),
            "DELETE" => TestClient::delete(&url),
            _ => TestClient::get(&url),
        };

        for (name, value) in self.headers {
            if let Ok(header_name) = HeaderName::try_from(name.as_str()) {
                client = client.add_header(header_name, value, true);
            }
        }

        if let Some(body_bytes) = self.body {
            client = client.body(ReqBody::Once(body_bytes.into()));
        }

        let mut response = client.send(service).await;

        let status = response
            .status_code
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Vec<u8> = response.take_bytes(None).await.unwrap_or_default().to_vec();

        TestResponse { status, body }
    }
}

/// Represents an HTTP test response for assertions.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Asserts that the response status matches the expected code.
    #[must_use]
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {expected} but got {}: {}",
            self.status,
            self.body_string()
        );
        self
    }

    /// Asserts that the response body contains the expected substring.
    #[must_use]
    pub fn assert_body_contains(self, expected: &str) -> Self {
        let body = String::from_utf8_lossy(&self.body);
        assert!(
            body.contains(expected),
            "Expected body to contain '{expected}' but got:\n{body}"
        );
        self
    }

    /// Returns the body as a UTF-8 string.
    #[must_use]
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// ## Panics
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body should be JSON")
    }

    /// ## Panics
    /// Panics if the body is not a JSON array.
    #[must_use]
    pub fn json_array(&self) -> Vec<Value> {
        match self.json() {
            Value::Array(items) => items,
            other => panic!("Expected JSON array but got {other}"),
        }
    }
}

/// Minimal valid meeting form at `date_time`.
#[must_use]
pub fn meeting_form(doctor: &str, date_time: &str) -> Value {
    serde_json::json!({
        "doctorName": doctor,
        "hospitalId": "hospital-1",
        "hospitalName": "City General Hospital",
        "hospitalAddress": "1234 Health Street, New York",
        "dateTime": date_time,
        "purpose": "Product demo",
    })
}

/// ## Summary
/// POSTs `form` to `/api/meetings` and returns the created meeting.
///
/// ## Panics
/// Panics unless the meeting is created.
pub async fn create_meeting(service: &Service, form: &Value) -> Value {
    TestRequest::post("/api/meetings")
        .json_body(form)
        .send(service)
        .await
        .assert_status(StatusCode::CREATED)
        .json()
}

/// Returns the `id` field of a record.
#[must_use]
pub fn id_of(record: &Value) -> String {
    record["id"].as_str().expect("record should have an id").to_string()
}
