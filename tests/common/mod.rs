//! In-process stand-in for the Netro API.
//!
//! Serves canned responses per endpoint file (e.g. `info.json`) and records
//! every request it receives so tests can assert on the exact wire shape.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, Method, StatusCode},
    routing::any,
    Router,
};
use netro_client::{ClientConfig, NetroClient};
use serde_json::Value;

pub const API_KEY: &str = "test-key-0001";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    /// Endpoint file name, e.g. `water.json`.
    pub file: String,
    pub query: HashMap<String, String>,
    pub content_type: Option<String>,
    pub accept: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
struct Shared {
    requests: Arc<Mutex<Vec<Recorded>>>,
    responses: Arc<Mutex<HashMap<String, (u16, String)>>>,
}

pub struct MockNetro {
    base_url: String,
    shared: Shared,
}

impl MockNetro {
    pub fn start() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let shared = Shared::default();
        let app = Router::new()
            .route("/npa/v1/{file}", any(handle))
            .with_state(shared.clone());

        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                axum::serve(listener, app).await
            })
            .unwrap();
        });

        MockNetro {
            base_url: format!("http://{addr}/npa/v1"),
            shared,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn client(&self) -> NetroClient {
        NetroClient::from_config(ClientConfig::new(API_KEY).with_base_url(self.base_url.clone()))
    }

    pub fn respond(&self, file: &str, status: u16, body: impl Into<String>) {
        self.shared
            .responses
            .lock()
            .unwrap()
            .insert(file.to_string(), (status, body.into()));
    }

    /// Answer `file` with the fixture of the same name under `tests/data`.
    pub fn respond_fixture(&self, file: &str, fixture: &str) {
        let body = std::fs::read_to_string(format!("tests/data/{fixture}")).expect("fixture present");
        self.respond(file, 200, body);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.shared.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> Recorded {
        self.requests().pop().expect("at least one request")
    }
}

async fn handle(
    State(shared): State<Shared>,
    Path(file): Path<String>,
    method: Method,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let header_str = |name: header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);
    let recorded = Recorded {
        method: method.to_string(),
        file: file.clone(),
        query,
        content_type: header_str(header::CONTENT_TYPE),
        accept: header_str(header::ACCEPT),
        body: if body.is_empty() {
            None
        } else {
            serde_json::from_slice(&body).ok()
        },
    };
    shared.requests.lock().unwrap().push(recorded);

    let canned = shared.responses.lock().unwrap().get(&file).cloned();
    let (status, body) = canned.unwrap_or((404, String::from("not found")));
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
}
