//! Loopback axum server standing in for the contact API in tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use tokio::net::TcpListener;

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

type Routes = HashMap<(String, String), (u16, String)>;

#[derive(Clone, Default)]
struct Shared {
    routes: Arc<Mutex<Routes>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct StubServer {
    addr: std::net::SocketAddr,
    shared: Shared,
}

impl StubServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shared = Shared::default();

        // Routes are registered after start, so every request goes through one lookup handler
        let router = axum::Router::new()
            .fallback(respond)
            .with_state(shared.clone());

        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        StubServer { addr, shared }
    }

    /// Answer `method path` with a fixed status and JSON body
    pub fn route(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.shared.routes.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            (status, body.to_string()),
        );
        self
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.shared
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }
}

async fn respond(
    State(shared): State<Shared>,
    method: Method,
    uri: Uri,
    body: String,
) -> impl IntoResponse {
    let key = (method.to_string(), uri.path().to_string());
    let (status, reply) = shared
        .routes
        .lock()
        .unwrap()
        .get(&key)
        .cloned()
        .unwrap_or((404, r#"{"error":"Not found"}"#.to_string()));

    shared.requests.lock().unwrap().push(RecordedRequest {
        method: key.0,
        path: key.1,
        body,
    });

    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        reply,
    )
}

/// URL of a port nothing listens on
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
