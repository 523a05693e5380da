//! Loopback HTTP server for integration tests.
//!
//! An axum router answering every path with a scripted list of responses,
//! one per request, repeating the last one once the script runs out.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;

struct Script {
    responses: Vec<(u16, Vec<u8>)>,
    hits: AtomicUsize,
}

pub struct TestServer {
    addr: SocketAddr,
    script: Arc<Script>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Number of requests answered so far.
    pub fn hits(&self) -> usize {
        self.script.hits.load(Ordering::SeqCst)
    }
}

/// Start a server answering with `(status, body)` pairs in order.
pub async fn serve(responses: Vec<(u16, Vec<u8>)>) -> TestServer {
    assert!(!responses.is_empty(), "script at least one response");
    let script = Arc::new(Script {
        responses,
        hits: AtomicUsize::new(0),
    });

    let app = Router::new()
        .fallback(scripted)
        .with_state(Arc::clone(&script));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    TestServer { addr, script }
}

async fn scripted(State(script): State<Arc<Script>>) -> Response {
    let n = script.hits.fetch_add(1, Ordering::SeqCst);
    let (status, body) = script.responses[n.min(script.responses.len() - 1)].clone();
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/pdf")], body).into_response()
}
