#![allow(dead_code)]

use axum::Router;
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::routing::{get, post};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// A request as seen by the fake Librato endpoint
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone, Default)]
pub struct Captured {
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl Captured {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, path: &str, headers: &HeaderMap, body: String) {
        let header = |name: HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.requests.lock().unwrap().push(Recorded {
            path: path.to_string(),
            authorization: header(AUTHORIZATION),
            content_type: header(CONTENT_TYPE),
            body,
        });
    }
}

pub async fn spawn(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn json(body: &'static str) -> ([(HeaderName, &'static str); 1], &'static str) {
    ([(CONTENT_TYPE, "application/json")], body)
}

/// Serves metrics documents (and a few broken variants) over GET
pub async fn spawn_metrics_service() -> SocketAddr {
    let router = Router::new()
        .route(
            "/metrics",
            get(|| async {
                json(r#"{"memory":{"used":512.5,"free":128},"requests":{"total":42,"rate":1.5}}"#)
            }),
        )
        .route(
            "/created",
            get(|| async { (StatusCode::CREATED, json(r#"{"a":1}"#)) }),
        )
        .route("/empty", get(|| async { StatusCode::NO_CONTENT }))
        .route(
            "/down",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        )
        .route("/array", get(|| async { json("[1, 2, 3]") }))
        .route("/garbage", get(|| async { "<html>oops</html>" }));

    spawn(router).await
}

/// Fake Librato API: `/v1/metrics` accepts, `/reject` answers 401, `/created` 201
pub async fn spawn_librato(captured: Captured) -> SocketAddr {
    async fn accept(State(c): State<Captured>, headers: HeaderMap, body: String) -> StatusCode {
        c.record("/v1/metrics", &headers, body);
        StatusCode::OK
    }

    async fn reject(
        State(c): State<Captured>,
        headers: HeaderMap,
        body: String,
    ) -> (StatusCode, &'static str) {
        c.record("/reject", &headers, body);
        (StatusCode::UNAUTHORIZED, "invalid credentials")
    }

    async fn created(State(c): State<Captured>, headers: HeaderMap, body: String) -> StatusCode {
        c.record("/created", &headers, body);
        StatusCode::CREATED
    }

    let router = Router::new()
        .route("/v1/metrics", post(accept))
        .route("/reject", post(reject))
        .route("/created", post(created))
        .with_state(captured);

    spawn(router).await
}

/// An address nothing is listening on
pub async fn closed_port() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
