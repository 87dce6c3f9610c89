#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use couchcheck::couchdb::ServerConfig;
use std::{
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use tokio::net::TcpListener;

struct FakeState {
    status: StatusCode,
    body: String,
    delay: Duration,
    hits: AtomicUsize,
    authorization: Mutex<Option<String>>,
}

/// Minimal CouchDB stand-in serving `/_all_dbs` on a random loopback port
pub struct FakeCouchDb {
    addr: SocketAddr,
    state: Arc<FakeState>,
}

impl FakeCouchDb {
    pub async fn start(status: u16, body: &str) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    pub async fn start_with_delay(status: u16, body: &str, delay: Duration) -> Self {
        let state = Arc::new(FakeState {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
            delay,
            hits: AtomicUsize::new(0),
            authorization: Mutex::new(None),
        });

        let app = Router::new()
            .route("/_all_dbs", get(all_dbs))
            .with_state(state.clone());

        let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn authorization(&self) -> Option<String> {
        self.state.authorization.lock().unwrap().clone()
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::new("127.0.0.1", self.port())
    }
}

async fn all_dbs(State(state): State<Arc<FakeState>>, headers: HeaderMap) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);

    if let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        *state.authorization.lock().unwrap() = Some(value.to_string());
    }

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}

pub fn pick_free_port() -> u16 {
    std::net::TcpListener::bind(("127.0.0.1", 0))
        .expect("failed to bind random local port")
        .local_addr()
        .expect("failed to read local addr")
        .port()
}
