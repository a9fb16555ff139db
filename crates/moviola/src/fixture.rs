//! Local HTTP fixture for integration tests: canned routes on an ephemeral
//! port, with per-path request counting.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    Router,
};
use tokio::net::TcpListener;

struct FixtureState {
    routes: HashMap<String, (u16, Vec<u8>)>,
    request_counts: Mutex<HashMap<String, usize>>,
}

pub struct TestServer {
    base_url: String,
    state: Arc<FixtureState>,
}

impl TestServer {
    /// Starts a server serving `path -> (status, body)` routes. Unknown
    /// paths return 404.
    pub async fn start(routes: Vec<(&str, u16, Vec<u8>)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://127.0.0.1:{}", addr.port());

        let state = Arc::new(FixtureState {
            routes: routes
                .into_iter()
                .map(|(path, status, body)| (path.to_string(), (status, body)))
                .collect(),
            request_counts: Mutex::new(HashMap::new()),
        });

        let app = Router::new().fallback(serve).with_state(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, state }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// How many requests hit the given path.
    pub fn request_count(&self, path: &str) -> usize {
        self.state
            .request_counts
            .lock()
            .unwrap()
            .get(path)
            .copied()
            .unwrap_or(0)
    }
}

async fn serve(State(state): State<Arc<FixtureState>>, uri: Uri) -> (StatusCode, Vec<u8>) {
    let path = uri.path().to_string();
    if let Ok(mut counts) = state.request_counts.lock() {
        *counts.entry(path.clone()).or_insert(0) += 1;
    }

    match state.routes.get(&path) {
        Some((status, body)) => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body.clone(),
        ),
        None => (StatusCode::NOT_FOUND, Vec::new()),
    }
}
