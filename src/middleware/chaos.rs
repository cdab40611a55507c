use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rand::Rng;
use serde_json::json;
use tracing::debug;

/// Fails a configurable fraction of mutating requests before they reach a
/// handler, so optimistic clients have real failures to reconcile against.
/// Reads are never failed.
#[derive(Clone, Debug)]
pub struct WriteChaos {
    failure_rate: f64,
    latency_ms: u64,
}

impl WriteChaos {
    fn new(failure_rate: f64, latency_ms: u64) -> Self {
        Self {
            failure_rate: failure_rate.clamp(0.0, 1.0),
            latency_ms,
        }
    }

    fn should_fail(&self) -> bool {
        self.failure_rate > 0.0 && rand::thread_rng().gen::<f64>() < self.failure_rate
    }

    fn latency(&self) -> Option<Duration> {
        if self.latency_ms == 0 {
            return None;
        }
        Some(Duration::from_millis(
            rand::thread_rng().gen_range(0..=self.latency_ms),
        ))
    }
}

fn is_write(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PATCH | Method::PUT | Method::DELETE
    )
}

pub async fn chaos_middleware(
    State(state): State<WriteChaos>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if is_write(req.method()) {
        if let Some(delay) = state.latency() {
            tokio::time::sleep(delay).await;
        }
        if state.should_fail() {
            debug!(method = %req.method(), uri = %req.uri(), "injected write failure");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Random write failure" })),
            )
                .into_response();
        }
    }
    next.run(req).await
}

pub fn new_chaos_state(failure_rate: f64, latency_ms: u64) -> WriteChaos {
    WriteChaos::new(failure_rate, latency_ms)
}
