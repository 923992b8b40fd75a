//! Readiness and liveness probes.
//!
//! Orchestrators poll these endpoints to decide when to route traffic and
//! when to restart the process; both responses are marked uncacheable so a
//! probe never sees a stale verdict.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, get, web};

/// Probe state shared across workers.
///
/// A fresh process is live but not yet ready; [`HealthState::mark_ready`]
/// flips readiness once the listener is bound, and [`HealthState::begin_drain`]
/// fails liveness so the orchestrator restarts or replaces the process.
#[derive(Default)]
pub struct HealthState {
    ready: AtomicBool,
    draining: AtomicBool,
}

impl HealthState {
    /// Fresh state: live, not ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start answering readiness probes with 200.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness probes from now on; used ahead of graceful shutdown.
    pub fn begin_drain(&self) {
        self.draining.store(true, Ordering::Release);
    }

    fn accepting_traffic(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    fn healthy(&self) -> bool {
        !self.draining.load(Ordering::Acquire)
    }
}

fn probe(ok: bool) -> HttpResponse {
    let status = if ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    HttpResponse::build(status)
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness probe: 200 once the listener is bound and ports are wired.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe(state.accepting_traffic())
}

/// Liveness probe: 200 until a drain begins.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe(state.healthy())
}
