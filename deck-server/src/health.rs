//! Health check endpoints for container orchestration probes.
//!
//! - `/health/live` - Liveness probe (restart if fails)
//! - `/health/ready` - Readiness probe (remove from LB if fails)

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

/// Health status response.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// Overall status: "healthy" or "unhealthy"
    pub status: &'static str,
    /// Server version
    pub version: &'static str,
    /// Individual component checks
    pub checks: HealthChecks,
}

/// Individual health checks.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    /// Slide store accessible
    pub slide_store: bool,
    /// Template registry populated
    pub templates: bool,
}

/// Liveness probe - is the server running?
#[tracing::instrument(name = "liveness_probe")]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe - is the server ready to accept traffic?
///
/// Exercises the store lock and checks that templates are registered.
#[tracing::instrument(name = "readiness_probe", skip(state))]
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let store_ok = {
        // Taking the length exercises the RwLock.
        let _ = state.store.len();
        true
    };
    let templates_ok = !state.engine.registry().is_empty();

    let all_ok = store_ok && templates_ok;
    let status = HealthStatus {
        status: if all_ok { "healthy" } else { "unhealthy" },
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks {
            slide_store: store_ok,
            templates: templates_ok,
        },
    };

    let code = if all_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}
