//! # DeckForge Server Library
//!
//! Shared state and handlers for the DeckForge server. The library is used
//! by both the binary and the integration tests.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use deck_core::store::SlideStore;
use deck_templates::apply::TemplateEngine;

pub mod clients;
pub mod health;
pub mod metrics;
pub mod routes;
pub mod validation;

pub use clients::{BrandKitClient, HttpContentGenerator};

/// Build the API router (health probes + slide/template/export routes)
/// over shared state. The binary layers CORS, tracing, request ids, and
/// the metrics endpoint on top.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/api/slides", get(routes::list_slides))
        .route(
            "/api/slides/{id}",
            get(routes::get_slide)
                .put(routes::put_slide)
                .delete(routes::delete_slide),
        )
        .route("/api/templates", get(routes::list_templates))
        .route("/api/slides/apply-template", post(routes::apply_template))
        .route("/api/export", post(routes::export))
        .with_state(state)
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Slide document store.
    pub store: SlideStore,
    /// Template application engine.
    pub engine: Arc<TemplateEngine>,
    /// Optional brand-kit service client.
    pub brand: Option<BrandKitClient>,
}

impl AppState {
    /// Build state over a store and engine.
    #[must_use]
    pub fn new(store: SlideStore, engine: Arc<TemplateEngine>) -> Self {
        Self {
            store,
            engine,
            brand: None,
        }
    }

    /// Attach a brand-kit service client.
    #[must_use]
    pub fn with_brand_client(mut self, brand: BrandKitClient) -> Self {
        self.brand = Some(brand);
        self
    }
}
