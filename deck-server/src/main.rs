//! # DeckForge Server
//!
//! Local embedded server for the DeckForge slide composition engine.
//! Binds to localhost only.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use url::Url;

use deck_core::store::SlideStore;
use deck_server::{clients, metrics, AppState, BrandKitClient};
use deck_templates::apply::TemplateEngine;
use deck_templates::content::{ContentGenerator, UnavailableGenerator};
use deck_templates::registry::TemplateRegistry;

/// Default port for the deck server.
const DEFAULT_PORT: u16 = 8453;

/// DeckForge slide composition server.
#[derive(Debug, Parser)]
#[command(name = "deckforge", version, about)]
struct Args {
    /// Port to bind on localhost.
    #[arg(long, env = "DECK_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Directory for slide persistence. In-memory only when omitted.
    #[arg(long, env = "DECK_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    /// Base URL of the AI content-generation service.
    #[arg(long, env = "DECK_CONTENT_SERVICE_URL")]
    content_service_url: Option<Url>,

    /// Base URL of the brand-kit service.
    #[arg(long, env = "DECK_BRAND_SERVICE_URL")]
    brand_service_url: Option<Url>,

    /// Seconds to wait on content generation before falling back.
    #[arg(long, env = "DECK_GENERATION_TIMEOUT_SECS", default_value_t = 20)]
    generation_timeout_secs: u64,
}

/// Build a CORS layer that only allows localhost origins.
fn build_cors_layer(port: u16) -> CorsLayer {
    let localhost_origins = [
        format!("http://localhost:{port}"),
        format!("http://127.0.0.1:{port}"),
        // Common dev-server ports
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:3000".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ];

    let origins: Vec<HeaderValue> = localhost_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// Initialize structured tracing with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default:
/// info,deck_server=debug,tower_http=debug). Set `RUST_LOG_FORMAT=json`
/// for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,deck_server=debug,tower_http=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

async fn metrics_handler(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}

/// Build the application router over shared state.
fn build_router(state: AppState, metrics_handle: PrometheusHandle, port: u16) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    deck_server::api_router(state)
        .merge(metrics_router)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(build_cors_layer(port))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let metrics_handle = metrics::init_metrics()
        .map_err(|e| anyhow::anyhow!("Failed to initialize Prometheus metrics: {e}"))?;

    let store = match &args.data_dir {
        Some(dir) => {
            tracing::info!("Persisting slides to {}", dir.display());
            SlideStore::with_data_dir(dir)?
        }
        None => SlideStore::new(),
    };

    let generator: Arc<dyn ContentGenerator> = match &args.content_service_url {
        Some(base) => {
            tracing::info!("Content generation via {base}");
            Arc::new(clients::HttpContentGenerator::new(base)?)
        }
        None => {
            tracing::info!("No content service configured; using placeholder fallback");
            Arc::new(UnavailableGenerator)
        }
    };

    let engine = TemplateEngine::new(Arc::new(TemplateRegistry::with_builtins()), generator)
        .with_generation_timeout(std::time::Duration::from_secs(args.generation_timeout_secs));

    let mut state = AppState::new(store, Arc::new(engine));
    if let Some(base) = args.brand_service_url.clone() {
        tracing::info!("Brand kits via {base}");
        state = state.with_brand_client(BrandKitClient::new(base)?);
    }

    let app = build_router(state, metrics_handle, args.port);

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("DeckForge server listening on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
