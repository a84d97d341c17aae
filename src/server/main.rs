//! Palace tour backend server.
//!
//! Exposes GPS-based landmark resolution, the community board, the tourism
//! data proxy, and narrative generation over HTTP.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ginkgo::config::Config;
use ginkgo::landmarks::LandmarkResolver;
use ginkgo::narrative::NarrativeClient;
use ginkgo::store::StoreClient;
use ginkgo::tour::TourClient;

mod error;
mod routes;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Palace tour backend server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:5006")]
    listen: String,

    /// Path to a TOML config file; defaults apply when omitted
    #[arg(short, long)]
    config: Option<String>,
}

/// Application state shared across handlers
pub struct AppState {
    pub resolver: LandmarkResolver,
    pub store: StoreClient,
    pub tour: TourClient,
    pub narrative: NarrativeClient,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };

    info!("Ginkgo Tour Server");

    let resolver = LandmarkResolver::builtin();
    info!(
        "Landmark resolver ready with {} catalog entries",
        resolver.catalog().len()
    );

    info!("Connecting to store at {}", config.store.node);
    let store = StoreClient::new(&config.store.node).await?;

    let state = Arc::new(AppState {
        resolver,
        store,
        tour: TourClient::new(config.tour.clone()),
        narrative: NarrativeClient::new(config.narrative.clone()),
    });

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/locate", post(routes::locate_handler))
        .route("/v1/landmarks", get(routes::list_landmarks_handler))
        .route("/v1/landmarks/{id}", get(routes::landmark_handler))
        .route(
            "/v1/landmarks/{id}/narrative",
            post(routes::narrative_handler),
        )
        .route("/v1/community/posts", post(routes::create_post_handler))
        .route(
            "/v1/community/posts/{board_id}",
            get(routes::list_posts_handler),
        )
        .route(
            "/v1/community/post/{post_id}",
            get(routes::post_detail_handler),
        )
        .route(
            "/v1/community/comments",
            post(routes::create_comment_handler),
        )
        .route(
            "/v1/community/like/{post_id}",
            post(routes::toggle_like_handler),
        )
        .route(
            "/v1/community/stats/{board_id}",
            get(routes::board_stats_handler),
        )
        .route("/v1/tour/nearby", get(routes::tour_nearby_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Starting server on {}", args.listen);

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let healthy = state.store.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: if healthy { "ok" } else { "degraded" },
        store: healthy,
    })
}

#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    store: bool,
}
