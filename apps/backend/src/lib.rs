pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use verse_core::{GradingSettings, InMemoryVerses, ProgressTracker, RecallSession, VerseRecord};

use crate::config::Config;
use crate::services::progress::{spawn_progress_worker, ChannelSink};

pub type VerseSession = RecallSession<InMemoryVerses, ChannelSink>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<VerseSession>,
    pub tracker: Arc<RwLock<ProgressTracker>>,
    pub hint_revealed_words: usize,
}

impl AppState {
    /// Build the state and start the progress worker.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(
        verses: Vec<VerseRecord>,
        grading: GradingSettings,
        hint_revealed_words: usize,
    ) -> verse_core::Result<Self> {
        let tracker = Arc::new(RwLock::new(ProgressTracker::new()));
        let (sink, _worker) = spawn_progress_worker(tracker.clone());
        let session = RecallSession::new(InMemoryVerses::new(verses), sink, grading)?;

        Ok(Self {
            session: Arc::new(session),
            tracker,
            hint_revealed_words,
        })
    }
}

/// Build the full router over the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Verse routes
        .route("/api/verses", get(routes::verses::list))
        .route("/api/verses/:id", get(routes::verses::get))
        .route("/api/verses/:id/hint", get(routes::verses::get_hint))
        // Exercise routes
        .route("/api/exercises", post(routes::exercises::create))
        .route("/api/exercises/grade", post(routes::exercises::grade))
        // Recall & progress routes
        .route("/api/recall", post(routes::progress::recall))
        .route("/api/progress", get(routes::progress::list))
        .route("/api/progress/:id", get(routes::progress::get))
        .route("/api/similarity", post(routes::similarity::compare))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Loading verses...");
    let verses = config.load_verses()?;

    let state = AppState::new(verses, config.grading.clone(), config.hint_revealed_words)?;
    tracing::info!(verses = state.session.verses().len(), "Verse catalog ready");

    let app = build_router(state);
    let addr = config.addr();

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
