mod config;
mod content;
mod error;
mod game;
mod models;
mod routes;
mod utils;

use std::{sync::Arc, time::Duration};

use anyhow::Result;
use axum::Router;
use config::Config;
use content::{ContentProvider, FallbackProvider, GeminiProvider};
use dashmap::DashMap;
use game::{GridGenerator, Round};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// How often expired rounds are swept
pub const ROUND_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub generator: GridGenerator,
    pub content: Arc<dyn ContentProvider>,
    /// Rounds in progress, keyed by round id
    pub rounds: DashMap<Uuid, Round>,
}

impl AppState {
    pub fn new(config: Config, content: Arc<dyn ContentProvider>) -> Result<Self> {
        let generator = GridGenerator::new(config.game.grid_size, config.game.max_attempts)?;
        Ok(Self {
            config,
            generator,
            content,
            rounds: DashMap::new(),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "word_seeker_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Word Seeker backend server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        "Configuration loaded ({}x{} grid, {} placement attempts per word)",
        config.game.grid_size,
        config.game.grid_size,
        config.game.max_attempts
    );

    let content: Arc<dyn ContentProvider> = match &config.content.api_key {
        Some(api_key) => {
            let http_client = reqwest::Client::builder()
                .timeout(Duration::from_secs(config.content.timeout_secs))
                .build()?;
            tracing::info!("Fetching word themes from {}", config.content.model);
            Arc::new(GeminiProvider::new(
                http_client,
                &config.content,
                api_key.clone(),
            ))
        }
        None => {
            tracing::warn!("GEMINI_API_KEY is not set. Serving built-in word list only.");
            Arc::new(FallbackProvider)
        }
    };

    let state = Arc::new(AppState::new(config.clone(), content)?);

    // Spawn background task to drop rounds nobody finished
    let cleanup_state = state.clone();
    tokio::spawn(async move {
        round_cleanup_task(cleanup_state).await;
    });

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::create_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Background task that periodically removes expired rounds
async fn round_cleanup_task(state: Arc<AppState>) {
    let mut interval = tokio::time::interval(ROUND_CLEANUP_INTERVAL);

    loop {
        interval.tick().await;

        let removed = evict_expired_rounds(&state.rounds, state.config.round_ttl());
        if removed > 0 {
            tracing::info!("Removed {} expired rounds", removed);
        }
    }
}

/// Drop every round older than `ttl`, returning how many were removed
fn evict_expired_rounds(rounds: &DashMap<Uuid, Round>, ttl: Duration) -> usize {
    let before = rounds.len();
    rounds.retain(|_, round| round.created_at.elapsed() < ttl);
    before.saturating_sub(rounds.len())
}
