mod config;
mod part;
mod routes;
mod services;
mod source;
mod state;
mod table;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::AppConfig::from_env().expect("invalid configuration");
    let source = source::from_config(&config).expect("data source init failed");
    tracing::info!(source = source.name(), api_base = ?config.api_base, "data source ready");
    if config.source == config::SourceKind::Live && config.api_base.is_none() {
        tracing::warn!("PARTSDASH_API_BASE not set; live fetches will fail until it is configured");
    }

    let state = state::AppState::new(source, config.chat_delay);

    // Spawn background eviction of abandoned table sessions.
    let _sweeper =
        services::inventory::spawn_session_sweeper(state.clone(), config.session_idle, config.session_sweep);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "partsdash listening");
    axum::serve(listener, app).await.expect("server failed");
}
