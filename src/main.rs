use announce_audio::controllers::generation::GenerationController;
use announce_audio::domain::generation::GenerationService;
use announce_audio::infrastructure::config::{Config, LogFormat};
use announce_audio::infrastructure::http::start_http_server;
use announce_audio::infrastructure::repositories::{
    AudioRepository, EntityRepository, HttpAudioRepository,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting announcement audio service on {}:{}",
        config.host,
        config.port
    );

    let settings = config.generation_settings();
    tracing::info!(
        backend = %config.audio_backend_url,
        batch_size = settings.batch_size,
        batch_delay_ms = settings.batch_delay.as_millis() as u64,
        poll_max_attempts = settings.poll_max_attempts,
        "Generation settings loaded"
    );

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Audio backend client
    let http_repo = Arc::new(HttpAudioRepository::new(
        &config.audio_backend_url,
        config.backend_timeout(),
    )?);
    let audio_repo: Arc<dyn AudioRepository> = http_repo.clone();
    let entity_repo: Arc<dyn EntityRepository> = http_repo;

    // 2. Services
    let generation_service = Arc::new(GenerationService::new(
        audio_repo,
        entity_repo.clone(),
        settings,
    ));

    // 3. Controllers
    let generation_controller = Arc::new(GenerationController::new(generation_service));

    start_http_server(Arc::new(config), entity_repo, generation_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "announce_audio=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
