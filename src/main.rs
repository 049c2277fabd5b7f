use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use interview_qa::{
    config::{Config, StorageBackend},
    create_router,
    services::PdfTextExtractor,
    storage::{InterviewRepository, MemoryRepository, PostgresRepository},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "interview_qa=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting Interview Q&A Service");
    tracing::info!("Max file size: {}MB", config.max_file_size_mb);

    let repository: Arc<dyn InterviewRepository> = match config.storage_backend {
        StorageBackend::Postgres => {
            let repo = PostgresRepository::connect(&config.database_url)?;
            // Warm-up only: the first insert retries the schema step, so an
            // unreachable database is not fatal.
            match repo.ensure_schema().await {
                Ok(()) => tracing::info!("Document store connected successfully"),
                Err(e) => tracing::error!("Document store connection error: {}", e),
            }
            Arc::new(repo)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; records are lost on restart");
            Arc::new(MemoryRepository::new())
        }
    };

    let state = AppState::new(Arc::new(PdfTextExtractor::new()), repository, &config);
    let app = create_router(state, &config)?;

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
