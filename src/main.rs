use cat_catalog::core::app::build_app;
use cat_catalog::core::config::{Config, StoreBackend};
use cat_catalog::core::database;
use cat_catalog::features::cats::store::{CatStore, InMemoryCatStore, PgCatStore};
use cat_catalog::features::cats::CatService;
use cat_catalog::modules::storage::LocalUploadSink;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

/// Build the record store selected by configuration
async fn create_store(config: &Config) -> anyhow::Result<Arc<dyn CatStore>> {
    match config.database.backend {
        StoreBackend::Memory => {
            let store = if config.database.seed_memory_store {
                InMemoryCatStore::seeded()
            } else {
                InMemoryCatStore::new()
            };
            tracing::info!(
                "In-memory store initialized (seeded: {})",
                config.database.seed_memory_store
            );
            Ok(Arc::new(store))
        }
        StoreBackend::Postgres => {
            let pool = database::create_pool(&config.database).await?;
            tracing::info!(
                "Database connection pool created: {}",
                config.database.redacted_url()
            );

            tracing::info!("Running database migrations...");
            database::run_migrations(&pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
            tracing::info!("Database migrations completed successfully");

            Ok(Arc::new(PgCatStore::new(pool)))
        }
    }
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    let store = create_store(&config).await?;

    // Upload sink writes into the directory served under /uploads
    let upload_sink = LocalUploadSink::new(&config.upload.dir, config.upload.naming);
    upload_sink
        .ensure_dir()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to prepare upload directory: {}", e))?;
    tracing::info!(
        "Upload sink initialized: dir={}, naming={:?}",
        config.upload.dir.display(),
        config.upload.naming
    );

    if config.app.expose_error_details {
        tracing::warn!("Store error details are returned to clients (EXPOSE_ERROR_DETAILS=true)");
    }

    let cat_service = Arc::new(CatService::new(
        Arc::clone(&store),
        Arc::new(upload_sink),
        config.app.expose_error_details,
    ));
    tracing::info!("Cat service initialized ({} store)", store.backend());

    let app = build_app(&config, cat_service, store);

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
