#[cfg(test)]
use async_trait::async_trait;

#[cfg(test)]
use crate::features::cats::models::{Cat, NewCat};
#[cfg(test)]
use crate::features::cats::store::{CatStore, StoreError};
#[cfg(test)]
use crate::modules::storage::{UploadError, UploadSink};

/// Store whose backend is always down
#[cfg(test)]
pub struct UnavailableStore;

#[cfg(test)]
impl UnavailableStore {
    fn error() -> StoreError {
        StoreError::Unavailable("connection refused (os error 111)".to_string())
    }
}

#[cfg(test)]
#[async_trait]
impl CatStore for UnavailableStore {
    async fn list_all(&self) -> Result<Vec<Cat>, StoreError> {
        Err(Self::error())
    }

    async fn insert(&self, _cat: NewCat) -> Result<i64, StoreError> {
        Err(Self::error())
    }

    async fn update_status(&self, _id: i64, _status: &str) -> Result<(), StoreError> {
        Err(Self::error())
    }

    async fn delete(&self, _id: i64) -> Result<(), StoreError> {
        Err(Self::error())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(Self::error())
    }

    fn backend(&self) -> &'static str {
        "unavailable"
    }
}

/// Upload sink that can never write
#[cfg(test)]
pub struct FailingUploadSink;

#[cfg(test)]
#[async_trait]
impl UploadSink for FailingUploadSink {
    async fn store(&self, _data: &[u8], _extension: Option<&str>) -> Result<String, UploadError> {
        Err(UploadError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "no space left on device",
        )))
    }
}

/// Application under test. The temp directory backing it is removed on drop.
#[cfg(test)]
pub struct TestApp {
    pub router: axum::Router,
    pub root: tempfile::TempDir,
    pub base_url: String,
}

/// Configuration pointing every directory into `root`
#[cfg(test)]
pub fn test_config(root: &std::path::Path) -> crate::core::config::Config {
    use crate::core::config::{
        AppConfig, Config, DatabaseConfig, StoreBackend, SwaggerConfig, UploadConfig,
    };
    use crate::modules::storage::UploadNaming;

    Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_allowed_origins: vec!["*".to_string()],
            max_request_body_size: 1024 * 1024,
            frontend_dir: root.join("frontend"),
            expose_error_details: true,
        },
        database: DatabaseConfig {
            backend: StoreBackend::Memory,
            seed_memory_store: false,
            url: String::new(),
            max_connections: 1,
            min_connections: 0,
            acquire_timeout_secs: 1,
            idle_timeout_secs: 1,
            max_lifetime_secs: 1,
        },
        upload: UploadConfig {
            dir: root.join("uploads"),
            naming: UploadNaming::Uuid,
        },
        swagger: SwaggerConfig {
            username: None,
            password: None,
            title: "Cat Catalog API".to_string(),
            version: "0.1.0".to_string(),
            description: "test".to_string(),
        },
    }
}

/// Full application router over `store`, with a landing page on disk
#[cfg(test)]
pub async fn build_test_app(store: std::sync::Arc<dyn CatStore>) -> TestApp {
    use crate::core::app::{build_app, LANDING_PAGE};
    use crate::features::cats::CatService;
    use crate::modules::storage::LocalUploadSink;
    use std::sync::Arc;

    let root = tempfile::Builder::new()
        .prefix("cat-catalog-test-")
        .tempdir()
        .unwrap();
    let config = test_config(root.path());

    tokio::fs::create_dir_all(&config.app.frontend_dir)
        .await
        .unwrap();
    tokio::fs::write(
        config.app.frontend_dir.join(LANDING_PAGE),
        "<h1>Gatos</h1>",
    )
    .await
    .unwrap();

    let sink = LocalUploadSink::new(&config.upload.dir, config.upload.naming);
    sink.ensure_dir().await.unwrap();

    let service = Arc::new(CatService::new(
        Arc::clone(&store),
        Arc::new(sink),
        config.app.expose_error_details,
    ));

    TestApp {
        router: build_app(&config, service, store),
        root,
        base_url: String::new(),
    }
}

/// Serve the application on a random local port
#[cfg(test)]
pub async fn spawn_test_app_with_store(store: std::sync::Arc<dyn CatStore>) -> TestApp {
    let mut app = build_test_app(store).await;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app.router.clone();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    app.base_url = format!("http://{}", addr);
    app
}

#[cfg(test)]
pub async fn spawn_test_app() -> TestApp {
    spawn_test_app_with_store(std::sync::Arc::new(
        crate::features::cats::store::InMemoryCatStore::new(),
    ))
    .await
}
