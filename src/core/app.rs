use axum::{middleware::from_fn, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::{Config, SwaggerConfig};
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::cats::{self, store::CatStore, CatService};
use crate::features::health;
use crate::shared::constants::UPLOADS_URL_PREFIX;

/// Landing page served at `/`
pub const LANDING_PAGE: &str = "home.html";

/// JSON API routes
pub fn api_router(
    cat_service: Arc<CatService>,
    store: Arc<dyn CatStore>,
    max_body_size: usize,
) -> Router {
    Router::new()
        .merge(cats::routes(cat_service, max_body_size))
        .merge(health::routes(store))
}

/// Uploaded images under `/uploads`, the landing page at `/` and the
/// remaining frontend assets as fallback
pub fn static_router(upload_dir: &Path, frontend_dir: &Path) -> Router {
    Router::new()
        .nest_service(UPLOADS_URL_PREFIX, ServeDir::new(upload_dir))
        .route_service("/", ServeFile::new(frontend_dir.join(LANDING_PAGE)))
        .fallback_service(ServeDir::new(frontend_dir))
}

/// Swagger UI, optionally behind basic auth
pub fn swagger_router(config: &SwaggerConfig) -> Router {
    let swagger_modifier = SwaggerInfoModifier {
        title: config.title.clone(),
        version: config.version.clone(),
        description: config.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger =
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));

    if let Some(credentials) = config.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        swagger.layer(from_fn(middleware::basic_auth_middleware(Arc::new(
            credentials,
        ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        swagger
    }
}

/// Build the full application router with CORS, request ids and tracing
pub fn build_app(config: &Config, cat_service: Arc<CatService>, store: Arc<dyn CatStore>) -> Router {
    Router::new()
        .merge(swagger_router(&config.swagger))
        .merge(api_router(
            cat_service,
            store,
            config.app.max_request_body_size,
        ))
        .merge(static_router(&config.upload.dir, &config.app.frontend_dir))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}
