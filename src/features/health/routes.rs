use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::cats::store::CatStore;
use crate::features::health::handlers::health_check;

pub fn routes(store: Arc<dyn CatStore>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .with_state(store)
}
