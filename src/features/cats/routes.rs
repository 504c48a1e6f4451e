use axum::{extract::DefaultBodyLimit, routing::get, routing::put, Router};
use std::sync::Arc;

use crate::features::cats::handlers::{create_cat, delete_cat, list_cats, update_cat_status};
use crate::features::cats::services::CatService;

/// Create routes for the cats feature
///
/// `max_body_size` bounds the multipart create request.
pub fn routes(service: Arc<CatService>, max_body_size: usize) -> Router {
    Router::new()
        .route(
            "/api/cats",
            get(list_cats).post(create_cat).layer(DefaultBodyLimit::max(max_body_size)),
        )
        .route("/api/cats/{id}", put(update_cat_status).delete(delete_cat))
        .with_state(service)
}
