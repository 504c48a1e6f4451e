use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::features::cats::store::CatStore;

/// Health report for the service and its store
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    /// "connected" or "disconnected"
    #[schema(example = "connected")]
    pub database: String,
    #[schema(example = "Server running with postgres store")]
    pub message: String,
}

/// Service health
///
/// Always answers 200; a broken store shows up in the body.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health", body = HealthResponse)
    )
)]
pub async fn health_check(State(store): State<Arc<dyn CatStore>>) -> Json<HealthResponse> {
    let response = match store.ping().await {
        Ok(()) => HealthResponse {
            status: "ok".to_string(),
            database: "connected".to_string(),
            message: format!("Server running with {} store", store.backend()),
        },
        Err(e) => {
            tracing::warn!("Health check: store unreachable: {}", e);
            HealthResponse {
                status: "degraded".to_string(),
                database: "disconnected".to_string(),
                message: e.to_string(),
            }
        }
    };

    Json(response)
}
