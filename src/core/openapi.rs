use utoipa::{Modify, OpenApi};

use crate::features::cats::{dtos as cats_dtos, handlers as cats_handlers, models as cats_models};
use crate::features::health::handlers as health_handlers;
use crate::shared::types::{ErrorResponse, MessageResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Cats
        cats_handlers::list_cats,
        cats_handlers::create_cat,
        cats_handlers::update_cat_status,
        cats_handlers::delete_cat,
        // Health
        health_handlers::health_check,
    ),
    components(
        schemas(
            ErrorResponse,
            MessageResponse,
            // Cats
            cats_models::Cat,
            cats_models::CatAge,
            cats_dtos::CreateCatDto,
            cats_dtos::CreateCatResponseDto,
            cats_dtos::UpdateCatStatusDto,
            // Health
            health_handlers::HealthResponse,
        )
    ),
    tags(
        (name = "cats", description = "Cat catalog"),
        (name = "health", description = "Service health"),
    ),
    info(
        title = "Cat Catalog API",
        version = "0.1.0",
        description = "API documentation for the cat catalog",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
