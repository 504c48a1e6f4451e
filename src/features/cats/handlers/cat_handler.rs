use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::core::extractor::LenientJson;
use crate::features::cats::dtos::{
    CreateCatDto, CreateCatForm, CreateCatResponseDto, UpdateCatStatusDto, UploadedImage,
};
use crate::features::cats::models::Cat;
use crate::features::cats::services::CatService;
use crate::shared::constants::{IMAGE_FIELD, MESSAGE_CAT_DELETED, MESSAGE_STATUS_UPDATED};
use crate::shared::types::{ErrorResponse, MessageResponse};

/// List all cats
#[utoipa::path(
    get,
    path = "/api/cats",
    tag = "cats",
    responses(
        (status = 200, description = "Every cat in the catalog", body = Vec<Cat>),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_cats(State(service): State<Arc<CatService>>) -> Result<Json<Vec<Cat>>> {
    let cats = service.list().await?;
    Ok(Json(cats))
}

/// Create a cat
///
/// Accepts multipart/form-data with text fields `name`, `age`, `breed`,
/// `description`, `status` and an optional `imageFile`.
#[utoipa::path(
    post,
    path = "/api/cats",
    tag = "cats",
    request_body(
        content = CreateCatDto,
        content_type = "multipart/form-data",
        description = "Cat fields with an optional image",
    ),
    responses(
        (status = 200, description = "Cat created", body = CreateCatResponseDto),
        (status = 400, description = "Malformed multipart body", body = ErrorResponse),
        (status = 500, description = "Store or upload failure", body = ErrorResponse)
    )
)]
pub async fn create_cat(
    State(service): State<Arc<CatService>>,
    mut multipart: Multipart,
) -> Result<Json<CreateCatResponseDto>> {
    let mut form = CreateCatForm::default();
    let mut image: Option<UploadedImage> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == IMAGE_FIELD {
            let original_filename = field.file_name().unwrap_or("").to_string();
            let data = field.bytes().await.map_err(|e| {
                debug!("Failed to read file bytes: {}", e);
                AppError::BadRequest(format!("Failed to read file data: {}", e))
            })?;
            image = Some(UploadedImage {
                original_filename,
                data: data.to_vec(),
            });
            continue;
        }

        if !CreateCatForm::FIELDS.contains(&field_name.as_str()) {
            debug!("Ignoring unknown field: {}", field_name);
            continue;
        }

        let text = field.text().await.map_err(|e| {
            AppError::BadRequest(format!("Failed to read {} field: {}", field_name, e))
        })?;
        form.set_field(&field_name, text);
    }

    let id = service.create(form, image).await?;
    Ok(Json(CreateCatResponseDto { id }))
}

/// Update a cat's status
///
/// Succeeds even when no cat has the given id. A body without a usable
/// `status` leaves the cat unchanged.
#[utoipa::path(
    put,
    path = "/api/cats/{id}",
    tag = "cats",
    params(
        ("id" = String, Path, description = "Cat id")
    ),
    request_body = UpdateCatStatusDto,
    responses(
        (status = 200, description = "Status updated (or no such cat)", body = MessageResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn update_cat_status(
    State(service): State<Arc<CatService>>,
    Path(id): Path<String>,
    LenientJson(dto): LenientJson<UpdateCatStatusDto>,
) -> Result<Json<MessageResponse>> {
    match dto.status {
        Some(status) => service.update_status(&id, &status).await?,
        None => debug!("Status update for '{}' carried no status, ignored", id),
    }
    Ok(Json(MessageResponse::new(MESSAGE_STATUS_UPDATED)))
}

/// Delete a cat
///
/// Succeeds even when no cat has the given id. The uploaded image is kept.
#[utoipa::path(
    delete,
    path = "/api/cats/{id}",
    tag = "cats",
    params(
        ("id" = String, Path, description = "Cat id")
    ),
    responses(
        (status = 200, description = "Cat deleted (or no such cat)", body = MessageResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn delete_cat(
    State(service): State<Arc<CatService>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    service.delete(&id).await?;
    Ok(Json(MessageResponse::new(MESSAGE_CAT_DELETED)))
}
