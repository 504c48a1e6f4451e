use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use thiserror::Error;
use tracing::debug;

use crate::features::cats::dtos::{CreateCatResponseDto, UpdateCatStatusDto};
use crate::features::cats::models::Cat;
use crate::modules::catalog_client::CatFilter;
use crate::shared::constants::{IMAGE_FIELD, STATUS_ADOPTED, STATUS_AVAILABLE};
use crate::shared::types::ErrorResponse;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },
}

/// Image attached to a new cat
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Fields of the "new cat" form
#[derive(Debug, Clone, Default)]
pub struct CatDraft {
    pub name: String,
    pub age: String,
    pub breed: String,
    pub description: String,
    pub status: String,
    pub image: Option<ImageUpload>,
}

/// Status a toggle moves a cat to
pub fn next_status(current: &str) -> &'static str {
    if current == STATUS_ADOPTED {
        STATUS_AVAILABLE
    } else {
        STATUS_ADOPTED
    }
}

/// HTTP client for the cat catalog API
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder().build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn non-2xx responses into `ClientError::Api`
    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
        };
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Fetch the full catalog
    pub async fn list(&self) -> Result<Vec<Cat>, ClientError> {
        let response = self.http.get(self.url("/api/cats")).send().await?;
        let cats = Self::check(response).await?.json::<Vec<Cat>>().await?;
        debug!("Fetched {} cats", cats.len());
        Ok(cats)
    }

    /// Fetch the catalog and filter it locally
    pub async fn list_filtered(&self, filter: &CatFilter) -> Result<Vec<Cat>, ClientError> {
        Ok(filter.apply(&self.list().await?))
    }

    /// Publish a new cat, then reload
    ///
    /// # Returns
    /// The new id and the reloaded catalog
    pub async fn create(&self, draft: CatDraft) -> Result<(i64, Vec<Cat>), ClientError> {
        let mut form = Form::new()
            .text("name", draft.name)
            .text("age", draft.age)
            .text("breed", draft.breed)
            .text("description", draft.description)
            .text("status", draft.status);

        if let Some(image) = draft.image {
            let mut part = Part::bytes(image.data).file_name(image.file_name);
            if let Some(content_type) = image.content_type {
                part = part.mime_str(&content_type)?;
            }
            form = form.part(IMAGE_FIELD, part);
        }

        let response = self
            .http
            .post(self.url("/api/cats"))
            .multipart(form)
            .send()
            .await?;
        let created = Self::check(response)
            .await?
            .json::<CreateCatResponseDto>()
            .await?;

        Ok((created.id, self.list().await?))
    }

    /// Set a cat's status, then reload
    pub async fn set_status(&self, id: i64, status: &str) -> Result<Vec<Cat>, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/api/cats/{}", id)))
            .json(&UpdateCatStatusDto {
                status: Some(status.to_string()),
            })
            .send()
            .await?;
        Self::check(response).await?;

        self.list().await
    }

    /// Flip between available and adopted, then reload
    pub async fn toggle_status(&self, cat: &Cat) -> Result<Vec<Cat>, ClientError> {
        self.set_status(cat.id, next_status(&cat.status)).await
    }

    /// Delete a cat, then reload
    pub async fn delete(&self, id: i64) -> Result<Vec<Cat>, ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/api/cats/{}", id)))
            .send()
            .await?;
        Self::check(response).await?;

        self.list().await
    }
}
