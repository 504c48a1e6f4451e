use std::sync::Arc;
use tracing::{debug, info};

use crate::core::error::{AppError, Result};
use crate::features::cats::dtos::{CreateCatForm, UploadedImage};
use crate::features::cats::models::Cat;
use crate::features::cats::store::{CatStore, StoreError};
use crate::modules::storage::UploadSink;
use crate::shared::validation::sanitize_extension;

/// Service for cat catalog operations
pub struct CatService {
    store: Arc<dyn CatStore>,
    upload_sink: Arc<dyn UploadSink>,
    expose_error_details: bool,
}

impl CatService {
    pub fn new(
        store: Arc<dyn CatStore>,
        upload_sink: Arc<dyn UploadSink>,
        expose_error_details: bool,
    ) -> Self {
        Self {
            store,
            upload_sink,
            expose_error_details,
        }
    }

    fn store_error(&self, err: StoreError) -> AppError {
        AppError::from_store(err, self.expose_error_details)
    }

    /// Path ids are compared loosely: anything that is not an integer
    /// simply matches no record.
    pub fn parse_id(raw: &str) -> Option<i64> {
        raw.trim().parse::<i64>().ok()
    }

    /// List every cat
    pub async fn list(&self) -> Result<Vec<Cat>> {
        self.store.list_all().await.map_err(|e| self.store_error(e))
    }

    /// Create a cat, storing its image first when one was sent
    ///
    /// # Returns
    /// The id assigned by the store
    pub async fn create(&self, form: CreateCatForm, image: Option<UploadedImage>) -> Result<i64> {
        let image_path = match image.filter(|img| !img.is_empty()) {
            Some(img) => {
                let extension = sanitize_extension(&img.original_filename);
                let path = self
                    .upload_sink
                    .store(&img.data, extension.as_deref())
                    .await?;
                debug!(
                    "Image stored: original={}, path={}, size={}",
                    img.original_filename,
                    path,
                    img.data.len()
                );
                Some(path)
            }
            None => None,
        };

        let new_cat = form.into_new_cat(image_path);
        let name = new_cat.name.clone();
        let id = self
            .store
            .insert(new_cat)
            .await
            .map_err(|e| self.store_error(e))?;

        info!("Cat created: id={}, name={}", id, name);
        Ok(id)
    }

    /// Set the status of a cat. Unknown ids succeed without effect.
    pub async fn update_status(&self, raw_id: &str, status: &str) -> Result<()> {
        let Some(id) = Self::parse_id(raw_id) else {
            debug!("Status update for non-numeric id '{}' ignored", raw_id);
            return Ok(());
        };

        self.store
            .update_status(id, status)
            .await
            .map_err(|e| self.store_error(e))?;

        info!("Cat status updated: id={}, status={}", id, status);
        Ok(())
    }

    /// Delete a cat. Unknown ids succeed without effect.
    pub async fn delete(&self, raw_id: &str) -> Result<()> {
        let Some(id) = Self::parse_id(raw_id) else {
            debug!("Delete for non-numeric id '{}' ignored", raw_id);
            return Ok(());
        };

        self.store
            .delete(id)
            .await
            .map_err(|e| self.store_error(e))?;

        info!("Cat deleted: id={}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::cats::models::CatAge;
    use crate::features::cats::store::InMemoryCatStore;
    use crate::modules::storage::{LocalUploadSink, UploadNaming};
    use crate::shared::test_helpers::{FailingUploadSink, UnavailableStore};
    use tempfile::TempDir;

    fn pelusa_form() -> CreateCatForm {
        CreateCatForm {
            name: Some("Pelusa".into()),
            age: Some("2".into()),
            breed: Some("Siames".into()),
            description: Some("x".into()),
            status: Some("available".into()),
        }
    }

    async fn memory_service() -> (CatService, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let sink = LocalUploadSink::new(dir.path(), UploadNaming::Uuid);
        let service = CatService::new(
            Arc::new(InMemoryCatStore::new()),
            Arc::new(sink),
            true,
        );
        (service, dir)
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(CatService::parse_id("42"), Some(42));
        assert_eq!(CatService::parse_id(" 7 "), Some(7));
        assert_eq!(CatService::parse_id("abc"), None);
    }

    #[tokio::test]
    async fn test_round_trip() {
        let (service, _dir) = memory_service().await;
        let other = service.create(CreateCatForm::default(), None).await.unwrap();
        let id = service.create(pelusa_form(), None).await.unwrap();

        let cats = service.list().await.unwrap();
        let matching: Vec<_> = cats.iter().filter(|c| c.id == id).collect();
        assert_eq!(matching.len(), 1);
        let cat = matching[0];
        assert_eq!(cat.name, "Pelusa");
        assert_eq!(cat.age, Some(CatAge::Years(2)));
        assert_eq!(cat.breed.as_deref(), Some("Siames"));
        assert_eq!(cat.description.as_deref(), Some("x"));
        assert_eq!(cat.status, "available");
        assert_eq!(cat.image, "");

        service.update_status(&id.to_string(), "adopted").await.unwrap();
        let cats = service.list().await.unwrap();
        assert_eq!(cats.iter().find(|c| c.id == id).unwrap().status, "adopted");
        assert_eq!(cats.iter().find(|c| c.id == other).unwrap().status, "");

        service.delete(&id.to_string()).await.unwrap();
        let cats = service.list().await.unwrap();
        assert!(cats.iter().all(|c| c.id != id));
        assert_eq!(cats.len(), 1);
    }

    #[tokio::test]
    async fn test_create_with_image_sets_public_path() {
        let (service, dir) = memory_service().await;
        let image = UploadedImage {
            original_filename: "pelusa.jpg".into(),
            data: vec![0xff, 0xd8, 0xff],
        };

        let id = service.create(pelusa_form(), Some(image)).await.unwrap();
        let cats = service.list().await.unwrap();
        let cat = cats.iter().find(|c| c.id == id).unwrap();

        assert!(cat.image.starts_with("/uploads/"));
        assert!(cat.image.ends_with(".jpg"));
        let stored = tokio::fs::read(dir.path().join(cat.image.trim_start_matches("/uploads/")))
            .await
            .unwrap();
        assert_eq!(stored, vec![0xff, 0xd8, 0xff]);
    }

    #[tokio::test]
    async fn test_empty_file_part_is_ignored() {
        let (service, _dir) = memory_service().await;
        let empty = UploadedImage {
            original_filename: String::new(),
            data: Vec::new(),
        };

        let id = service.create(pelusa_form(), Some(empty)).await.unwrap();
        let cats = service.list().await.unwrap();
        assert_eq!(cats.iter().find(|c| c.id == id).unwrap().image, "");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_noop() {
        let (service, _dir) = memory_service().await;
        service.create(pelusa_form(), None).await.unwrap();

        service.update_status("pelusa", "adopted").await.unwrap();
        service.delete("pelusa").await.unwrap();

        let cats = service.list().await.unwrap();
        assert_eq!(cats.len(), 1);
        assert_eq!(cats[0].status, "available");
    }

    #[tokio::test]
    async fn test_upload_failure_does_not_insert() {
        let store = Arc::new(InMemoryCatStore::new());
        let service = CatService::new(store.clone(), Arc::new(FailingUploadSink), true);
        let image = UploadedImage {
            original_filename: "a.png".into(),
            data: vec![1],
        };

        let result = service.create(pelusa_form(), Some(image)).await;
        assert!(matches!(result, Err(AppError::Upload(_))));
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_message_visibility() {
        let exposed = CatService::new(Arc::new(UnavailableStore), Arc::new(FailingUploadSink), true);
        match exposed.list().await {
            Err(AppError::Store(msg)) => assert!(msg.contains("connection refused")),
            other => panic!("unexpected result: {:?}", other),
        }

        let hidden = CatService::new(Arc::new(UnavailableStore), Arc::new(FailingUploadSink), false);
        match hidden.create(pelusa_form(), None).await {
            Err(AppError::Store(msg)) => assert!(!msg.contains("connection refused")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
