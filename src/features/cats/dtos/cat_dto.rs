use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::features::cats::models::{CatAge, NewCat};

/// Create cat request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CreateCatDto {
    #[schema(example = "Pelusa")]
    pub name: Option<String>,
    /// Years, or free text
    #[schema(example = "2")]
    pub age: Option<String>,
    #[schema(example = "Siames")]
    pub breed: Option<String>,
    pub description: Option<String>,
    #[schema(example = "available")]
    pub status: Option<String>,
    /// Optional image
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    #[allow(non_snake_case)]
    pub imageFile: Option<String>,
}

/// Raw text fields collected from a create request
#[derive(Debug, Clone, Default)]
pub struct CreateCatForm {
    pub name: Option<String>,
    pub age: Option<String>,
    pub breed: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl CreateCatForm {
    /// Text fields understood by the create endpoint
    pub const FIELDS: [&'static str; 5] = ["name", "age", "breed", "description", "status"];

    /// Record one text field. Unknown fields are ignored.
    pub fn set_field(&mut self, field: &str, value: String) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "age" => &mut self.age,
            "breed" => &mut self.breed,
            "description" => &mut self.description,
            "status" => &mut self.status,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Coerce the raw fields into a storable record.
    ///
    /// Nothing is rejected: missing name/status become empty strings and
    /// a non-numeric age is kept as text.
    pub fn into_new_cat(self, image: Option<String>) -> NewCat {
        NewCat {
            name: self.name.unwrap_or_default(),
            age: self.age.as_deref().and_then(CatAge::parse),
            breed: self.breed,
            description: self.description,
            status: self.status.unwrap_or_default(),
            image: image.unwrap_or_default(),
        }
    }
}

/// An uploaded image pulled out of a create request
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub original_filename: String,
    pub data: Vec<u8>,
}

impl UploadedImage {
    /// Browsers send an empty part when no file was picked
    pub fn is_empty(&self) -> bool {
        self.original_filename.is_empty() && self.data.is_empty()
    }
}

/// Response DTO for a created cat
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCatResponseDto {
    pub id: i64,
}

/// Request DTO for updating a cat's status
///
/// A non-string `status` is coerced to its JSON text; `null` or a missing
/// field means "no status given".
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCatStatusDto {
    #[serde(default, deserialize_with = "coerce_status")]
    #[schema(example = "adopted")]
    pub status: Option<String>,
}

fn coerce_status<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(status)) => Some(status),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_coerces_fields() {
        let mut form = CreateCatForm::default();
        assert!(form.set_field("name", "Pelusa".into()));
        assert!(form.set_field("age", "2".into()));
        assert!(form.set_field("breed", "Siames".into()));
        assert!(form.set_field("status", "available".into()));
        assert!(!form.set_field("color", "white".into()));

        let cat = form.into_new_cat(Some("/uploads/a.png".into()));
        assert_eq!(cat.name, "Pelusa");
        assert_eq!(cat.age, Some(CatAge::Years(2)));
        assert_eq!(cat.breed.as_deref(), Some("Siames"));
        assert_eq!(cat.description, None);
        assert_eq!(cat.status, "available");
        assert_eq!(cat.image, "/uploads/a.png");
    }

    #[test]
    fn test_form_never_rejects() {
        let mut form = CreateCatForm::default();
        form.set_field("age", "old".into());

        let cat = form.into_new_cat(None);
        assert_eq!(cat.name, "");
        assert_eq!(cat.status, "");
        assert_eq!(cat.age, Some(CatAge::Text("old".into())));
        assert_eq!(cat.image, "");
    }

    #[test]
    fn test_update_status_coercion() {
        let parse = |body: &str| serde_json::from_str::<UpdateCatStatusDto>(body).unwrap().status;

        assert_eq!(parse(r#"{"status":"adopted"}"#).as_deref(), Some("adopted"));
        assert_eq!(parse(r#"{"status":5}"#).as_deref(), Some("5"));
        assert_eq!(parse(r#"{"status":true}"#).as_deref(), Some("true"));
        assert_eq!(parse(r#"{"status":null}"#), None);
        assert_eq!(parse("{}"), None);
    }

    #[test]
    fn test_empty_upload_part() {
        let empty = UploadedImage {
            original_filename: String::new(),
            data: Vec::new(),
        };
        assert!(empty.is_empty());

        let real = UploadedImage {
            original_filename: "a.png".into(),
            data: vec![1, 2, 3],
        };
        assert!(!real.is_empty());
    }
}
