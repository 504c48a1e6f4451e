use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Age as supplied by the client.
///
/// The store keeps whatever came in: a whole number of years when the
/// value parses as one, the raw text otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum CatAge {
    Years(i64),
    Text(String),
}

impl CatAge {
    /// Coerce a raw form value. Blank input means no age.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(
            trimmed
                .parse::<i64>()
                .map(CatAge::Years)
                .unwrap_or_else(|_| CatAge::Text(raw.to_string())),
        )
    }

    /// Text form used by the relational column
    pub fn to_db(&self) -> String {
        match self {
            CatAge::Years(years) => years.to_string(),
            CatAge::Text(text) => text.clone(),
        }
    }
}

/// A catalog record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Cat {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Pelusa")]
    pub name: String,
    #[schema(example = 2)]
    pub age: Option<CatAge>,
    #[schema(example = "Siames")]
    pub breed: Option<String>,
    pub description: Option<String>,
    /// "available" or "adopted"
    #[schema(example = "available")]
    pub status: String,
    /// Public path of the uploaded image, empty when there is none
    #[schema(example = "/uploads/0192f6c4-1c1e-7d4a-9a57-3f2b8c1d9e00.jpg")]
    pub image: String,
}

/// A record that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewCat {
    pub name: String,
    pub age: Option<CatAge>,
    pub breed: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub image: String,
}

impl NewCat {
    pub fn with_id(self, id: i64) -> Cat {
        Cat {
            id,
            name: self.name,
            age: self.age,
            breed: self.breed,
            description: self.description,
            status: self.status,
            image: self.image,
        }
    }
}
