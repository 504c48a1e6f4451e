use crate::features::cats::models::Cat;
use crate::shared::constants::{STATUS_ADOPTED, STATUS_AVAILABLE};

/// Status dropdown of the catalog page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Available,
    Adopted,
}

impl StatusFilter {
    /// Any value other than the two known statuses shows everything
    pub fn parse(value: &str) -> Self {
        match value {
            STATUS_AVAILABLE => StatusFilter::Available,
            STATUS_ADOPTED => StatusFilter::Adopted,
            _ => StatusFilter::All,
        }
    }

    pub fn matches(&self, status: &str) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Available => status == STATUS_AVAILABLE,
            StatusFilter::Adopted => status == STATUS_ADOPTED,
        }
    }
}

/// Text search combined with a status filter. Purely local.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatFilter {
    pub query: String,
    pub status: StatusFilter,
}

impl CatFilter {
    pub fn new(query: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            query: query.into(),
            status,
        }
    }

    /// Case-insensitive substring match over name, breed and description,
    /// and an exact status match.
    pub fn matches(&self, cat: &Cat) -> bool {
        if !self.status.matches(&cat.status) {
            return false;
        }

        let query = self.query.to_lowercase();
        if query.is_empty() {
            return true;
        }

        let text = format!(
            "{} {} {}",
            cat.name,
            cat.breed.as_deref().unwrap_or(""),
            cat.description.as_deref().unwrap_or("")
        )
        .to_lowercase();
        text.contains(&query)
    }

    pub fn apply(&self, cats: &[Cat]) -> Vec<Cat> {
        cats.iter().filter(|c| self.matches(c)).cloned().collect()
    }
}
