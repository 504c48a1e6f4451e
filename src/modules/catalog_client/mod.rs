//! Catalog client
//!
//! Typed HTTP client for the cat API plus the client-side filter the
//! browser frontend applies. Every mutation is followed by a full reload
//! of the list; nothing is patched locally.

mod client;
mod filter;

pub use client::{next_status, CatDraft, CatalogClient, ClientError, ImageUpload};
pub use filter::{CatFilter, StatusFilter};
