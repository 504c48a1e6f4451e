//! Modules layer - Infrastructure components around the catalog
//!
//! Contains the upload storage sink and the HTTP catalog client.

pub mod catalog_client;
pub mod storage;
