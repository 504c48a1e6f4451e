//! Cat catalog service: list, create, update the status of and delete cat
//! records, with optional image uploads.

pub mod core;
pub mod features;
pub mod modules;
pub mod shared;
