mod cat_service;

pub use cat_service::*;
