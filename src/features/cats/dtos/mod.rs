mod cat_dto;

pub use cat_dto::*;
