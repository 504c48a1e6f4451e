mod cat_handler;

pub use cat_handler::*;
