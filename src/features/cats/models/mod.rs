mod cat;

pub use cat::*;
