pub mod cats;
pub mod health;
