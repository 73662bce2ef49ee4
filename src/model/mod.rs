pub mod badge;
pub mod score;
pub mod shop;
pub mod user;
