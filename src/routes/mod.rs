pub mod auth;
pub mod badge;
pub mod root;
pub mod rules;
pub mod score;
pub mod shop;
