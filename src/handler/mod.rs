pub mod auth_handler;
pub mod badge_handler;
pub mod rules_handler;
pub mod score_handler;
pub mod shop_handler;
