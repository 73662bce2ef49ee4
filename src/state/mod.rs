pub mod auth_state;
pub mod badge_state;
pub mod rules_state;
pub mod score_state;
pub mod shop_state;
pub mod token_state;
