pub mod auth_dto;
pub mod badge_dto;
pub mod score_dto;
pub mod shop_dto;
