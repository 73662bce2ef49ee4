pub mod badge_repository;
#[cfg(test)]
pub mod memory_repository;
pub mod score_repository;
pub mod shop_repository;
pub mod user_repository;
