pub mod auth_service;
pub mod badge_catalog;
pub mod badge_service;
pub mod grant_recorder;
pub mod point_ledger;
pub mod rule_evaluator;
pub mod score_service;
pub mod shop_service;
