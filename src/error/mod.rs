pub mod api_error;
pub mod db_error;
pub mod error_code;
pub mod game_error;
pub mod request_error;
pub mod shop_error;
pub mod token_error;
pub mod user_error;
