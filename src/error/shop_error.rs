use crate::error::error_code;
use crate::response::api_response::ApiErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShopError {
    #[error("Item not found")]
    ItemNotFound,
    #[error("Item unavailable")]
    ItemInactive,
    #[error("Item already owned")]
    AlreadyOwned,
    #[error("Not enough points: price {price}, balance {balance}")]
    InsufficientPoints { price: i32, balance: i64 },
}

impl ShopError {
    fn get_code(&self) -> u32 {
        match self {
            ShopError::ItemNotFound => error_code::SHOP_ITEM_NOT_FOUND,
            ShopError::ItemInactive => error_code::SHOP_ITEM_INACTIVE,
            ShopError::AlreadyOwned => error_code::SHOP_ITEM_ALREADY_OWNED,
            ShopError::InsufficientPoints { .. } => error_code::SHOP_INSUFFICIENT_POINTS,
        }
    }
}

impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        let status_code = match self {
            ShopError::ItemNotFound => StatusCode::NOT_FOUND,
            ShopError::ItemInactive => StatusCode::BAD_REQUEST,
            ShopError::AlreadyOwned => StatusCode::CONFLICT,
            ShopError::InsufficientPoints { .. } => StatusCode::FORBIDDEN,
        };

        ApiErrorResponse::send(
            status_code.as_u16(),
            self.get_code(),
            Some(self.to_string()),
        )
    }
}
