use crate::error::{
    db_error::DbError, game_error::GameError, shop_error::ShopError, token_error::TokenError,
    user_error::UserError,
};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use super::request_error::RequestError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    TokenError(#[from] TokenError),
    #[error(transparent)]
    UserError(#[from] UserError),
    #[error(transparent)]
    DbError(#[from] DbError),
    #[error(transparent)]
    RequestError(#[from] RequestError),
    #[error(transparent)]
    GameError(#[from] GameError),
    #[error(transparent)]
    ShopError(#[from] ShopError),
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::RequestError(RequestError::ValidationError(errors))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::TokenError(error) => error.into_response(),
            ApiError::UserError(error) => error.into_response(),
            ApiError::DbError(error) => error.into_response(),
            ApiError::RequestError(error) => error.into_response(),
            ApiError::GameError(error) => error.into_response(),
            ApiError::ShopError(error) => error.into_response(),
        }
    }
}
