use crate::response::api_response::ApiErrorResponse;
use crate::error::error_code;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum UserError {
    #[error("User not found")]
    UserNotFound,
    #[error("Username already taken")]
    UsernameAlreadyExists,
    #[error("Email already taken")]
    EmailAlreadyExists,
    #[error("Email not found")]
    EmailNotFound,
    #[error("Invalid password")]
    InvalidPassword,
}

impl UserError {
    fn get_code(&self) -> u32 {
        match self {
            UserError::UserNotFound => error_code::USER_NOT_FOUND,
            UserError::UsernameAlreadyExists => error_code::USERNAME_ALREADY_EXISTS,
            UserError::EmailAlreadyExists => error_code::EMAIL_ALREADY_EXISTS,
            UserError::EmailNotFound => error_code::EMAIL_NOT_FOUND,
            UserError::InvalidPassword => error_code::INVALID_PASSWORD,
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status_code = match self {
            UserError::UserNotFound => StatusCode::NOT_FOUND,
            UserError::UsernameAlreadyExists => StatusCode::CONFLICT,
            UserError::EmailAlreadyExists => StatusCode::CONFLICT,
            UserError::EmailNotFound => StatusCode::NOT_FOUND,
            UserError::InvalidPassword => StatusCode::UNAUTHORIZED,
        };

        ApiErrorResponse::send(
            status_code.as_u16(),
            self.get_code(),
            Some(self.to_string()),
        )
    }
}
