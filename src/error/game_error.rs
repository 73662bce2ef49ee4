//! 成绩记录与徽章发放的错误分类
//!
//! `Conflict` 只在徽章重复发放时出现, 由发放流程吸收, 不会返回给调用方.

use crate::error::error_code;
use crate::response::api_response::ApiErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Conflict,
    Internal,
}

#[derive(Error, Debug)]
pub enum GameError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::InvalidInput(_) => ErrorKind::InvalidInput,
            GameError::NotFound(_) => ErrorKind::NotFound,
            GameError::Conflict(_) => ErrorKind::Conflict,
            GameError::Internal(_) => ErrorKind::Internal,
        }
    }

    fn get_code(&self) -> u32 {
        match self {
            GameError::InvalidInput(_) => error_code::GAME_INVALID_INPUT,
            GameError::NotFound(_) => error_code::GAME_NOT_FOUND,
            GameError::Conflict(_) => error_code::GAME_CONFLICT,
            GameError::Internal(_) => error_code::GAME_INTERNAL,
        }
    }
}

impl From<sqlx::Error> for GameError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("game storage error: {}", err.to_string());
        GameError::Internal(err.to_string())
    }
}

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        let status_code = match self.kind() {
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let msg = match self.kind() {
            ErrorKind::Internal => "internal error, please retry".to_string(),
            _ => self.to_string(),
        };

        ApiErrorResponse::send(status_code.as_u16(), self.get_code(), Some(msg))
    }
}
