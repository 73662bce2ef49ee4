use crate::error::token_error::TokenError;
use crate::state::token_state::TokenState;
use crate::utils::jwt::TokenKind;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::headers::authorization::{Authorization, Bearer};
use axum_extra::TypedHeader;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// 已登录用户, 由中间件写入 request extensions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

// middleware
pub async fn auth(
    State(state): State<TokenState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<impl IntoResponse, TokenError> {
    // 先取 Authorization 头, 再取 cookie
    let token = match bearer {
        Some(TypedHeader(Authorization(bearer))) => bearer.token().to_string(),
        None => jar
            .get(ACCESS_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or(TokenError::MissingToken)?,
    };
    let claims = state.jwt.verify(&token, TokenKind::Access)?;
    tracing::debug!("auth - user_id:{}", claims.sub);

    request.extensions_mut().insert(CurrentUser {
        id: claims.sub,
        username: claims.username,
    });
    Ok(next.run(request).await)
}
