use crate::dto::auth_dto::{LoginRes, TokenRes, UserLoginDto, UserReadDto, UserRegisterDto};
use crate::error::token_error::TokenError;
use crate::error::{api_error::ApiError, request_error::ValidatedRequest};
use crate::middleware::auth::{CurrentUser, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use crate::response::api_response::ApiSuccessResponse;
use crate::state::auth_state::AuthState;
use axum::{extract::State, http::StatusCode, Extension, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

fn token_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

pub async fn register(
    State(state): State<AuthState>,
    ValidatedRequest(payload): ValidatedRequest<UserRegisterDto>,
) -> Result<(StatusCode, Json<ApiSuccessResponse<UserReadDto>>), ApiError> {
    let user = state.auth_service.register(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiSuccessResponse::send(user))))
}

pub async fn login(
    State(state): State<AuthState>,
    jar: CookieJar,
    ValidatedRequest(payload): ValidatedRequest<UserLoginDto>,
) -> Result<(CookieJar, Json<ApiSuccessResponse<LoginRes>>), ApiError> {
    let res = state.auth_service.login(payload).await?;
    let jar = jar
        .add(token_cookie(
            ACCESS_TOKEN_COOKIE,
            res.access_token.clone(),
            state.cookie_secure,
        ))
        .add(token_cookie(
            REFRESH_TOKEN_COOKIE,
            res.refresh_token.clone(),
            state.cookie_secure,
        ));
    Ok((jar, Json(ApiSuccessResponse::send(res))))
}

pub async fn me(
    State(state): State<AuthState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiSuccessResponse<UserReadDto>>, ApiError> {
    let user = state.auth_service.me(user.id).await?;
    Ok(Json(ApiSuccessResponse::send(user)))
}

pub async fn refresh(
    State(state): State<AuthState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiSuccessResponse<TokenRes>>), ApiError> {
    let refresh_token = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or(TokenError::MissingToken)?;
    let access_token = state.auth_service.refresh(&refresh_token).await?;
    let jar = jar.add(token_cookie(
        ACCESS_TOKEN_COOKIE,
        access_token.clone(),
        state.cookie_secure,
    ));
    Ok((jar, Json(ApiSuccessResponse::send(TokenRes { access_token }))))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Json<ApiSuccessResponse<()>>) {
    let jar = jar
        .remove(Cookie::build((ACCESS_TOKEN_COOKIE, "")).path("/"))
        .remove(Cookie::build((REFRESH_TOKEN_COOKIE, "")).path("/"));
    (jar, Json(ApiSuccessResponse::with_msg("logged out", None)))
}
