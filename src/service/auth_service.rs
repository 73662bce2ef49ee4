use crate::dto::auth_dto::{LoginRes, UserLoginDto, UserReadDto, UserRegisterDto};
use crate::error::api_error::ApiError;
use crate::error::db_error::DbError;
use crate::error::user_error::UserError;
use crate::repository::user_repository::{NewUser, UserRepositoryTrait};
use crate::utils::encrypt;
use crate::utils::jwt::{JwtCodec, TokenKind};
use chrono::Utc;
use std::sync::Arc;

pub struct AuthService {
    user_repo: Arc<dyn UserRepositoryTrait>,
    jwt: Arc<JwtCodec>,
    hash_cost: u32,
}

impl AuthService {
    pub fn new(user_repo: Arc<dyn UserRepositoryTrait>, jwt: Arc<JwtCodec>) -> Self {
        Self {
            user_repo,
            jwt,
            hash_cost: encrypt::DEFAULT_COST,
        }
    }

    #[cfg(test)]
    fn with_hash_cost(mut self, hash_cost: u32) -> Self {
        self.hash_cost = hash_cost;
        self
    }

    pub async fn register(&self, payload: UserRegisterDto) -> Result<UserReadDto, ApiError> {
        if self.user_repo.username_exists(&payload.username).await.map_err(DbError::from)? {
            return Err(UserError::UsernameAlreadyExists.into());
        }
        if self.user_repo.email_exists(&payload.email).await.map_err(DbError::from)? {
            return Err(UserError::EmailAlreadyExists.into());
        }
        let password_hash = encrypt::hash_password(&payload.password, self.hash_cost)
            .map_err(|err| DbError::SomethingWentWrong(err.to_string()))?;

        // 并发注册时由唯一索引兜底
        let user = self
            .user_repo
            .create_user(&NewUser {
                username: payload.username,
                email: payload.email,
                password_hash,
                created_at: Utc::now(),
            })
            .await
            .map_err(DbError::from)?;
        tracing::info!("user registered - id:{} | username:{}", user.id, user.username);
        Ok(user.into())
    }

    pub async fn login(&self, payload: UserLoginDto) -> Result<LoginRes, ApiError> {
        let mut user = self
            .user_repo
            .find_by_email(&payload.email)
            .await
            .map_err(DbError::from)?
            .ok_or(UserError::EmailNotFound)?;
        if !encrypt::verify_password(&payload.password, &user.password_hash) {
            return Err(UserError::InvalidPassword.into());
        }

        let access_token = self.jwt.issue(user.id, &user.username, TokenKind::Access)?;
        let refresh_token = self.jwt.issue(user.id, &user.username, TokenKind::Refresh)?;
        let now = Utc::now();
        self.user_repo
            .update_last_login(user.id, now)
            .await
            .map_err(DbError::from)?;
        user.last_login_at = Some(now);

        Ok(LoginRes {
            user: user.into(),
            access_token,
            refresh_token,
        })
    }

    pub async fn me(&self, user_id: i64) -> Result<UserReadDto, ApiError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(DbError::from)?
            .ok_or(UserError::UserNotFound)?;
        Ok(user.into())
    }

    /// 用 refresh token 换新的 access token
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, ApiError> {
        let claims = self.jwt.verify(refresh_token, TokenKind::Refresh)?;
        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await
            .map_err(DbError::from)?
            .ok_or(UserError::UserNotFound)?;
        Ok(self.jwt.issue(user.id, &user.username, TokenKind::Access)?)
    }
}
