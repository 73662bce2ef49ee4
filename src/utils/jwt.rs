//! access / refresh token 的签发与校验, HS256

use crate::error::token_error::TokenError;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Claims {
    /// user id
    pub sub: i64,
    pub username: String,
    pub kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct JwtCodec {
    secret: String,
    access_exp_minutes: i64,
    refresh_exp_minutes: i64,
}

impl JwtCodec {
    pub fn new(secret: &str, access_exp_minutes: i64, refresh_exp_minutes: i64) -> Self {
        Self {
            secret: secret.to_string(),
            access_exp_minutes,
            refresh_exp_minutes,
        }
    }

    pub fn issue(&self, user_id: i64, username: &str, kind: TokenKind) -> Result<String, TokenError> {
        let minutes = match kind {
            TokenKind::Access => self.access_exp_minutes,
            TokenKind::Refresh => self.refresh_exp_minutes,
        };
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            kind,
            iat: now.timestamp(),
            exp: (now + Duration::minutes(minutes)).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|err| TokenError::TokenCreationError(err.to_string()))
    }

    /// 校验签名、过期时间和 token 类型
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|err| match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::TokenExpired,
            _ => TokenError::InvalidToken(err.to_string()),
        })?;
        if token_data.claims.kind != expected {
            return Err(TokenError::InvalidToken("unexpected token kind".to_string()));
        }
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> JwtCodec {
        JwtCodec::new("test-secret-with-enough-length-123456", 60, 120)
    }

    #[test]
    fn issued_token_verifies() {
        let token = codec().issue(7, "sam", TokenKind::Access).unwrap();
        let claims = codec().verify(&token, TokenKind::Access).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.username, "sam");
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let token = codec().issue(7, "sam", TokenKind::Refresh).unwrap();
        assert!(matches!(
            codec().verify(&token, TokenKind::Access),
            Err(TokenError::InvalidToken(_))
        ));
        assert!(codec().verify(&token, TokenKind::Refresh).is_ok());
    }

    #[test]
    fn expired_token_is_rejected() {
        // 超过默认 60 秒的时钟容差
        let expired = JwtCodec::new("test-secret-with-enough-length-123456", -5, -5);
        let token = expired.issue(7, "sam", TokenKind::Access).unwrap();
        assert_eq!(
            codec().verify(&token, TokenKind::Access),
            Err(TokenError::TokenExpired)
        );
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = codec().issue(7, "sam", TokenKind::Access).unwrap();
        let other = JwtCodec::new("another-secret-with-enough-length-99", 60, 120);
        assert!(other.verify(&token, TokenKind::Access).is_err());
    }
}
