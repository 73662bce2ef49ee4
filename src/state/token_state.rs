use crate::utils::jwt::JwtCodec;
use std::sync::Arc;

#[derive(Clone)]
pub struct TokenState {
    pub jwt: Arc<JwtCodec>,
}

impl TokenState {
    pub fn new(jwt: &Arc<JwtCodec>) -> Self {
        Self {
            jwt: Arc::clone(jwt),
        }
    }
}
