use crate::db::database::Database;
use crate::repository::user_repository::UserRepository;
use crate::service::auth_service::AuthService;
use crate::utils::jwt::JwtCodec;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthState {
    pub auth_service: Arc<AuthService>,
    pub cookie_secure: bool,
}

impl AuthState {
    pub fn new(db_conn: &Arc<Database>, jwt: &Arc<JwtCodec>, cookie_secure: bool) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(
                Arc::new(UserRepository::new(db_conn)),
                Arc::clone(jwt),
            )),
            cookie_secure,
        }
    }
}
