use crate::db::database::Database;
use crate::repository::badge_repository::BadgeRepository;
use crate::repository::user_repository::UserRepository;
use crate::service::badge_catalog::BadgeCatalog;
use crate::service::badge_service::BadgeService;
use std::sync::Arc;

#[derive(Clone)]
pub struct BadgeState {
    pub badge_service: Arc<BadgeService>,
}

impl BadgeState {
    pub fn new(db_conn: &Arc<Database>, catalog: &Arc<BadgeCatalog>) -> Self {
        Self {
            badge_service: Arc::new(BadgeService::new(
                Arc::new(BadgeRepository::new(db_conn)),
                Arc::new(UserRepository::new(db_conn)),
                Arc::clone(catalog),
            )),
        }
    }
}
