use crate::db::database::Database;
use crate::repository::shop_repository::ShopRepository;
use crate::repository::user_repository::UserRepository;
use crate::service::shop_service::ShopService;
use std::sync::Arc;

#[derive(Clone)]
pub struct ShopState {
    pub shop_service: Arc<ShopService>,
}

impl ShopState {
    pub fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            shop_service: Arc::new(ShopService::new(
                Arc::new(ShopRepository::new(db_conn)),
                Arc::new(UserRepository::new(db_conn)),
            )),
        }
    }
}
