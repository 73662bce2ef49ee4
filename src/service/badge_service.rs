use crate::dto::badge_dto::BadgeRes;
use crate::error::game_error::GameError;
use crate::model::badge::OwnedBadge;
use crate::repository::badge_repository::BadgeRepositoryTrait;
use crate::repository::user_repository::UserRepositoryTrait;
use crate::service::badge_catalog::BadgeCatalog;
use std::sync::Arc;

pub struct BadgeService {
    badge_repo: Arc<dyn BadgeRepositoryTrait>,
    user_repo: Arc<dyn UserRepositoryTrait>,
    catalog: Arc<BadgeCatalog>,
}

impl BadgeService {
    pub fn new(
        badge_repo: Arc<dyn BadgeRepositoryTrait>,
        user_repo: Arc<dyn UserRepositoryTrait>,
        catalog: Arc<BadgeCatalog>,
    ) -> Self {
        Self {
            badge_repo,
            user_repo,
            catalog,
        }
    }

    /// 用户的徽章, 按发放时间 + 目录顺序
    pub async fn list_user_badges(&self, user_id: i64) -> Result<Vec<OwnedBadge>, GameError> {
        if self.user_repo.find_by_id(user_id).await?.is_none() {
            return Err(GameError::NotFound(format!("user {user_id} not found")));
        }
        Ok(self.badge_repo.get_user_badges(user_id).await?)
    }

    pub async fn list_all_badges(&self) -> Result<Vec<BadgeRes>, GameError> {
        let badges = self.catalog.list_all().await?;
        Ok(badges.iter().map(BadgeRes::from).collect())
    }
}
