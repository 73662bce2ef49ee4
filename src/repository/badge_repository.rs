use crate::db::database::{Database, DatabaseTrait};
use crate::model::badge::{Badge, OwnedBadge};
use async_trait::async_trait;
use std::sync::Arc;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BadgeRepositoryTrait: Send + Sync {
    /// 读取徽章目录, 按目录顺序
    async fn load_badges(&self) -> Result<Vec<Badge>, sqlx::Error>;

    /// 用户已获得的徽章, 按发放时间 + 目录顺序
    async fn get_user_badges(&self, user_id: i64) -> Result<Vec<OwnedBadge>, sqlx::Error>;
}

#[derive(Clone)]
pub struct BadgeRepository {
    pub(crate) db_conn: Arc<Database>,
}

impl BadgeRepository {
    pub fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }
}

#[async_trait]
impl BadgeRepositoryTrait for BadgeRepository {
    async fn load_badges(&self) -> Result<Vec<Badge>, sqlx::Error> {
        let badges = sqlx::query_as::<_, Badge>(
            "SELECT id, code, label, description, threshold, icon FROM badges ORDER BY id ASC",
        )
        .fetch_all(self.db_conn.get_master_pool())
        .await?;
        tracing::debug!("load_badges - count:{}", badges.len());
        Ok(badges)
    }

    async fn get_user_badges(&self, user_id: i64) -> Result<Vec<OwnedBadge>, sqlx::Error> {
        let badges = sqlx::query_as::<_, OwnedBadge>(
            "SELECT b.code, b.label, b.description, ub.awarded_at
             FROM user_badges ub JOIN badges b ON b.id = ub.badge_id
             WHERE ub.user_id = ?
             ORDER BY ub.awarded_at ASC, b.id ASC",
        )
        .bind(user_id)
        .fetch_all(self.db_conn.get_slave_pool())
        .await?;
        Ok(badges)
    }
}
