use crate::error::game_error::GameError;
use crate::model::badge::Badge;
use crate::repository::badge_repository::BadgeRepositoryTrait;
use crate::repository::score_repository::LedgerTransaction;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// 徽章目录
///
/// 第一次访问时从数据库加载, 之后整个进程生命周期内复用; `reload` 重新查库.
pub struct BadgeCatalog {
    badge_repo: Arc<dyn BadgeRepositoryTrait>,
    cache: RwLock<Option<Arc<Vec<Badge>>>>,
}

impl BadgeCatalog {
    pub fn new(badge_repo: Arc<dyn BadgeRepositoryTrait>) -> Self {
        Self {
            badge_repo,
            cache: RwLock::new(None),
        }
    }

    /// 全部徽章, 目录顺序
    pub async fn list_all(&self) -> Result<Arc<Vec<Badge>>, GameError> {
        {
            let guard = self.cache.read().await;
            if let Some(badges) = guard.as_ref() {
                return Ok(Arc::clone(badges));
            }
        }
        let mut guard = self.cache.write().await;
        // 等写锁期间可能已被其他请求加载
        if let Some(badges) = guard.as_ref() {
            return Ok(Arc::clone(badges));
        }
        let badges = Arc::new(self.load().await?);
        *guard = Some(Arc::clone(&badges));
        Ok(badges)
    }

    /// 丢弃缓存, 重新加载
    pub async fn reload(&self) -> Result<Arc<Vec<Badge>>, GameError> {
        let mut guard = self.cache.write().await;
        let badges = Arc::new(self.load().await?);
        *guard = Some(Arc::clone(&badges));
        tracing::info!("badge catalog reloaded, count:{}", badges.len());
        Ok(badges)
    }

    /// 当前事务可见的已拥有徽章 code
    pub async fn get_owned(
        &self,
        tx: &mut dyn LedgerTransaction,
        user_id: i64,
    ) -> Result<HashSet<String>, GameError> {
        Ok(tx.owned_badge_codes(user_id).await?)
    }

    async fn load(&self) -> Result<Vec<Badge>, GameError> {
        let badges = self.badge_repo.load_badges().await?;
        let mut seen = HashSet::with_capacity(badges.len());
        let mut unique = Vec::with_capacity(badges.len());
        for badge in badges {
            if seen.insert(badge.code.clone()) {
                unique.push(badge);
            } else {
                tracing::warn!("duplicate badge code in catalog, ignored: {}", badge.code);
            }
        }
        Ok(unique)
    }
}
