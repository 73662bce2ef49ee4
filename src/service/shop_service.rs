use crate::dto::shop_dto::{CanPurchaseRes, PurchaseRes};
use crate::error::api_error::ApiError;
use crate::error::db_error::DbError;
use crate::error::shop_error::ShopError;
use crate::error::user_error::UserError;
use crate::model::shop::ShopItem;
use crate::repository::shop_repository::{PurchaseOutcome, ShopRepositoryTrait};
use crate::repository::user_repository::UserRepositoryTrait;
use std::sync::Arc;

pub struct ShopService {
    shop_repo: Arc<dyn ShopRepositoryTrait>,
    user_repo: Arc<dyn UserRepositoryTrait>,
}

impl ShopService {
    pub fn new(
        shop_repo: Arc<dyn ShopRepositoryTrait>,
        user_repo: Arc<dyn UserRepositoryTrait>,
    ) -> Self {
        Self {
            shop_repo,
            user_repo,
        }
    }

    pub async fn get_items(&self) -> Result<Vec<ShopItem>, ApiError> {
        Ok(self.shop_repo.get_active_items().await.map_err(DbError::from)?)
    }

    pub async fn can_purchase(&self, user_id: i64, item_id: i64) -> Result<CanPurchaseRes, ApiError> {
        let item = self.find_item(item_id).await?;
        let balance = self.balance_of(user_id).await?;
        let owned = self
            .shop_repo
            .owns_item(user_id, item_id)
            .await
            .map_err(DbError::from)?;
        Ok(CanPurchaseRes {
            can_purchase: item.is_active && !owned && balance >= item.price as i64,
            price: item.price,
            balance,
            owned,
        })
    }

    pub async fn purchase(&self, user_id: i64, item_id: i64) -> Result<PurchaseRes, ApiError> {
        let item = self.find_item(item_id).await?;
        if !item.is_active {
            return Err(ShopError::ItemInactive.into());
        }
        if self
            .shop_repo
            .owns_item(user_id, item_id)
            .await
            .map_err(DbError::from)?
        {
            return Err(ShopError::AlreadyOwned.into());
        }
        // 并发购买由仓库内的条件扣分 + 唯一键兜底
        let outcome = self
            .shop_repo
            .purchase(user_id, &item)
            .await
            .map_err(|err| match err {
                sqlx::Error::RowNotFound => ApiError::from(UserError::UserNotFound),
                err => ApiError::from(DbError::from(err)),
            })?;
        match outcome {
            PurchaseOutcome::Purchased { new_total } => {
                tracing::info!(
                    "purchase - user_id:{} | sku:{} | price:{} | total:{}",
                    user_id,
                    item.sku,
                    item.price,
                    new_total
                );
                Ok(PurchaseRes {
                    item_id,
                    total_score: new_total,
                })
            }
            PurchaseOutcome::AlreadyOwned => Err(ShopError::AlreadyOwned.into()),
            PurchaseOutcome::InsufficientPoints { balance } => Err(ShopError::InsufficientPoints {
                price: item.price,
                balance,
            }
            .into()),
        }
    }

    async fn find_item(&self, item_id: i64) -> Result<ShopItem, ApiError> {
        Ok(self
            .shop_repo
            .find_item(item_id)
            .await
            .map_err(DbError::from)?
            .ok_or(ShopError::ItemNotFound)?)
    }

    async fn balance_of(&self, user_id: i64) -> Result<i64, ApiError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(DbError::from)?
            .ok_or(UserError::UserNotFound)?;
        Ok(user.total_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory_repository::MemoryStore;

    fn item(id: i64, price: i32, is_active: bool) -> ShopItem {
        ShopItem {
            id,
            sku: format!("SKU_{id}"),
            name: format!("item {id}"),
            price,
            is_active,
        }
    }

    async fn setup(balance: i64) -> (MemoryStore, ShopService, i64) {
        let store = MemoryStore::default();
        let user_id = store.add_user("sam", balance).await;
        store.add_item(item(1, 50, true)).await;
        store.add_item(item(2, 20, true)).await;
        store.add_item(item(3, 10, false)).await;
        let service = ShopService::new(Arc::new(store.clone()), Arc::new(store.clone()));
        (store, service, user_id)
    }

    #[tokio::test]
    async fn active_items_sorted_by_price() {
        let (_, service, _) = setup(0).await;
        let ids: Vec<_> = service.get_items().await.unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn purchase_deducts_price_once() {
        let (store, service, user_id) = setup(60).await;

        let res = service.purchase(user_id, 1).await.unwrap();
        assert_eq!(res.total_score, 10);
        assert!(store.snapshot().await.inventory.contains(&(user_id, 1)));

        let err = service.purchase(user_id, 1).await.unwrap_err();
        assert!(matches!(err, ApiError::ShopError(ShopError::AlreadyOwned)));
        assert_eq!(store.snapshot().await.total_of(user_id), Some(10));
    }

    #[tokio::test]
    async fn purchase_errors() {
        let (store, service, user_id) = setup(15).await;

        let err = service.purchase(user_id, 99).await.unwrap_err();
        assert!(matches!(err, ApiError::ShopError(ShopError::ItemNotFound)));
        let err = service.purchase(user_id, 3).await.unwrap_err();
        assert!(matches!(err, ApiError::ShopError(ShopError::ItemInactive)));
        let err = service.purchase(user_id, 2).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::ShopError(ShopError::InsufficientPoints {
                price: 20,
                balance: 15
            })
        ));
        assert_eq!(store.snapshot().await.total_of(user_id), Some(15));
        assert!(store.snapshot().await.inventory.is_empty());
    }

    #[tokio::test]
    async fn can_purchase_reports_reason_fields() {
        let (_, service, user_id) = setup(30).await;

        let res = service.can_purchase(user_id, 2).await.unwrap();
        assert!(res.can_purchase);
        assert_eq!(res.price, 20);

        let res = service.can_purchase(user_id, 1).await.unwrap();
        assert!(!res.can_purchase);
        assert_eq!(res.balance, 30);

        service.purchase(user_id, 2).await.unwrap();
        let res = service.can_purchase(user_id, 2).await.unwrap();
        assert!(res.owned);
        assert!(!res.can_purchase);
    }
}
