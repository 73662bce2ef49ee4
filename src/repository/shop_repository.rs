use crate::db::database::{Database, DatabaseTrait};
use crate::model::shop::ShopItem;
use async_trait::async_trait;
use std::sync::Arc;

/// 购买结果
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Purchased { new_total: i64 },
    AlreadyOwned,
    InsufficientPoints { balance: i64 },
}

#[async_trait]
pub trait ShopRepositoryTrait: Send + Sync {
    /// 上架中的商品, 价格升序
    async fn get_active_items(&self) -> Result<Vec<ShopItem>, sqlx::Error>;
    async fn find_item(&self, item_id: i64) -> Result<Option<ShopItem>, sqlx::Error>;
    async fn owns_item(&self, user_id: i64, item_id: i64) -> Result<bool, sqlx::Error>;
    /// 扣分 + 写入背包, 同一事务
    async fn purchase(&self, user_id: i64, item: &ShopItem) -> Result<PurchaseOutcome, sqlx::Error>;
}

#[derive(Clone)]
pub struct ShopRepository {
    pub(crate) db_conn: Arc<Database>,
}

impl ShopRepository {
    pub fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }
}

#[async_trait]
impl ShopRepositoryTrait for ShopRepository {
    async fn get_active_items(&self) -> Result<Vec<ShopItem>, sqlx::Error> {
        sqlx::query_as::<_, ShopItem>(
            "SELECT id, sku, name, price, is_active FROM shop_items
             WHERE is_active = 1 ORDER BY price ASC, id ASC",
        )
        .fetch_all(self.db_conn.get_slave_pool())
        .await
    }

    async fn find_item(&self, item_id: i64) -> Result<Option<ShopItem>, sqlx::Error> {
        sqlx::query_as::<_, ShopItem>(
            "SELECT id, sku, name, price, is_active FROM shop_items WHERE id = ?",
        )
        .bind(item_id)
        .fetch_optional(self.db_conn.get_master_pool())
        .await
    }

    async fn owns_item(&self, user_id: i64, item_id: i64) -> Result<bool, sqlx::Error> {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT item_id FROM user_inventory WHERE user_id = ? AND item_id = ?")
                .bind(user_id)
                .bind(item_id)
                .fetch_optional(self.db_conn.get_master_pool())
                .await?;
        Ok(row.is_some())
    }

    async fn purchase(&self, user_id: i64, item: &ShopItem) -> Result<PurchaseOutcome, sqlx::Error> {
        let mut tx = self.db_conn.get_master_pool().begin().await?;

        // 余额不足时不更新
        let sql_ret = sqlx::query(
            "UPDATE users SET total_score = total_score - ? WHERE id = ? AND total_score >= ?",
        )
        .bind(item.price)
        .bind(user_id)
        .bind(item.price)
        .execute(&mut *tx)
        .await?;
        if sql_ret.rows_affected() == 0 {
            let (balance,): (i64,) = sqlx::query_as("SELECT total_score FROM users WHERE id = ?")
                .bind(user_id)
                .fetch_one(&mut *tx)
                .await?;
            tx.rollback().await?;
            return Ok(PurchaseOutcome::InsufficientPoints { balance });
        }

        let inserted = sqlx::query("INSERT INTO user_inventory (user_id, item_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(item.id)
            .execute(&mut *tx)
            .await;
        match inserted {
            Ok(_) => {}
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                tx.rollback().await?;
                return Ok(PurchaseOutcome::AlreadyOwned);
            }
            Err(err) => return Err(err),
        }

        let (new_total,): (i64,) = sqlx::query_as("SELECT total_score FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::debug!(
            "purchase - user_id:{} | item_id:{} | new_total:{}",
            user_id,
            item.id,
            new_total
        );
        Ok(PurchaseOutcome::Purchased { new_total })
    }
}
