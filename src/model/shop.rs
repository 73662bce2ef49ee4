use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, sqlx::FromRow)]
pub struct ShopItem {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub price: i32,
    pub is_active: bool,
}
