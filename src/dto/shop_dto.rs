use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct ShopItemReq {
    #[validate(range(min = 1, message = "item_id must be positive"))]
    pub item_id: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CanPurchaseRes {
    pub can_purchase: bool,
    pub price: i32,
    pub balance: i64,
    pub owned: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PurchaseRes {
    pub item_id: i64,
    pub total_score: i64,
}
