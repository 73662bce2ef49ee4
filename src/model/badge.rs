use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 徽章目录项, 进程内只读
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, sqlx::FromRow)]
pub struct Badge {
    pub id: i64,
    pub code: String,
    pub label: String,
    pub description: String,
    // 只做展示, 不参与发放判断
    pub threshold: Option<i32>,
    pub icon: Option<String>,
}

/// 已写入的徽章发放记录
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, sqlx::FromRow)]
pub struct Grant {
    pub user_id: i64,
    pub badge_id: i64,
    pub awarded_at: DateTime<Utc>,
}

/// 用户已获得的徽章 (badges join user_badges)
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, sqlx::FromRow)]
pub struct OwnedBadge {
    pub code: String,
    pub label: String,
    pub description: String,
    pub awarded_at: DateTime<Utc>,
}
