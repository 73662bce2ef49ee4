use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 一局游戏的成绩, 写入后不再修改
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, sqlx::FromRow)]
pub struct GameRecord {
    pub id: i64,
    pub user_id: i64,
    pub points: i32,
    pub correct_items: i32,
    pub total_items: i32,
    pub duration_ms: i32,
    pub played_at: DateTime<Utc>,
}

impl GameRecord {
    /// 正确率, 没有物品时为 0
    pub fn efficiency(&self) -> f64 {
        if self.total_items == 0 {
            0.0
        } else {
            self.correct_items as f64 / self.total_items as f64
        }
    }
}

/// 待写入的成绩
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NewGameRecord {
    pub points: i32,
    pub correct_items: i32,
    pub total_items: i32,
    pub duration_ms: i32,
}
