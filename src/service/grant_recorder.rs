use crate::error::game_error::GameError;
use crate::model::badge::{Badge, Grant};
use crate::repository::score_repository::LedgerTransaction;
use chrono::{DateTime, Utc};

/// 徽章发放记录
///
/// (user_id, badge_id) 的唯一约束是并发下的最终保障: 重复写入视为已发放, 不算错误.
#[derive(Clone, Copy, Debug, Default)]
pub struct GrantRecorder;

impl GrantRecorder {
    pub fn new() -> Self {
        Self
    }

    /// 返回实际写入的发放记录, 已存在的跳过
    pub async fn award(
        &self,
        tx: &mut dyn LedgerTransaction,
        user_id: i64,
        badges: &[Badge],
        awarded_at: DateTime<Utc>,
    ) -> Result<Vec<Grant>, GameError> {
        let mut granted = Vec::with_capacity(badges.len());
        for badge in badges {
            let grant = Grant {
                user_id,
                badge_id: badge.id,
                awarded_at,
            };
            if tx.insert_grant(&grant).await? {
                tracing::info!("badge granted - user_id:{} | code:{}", user_id, badge.code);
                granted.push(grant);
            } else {
                tracing::warn!(
                    "badge already granted, skipped - user_id:{} | code:{}",
                    user_id,
                    badge.code
                );
            }
        }
        Ok(granted)
    }
}
