use crate::error::game_error::GameError;
use crate::model::score::{GameRecord, NewGameRecord};
use crate::repository::score_repository::{LedgerTransaction, ScoreRepositoryTrait};
use chrono::Utc;
use std::sync::Arc;

/// 记分后的结果
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerEntry {
    pub total_score: i64,
    pub game_record: GameRecord,
}

/// 积分账本: 写成绩 + 累加总分, 两者在同一事务里
pub struct PointLedger {
    score_repo: Arc<dyn ScoreRepositoryTrait>,
}

impl PointLedger {
    pub fn new(score_repo: Arc<dyn ScoreRepositoryTrait>) -> Self {
        Self { score_repo }
    }

    /// 写库之前的参数检查
    pub fn validate(user_id: i64, record: &NewGameRecord) -> Result<(), GameError> {
        if user_id <= 0 {
            return Err(GameError::InvalidInput(format!("invalid user id: {user_id}")));
        }
        if record.points < 0 {
            return Err(GameError::InvalidInput("points must not be negative".to_string()));
        }
        if record.correct_items < 0 || record.total_items < 0 || record.duration_ms < 0 {
            return Err(GameError::InvalidInput(
                "item counts and duration must not be negative".to_string(),
            ));
        }
        if record.correct_items > record.total_items {
            return Err(GameError::InvalidInput(
                "correct_items must not exceed total_items".to_string(),
            ));
        }
        Ok(())
    }

    /// 单独记分, 自己开启并提交事务
    pub async fn record_score(
        &self,
        user_id: i64,
        record: &NewGameRecord,
    ) -> Result<LedgerEntry, GameError> {
        Self::validate(user_id, record)?;
        let mut tx = self.score_repo.begin().await?;
        let recorded = self.record_in(tx.as_mut(), user_id, record).await;
        match recorded {
            Ok(entry) => {
                tx.commit().await?;
                Ok(entry)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!("record_score rollback failed: {}", rollback_err.to_string());
                }
                Err(err)
            }
        }
    }

    /// 在调用方的事务里记分, 失败时由调用方回滚
    pub async fn record_in(
        &self,
        tx: &mut dyn LedgerTransaction,
        user_id: i64,
        record: &NewGameRecord,
    ) -> Result<LedgerEntry, GameError> {
        Self::validate(user_id, record)?;
        if !tx.user_exists(user_id).await? {
            return Err(GameError::NotFound(format!("user {user_id} not found")));
        }
        let game_record = tx.insert_game_record(user_id, record, Utc::now()).await?;
        let total_score = tx.add_points(user_id, record.points as i64).await?;
        tracing::debug!(
            "record_score - user_id:{} | score_id:{} | points:{} | total:{}",
            user_id,
            game_record.id,
            record.points,
            total_score
        );
        Ok(LedgerEntry {
            total_score,
            game_record,
        })
    }
}
