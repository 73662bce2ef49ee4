//! 成绩提交编排: 记分 -> 规则判断 -> 发放徽章
//!
//! 整个提交共用一个事务. 徽章阶段在 savepoint 内执行, 失败时只回滚到 savepoint,
//! 分数照常提交, 返回部分成功; 提交失败则全部回滚.

use crate::error::game_error::{ErrorKind, GameError};
use crate::model::badge::OwnedBadge;
use crate::model::score::{GameRecord, NewGameRecord};
use crate::model::user::{LeaderboardEntry, UserStats};
use crate::repository::score_repository::{LedgerTransaction, ScoreRepositoryTrait};
use crate::repository::user_repository::UserRepositoryTrait;
use crate::service::badge_catalog::BadgeCatalog;
use crate::service::grant_recorder::GrantRecorder;
use crate::service::point_ledger::PointLedger;
use crate::service::rule_evaluator::{RuleContext, RuleEvaluator};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

const BADGE_SAVEPOINT: &str = "badge_stage";
pub const MAX_LEADERBOARD_LIMIT: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStage {
    Received,
    LedgerUpdated,
    Evaluated,
    GrantsRecorded,
    Done,
}

/// 徽章阶段的失败信息, 分数已保存
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StageFailure {
    pub failed_after: SubmissionStage,
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScoreSubmission {
    pub user_id: i64,
    pub total_score: i64,
    pub score_id: i64,
    pub new_badges: Vec<OwnedBadge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge_error: Option<StageFailure>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserScore {
    pub user_id: i64,
    pub total_score: i64,
}

pub struct ScoreService {
    score_repo: Arc<dyn ScoreRepositoryTrait>,
    user_repo: Arc<dyn UserRepositoryTrait>,
    ledger: PointLedger,
    catalog: Arc<BadgeCatalog>,
    evaluator: RuleEvaluator,
    recorder: GrantRecorder,
}

impl ScoreService {
    pub fn new(
        score_repo: Arc<dyn ScoreRepositoryTrait>,
        user_repo: Arc<dyn UserRepositoryTrait>,
        catalog: Arc<BadgeCatalog>,
        evaluator: RuleEvaluator,
    ) -> Self {
        Self {
            ledger: PointLedger::new(Arc::clone(&score_repo)),
            score_repo,
            user_repo,
            catalog,
            evaluator,
            recorder: GrantRecorder::new(),
        }
    }

    pub async fn submit_score_and_evaluate(
        &self,
        user_id: i64,
        record: NewGameRecord,
    ) -> Result<ScoreSubmission, GameError> {
        log_stage(user_id, SubmissionStage::Received);
        PointLedger::validate(user_id, &record)?;

        let mut tx = self.score_repo.begin().await?;
        let recorded = self.ledger.record_in(tx.as_mut(), user_id, &record).await;
        let entry = match recorded {
            Ok(entry) => entry,
            Err(err) => return Err(abort(tx, err).await),
        };
        log_stage(user_id, SubmissionStage::LedgerUpdated);

        if let Err(err) = tx.savepoint(BADGE_SAVEPOINT).await {
            return Err(abort(tx, err.into()).await);
        }
        let mut new_badges = vec![];
        let mut badge_error = None;
        let badge_stage = self
            .badge_stage(tx.as_mut(), user_id, entry.total_score, &entry.game_record)
            .await;
        match badge_stage {
            Ok(granted) => {
                if let Err(err) = tx.release_savepoint(BADGE_SAVEPOINT).await {
                    return Err(abort(tx, err.into()).await);
                }
                new_badges = granted;
            }
            Err((failed_after, err)) => {
                tracing::warn!(
                    "badge stage failed, score kept - user_id:{} | failed_after:{:?} | error:{}",
                    user_id,
                    failed_after,
                    err.to_string()
                );
                if let Err(rollback_err) = tx.rollback_to_savepoint(BADGE_SAVEPOINT).await {
                    return Err(abort(tx, rollback_err.into()).await);
                }
                badge_error = Some(StageFailure {
                    failed_after,
                    kind: err.kind(),
                    message: match err.kind() {
                        ErrorKind::Internal => "badge evaluation failed".to_string(),
                        _ => err.to_string(),
                    },
                });
            }
        }

        // 提交失败时事务随 drop 回滚
        tx.commit().await?;
        log_stage(user_id, SubmissionStage::Done);

        Ok(ScoreSubmission {
            user_id,
            total_score: entry.total_score,
            score_id: entry.game_record.id,
            new_badges,
            badge_error,
        })
    }

    async fn badge_stage(
        &self,
        tx: &mut dyn LedgerTransaction,
        user_id: i64,
        updated_total: i64,
        game_record: &GameRecord,
    ) -> Result<Vec<OwnedBadge>, (SubmissionStage, GameError)> {
        let failed = |err: GameError| (SubmissionStage::LedgerUpdated, err);
        let catalog = self.catalog.list_all().await.map_err(failed)?;
        let owned_codes = self.catalog.get_owned(tx, user_id).await.map_err(failed)?;

        let ctx = RuleContext {
            user_id,
            updated_total,
            game_record,
            owned_codes: &owned_codes,
        };
        let pending = self.evaluator.evaluate(&catalog, &ctx, Utc::now());
        log_stage(user_id, SubmissionStage::Evaluated);

        let awarded_at = match pending.first() {
            Some(first) => first.awarded_at,
            None => {
                log_stage(user_id, SubmissionStage::GrantsRecorded);
                return Ok(vec![]);
            }
        };
        let badges: Vec<_> = pending.into_iter().map(|p| p.badge).collect();
        let grants = self
            .recorder
            .award(tx, user_id, &badges, awarded_at)
            .await
            .map_err(|err| (SubmissionStage::Evaluated, err))?;
        log_stage(user_id, SubmissionStage::GrantsRecorded);

        Ok(badges
            .into_iter()
            .filter(|badge| grants.iter().any(|g| g.badge_id == badge.id))
            .map(|badge| OwnedBadge {
                code: badge.code,
                label: badge.label,
                description: badge.description,
                awarded_at,
            })
            .collect())
    }

    pub async fn get_user_score(&self, user_id: i64) -> Result<UserScore, GameError> {
        match self.user_repo.find_by_id(user_id).await? {
            Some(user) => Ok(UserScore {
                user_id: user.id,
                total_score: user.total_score,
            }),
            None => Err(GameError::NotFound(format!("user {user_id} not found"))),
        }
    }

    pub async fn get_leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, GameError> {
        if limit == 0 || limit > MAX_LEADERBOARD_LIMIT {
            return Err(GameError::InvalidInput(format!(
                "limit must be between 1 and {MAX_LEADERBOARD_LIMIT}"
            )));
        }
        Ok(self.score_repo.get_leaderboard(limit).await?)
    }

    pub async fn get_user_stats(&self, user_id: i64) -> Result<UserStats, GameError> {
        if self.user_repo.find_by_id(user_id).await?.is_none() {
            return Err(GameError::NotFound(format!("user {user_id} not found")));
        }
        Ok(self.score_repo.get_user_stats(user_id).await?)
    }
}

fn log_stage(user_id: i64, stage: SubmissionStage) {
    tracing::debug!("submit_score - user_id:{} | stage:{:?}", user_id, stage);
}

async fn abort(tx: Box<dyn LedgerTransaction>, err: GameError) -> GameError {
    if let Err(rollback_err) = tx.rollback().await {
        tracing::error!("submit_score rollback failed: {}", rollback_err.to_string());
    }
    err
}
