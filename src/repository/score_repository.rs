use crate::db::database::{Database, DatabaseTrait};
use crate::model::badge::Grant;
use crate::model::score::{GameRecord, NewGameRecord};
use crate::model::user::{LeaderboardEntry, UserStats};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Executor, MySql, Transaction};
use std::collections::HashSet;
use std::sync::Arc;

/// 一次成绩提交对应的数据库事务
///
/// 积分更新、成绩写入、徽章发放都在同一个事务里完成, `commit` 之前的写入对其他请求不可见.
#[async_trait]
pub trait LedgerTransaction: Send {
    /// 用户是否存在
    async fn user_exists(&mut self, user_id: i64) -> Result<bool, sqlx::Error>;

    /// 写入一局成绩
    async fn insert_game_record(
        &mut self,
        user_id: i64,
        record: &NewGameRecord,
        played_at: DateTime<Utc>,
    ) -> Result<GameRecord, sqlx::Error>;

    /// 累加积分, 返回累加后的总分
    async fn add_points(&mut self, user_id: i64, points: i64) -> Result<i64, sqlx::Error>;

    /// 用户当前已拥有的徽章 code
    async fn owned_badge_codes(&mut self, user_id: i64) -> Result<HashSet<String>, sqlx::Error>;

    /// 写入徽章发放记录, (user_id, badge_id) 已存在时返回 false
    async fn insert_grant(&mut self, grant: &Grant) -> Result<bool, sqlx::Error>;

    async fn savepoint(&mut self, name: &str) -> Result<(), sqlx::Error>;
    async fn rollback_to_savepoint(&mut self, name: &str) -> Result<(), sqlx::Error>;
    async fn release_savepoint(&mut self, name: &str) -> Result<(), sqlx::Error>;

    async fn commit(self: Box<Self>) -> Result<(), sqlx::Error>;
    async fn rollback(self: Box<Self>) -> Result<(), sqlx::Error>;
}

#[async_trait]
pub trait ScoreRepositoryTrait: Send + Sync {
    /// 开启成绩提交事务
    async fn begin(&self) -> Result<Box<dyn LedgerTransaction>, sqlx::Error>;

    /// 总分排行
    async fn get_leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, sqlx::Error>;

    /// 用户游戏统计
    async fn get_user_stats(&self, user_id: i64) -> Result<UserStats, sqlx::Error>;
}

#[derive(Clone)]
pub struct ScoreRepository {
    pub(crate) db_conn: Arc<Database>,
}

impl ScoreRepository {
    pub fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }
}

#[async_trait]
impl ScoreRepositoryTrait for ScoreRepository {
    async fn begin(&self) -> Result<Box<dyn LedgerTransaction>, sqlx::Error> {
        let tx = self.db_conn.get_master_pool().begin().await?;
        Ok(Box::new(MySqlLedgerTransaction { tx }))
    }

    async fn get_leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
        let entries = sqlx::query_as::<_, LeaderboardEntry>(
            "SELECT username, total_score FROM users ORDER BY total_score DESC, id ASC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(self.db_conn.get_slave_pool())
        .await?;
        Ok(entries)
    }

    async fn get_user_stats(&self, user_id: i64) -> Result<UserStats, sqlx::Error> {
        // 没有成绩时 MAX/SUM 为 NULL
        let (games_played, best_points, correct_items): (i64, Option<i64>, Option<i64>) =
            sqlx::query_as(
                "SELECT COUNT(*), CAST(MAX(points) AS SIGNED), CAST(SUM(correct_items) AS SIGNED)
                 FROM scores WHERE user_id = ?",
            )
            .bind(user_id)
            .fetch_one(self.db_conn.get_slave_pool())
            .await?;
        Ok(UserStats {
            games_played,
            best_points: best_points.unwrap_or(0),
            correct_items: correct_items.unwrap_or(0),
        })
    }
}

pub struct MySqlLedgerTransaction {
    tx: Transaction<'static, MySql>,
}

#[async_trait]
impl LedgerTransaction for MySqlLedgerTransaction {
    async fn user_exists(&mut self, user_id: i64) -> Result<bool, sqlx::Error> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row.is_some())
    }

    async fn insert_game_record(
        &mut self,
        user_id: i64,
        record: &NewGameRecord,
        played_at: DateTime<Utc>,
    ) -> Result<GameRecord, sqlx::Error> {
        let sql_ret = sqlx::query(
            "INSERT INTO scores (user_id, points, correct_items, total_items, duration_ms, played_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(record.points)
        .bind(record.correct_items)
        .bind(record.total_items)
        .bind(record.duration_ms)
        .bind(played_at)
        .execute(&mut *self.tx)
        .await?;
        tracing::debug!("insert_game_record - id:{}", sql_ret.last_insert_id());

        Ok(GameRecord {
            id: sql_ret.last_insert_id() as i64,
            user_id,
            points: record.points,
            correct_items: record.correct_items,
            total_items: record.total_items,
            duration_ms: record.duration_ms,
            played_at,
        })
    }

    async fn add_points(&mut self, user_id: i64, points: i64) -> Result<i64, sqlx::Error> {
        // 基于当前已提交的值累加, 同一用户并发提交时不会丢分
        let sql_ret = sqlx::query("UPDATE users SET total_score = total_score + ? WHERE id = ?")
            .bind(points)
            .bind(user_id)
            .execute(&mut *self.tx)
            .await?;
        if sql_ret.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        let (total_score,): (i64,) = sqlx::query_as("SELECT total_score FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(total_score)
    }

    async fn owned_badge_codes(&mut self, user_id: i64) -> Result<HashSet<String>, sqlx::Error> {
        let codes: Vec<(String,)> = sqlx::query_as(
            "SELECT b.code FROM user_badges ub JOIN badges b ON b.id = ub.badge_id
             WHERE ub.user_id = ?",
        )
        .bind(user_id)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(codes.into_iter().map(|(code,)| code).collect())
    }

    async fn insert_grant(&mut self, grant: &Grant) -> Result<bool, sqlx::Error> {
        let ret = sqlx::query(
            "INSERT INTO user_badges (user_id, badge_id, awarded_at) VALUES (?, ?, ?)",
        )
        .bind(grant.user_id)
        .bind(grant.badge_id)
        .bind(grant.awarded_at)
        .execute(&mut *self.tx)
        .await;
        match ret {
            Ok(_) => Ok(true),
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => Ok(false),
            Err(err) => Err(err),
        }
    }

    async fn savepoint(&mut self, name: &str) -> Result<(), sqlx::Error> {
        // 不带参数, 走文本协议
        let sql = format!("SAVEPOINT {name}");
        (&mut *self.tx).execute(sql.as_str()).await?;
        Ok(())
    }

    async fn rollback_to_savepoint(&mut self, name: &str) -> Result<(), sqlx::Error> {
        let sql = format!("ROLLBACK TO SAVEPOINT {name}");
        (&mut *self.tx).execute(sql.as_str()).await?;
        Ok(())
    }

    async fn release_savepoint(&mut self, name: &str) -> Result<(), sqlx::Error> {
        let sql = format!("RELEASE SAVEPOINT {name}");
        (&mut *self.tx).execute(sql.as_str()).await?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), sqlx::Error> {
        self.tx.commit().await
    }

    async fn rollback(self: Box<Self>) -> Result<(), sqlx::Error> {
        self.tx.rollback().await
    }
}
