use crate::db::database::{Database, DatabaseTrait};
use crate::model::user::User;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// 新用户
#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, sqlx::Error>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;
    async fn username_exists(&self, username: &str) -> Result<bool, sqlx::Error>;
    async fn email_exists(&self, email: &str) -> Result<bool, sqlx::Error>;
    /// 写入新用户, 返回完整记录
    async fn create_user(&self, user: &NewUser) -> Result<User, sqlx::Error>;
    async fn update_last_login(&self, user_id: i64, at: DateTime<Utc>) -> Result<(), sqlx::Error>;
}

#[derive(Clone)]
pub struct UserRepository {
    pub(crate) db_conn: Arc<Database>,
}

impl UserRepository {
    pub fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }
}

const USER_COLUMNS: &str =
    "id, username, email, password_hash, total_score, created_at, last_login_at";

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, sqlx::Error> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .fetch_optional(self.db_conn.get_master_pool())
            .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");
        sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(self.db_conn.get_master_pool())
            .await
    }

    async fn username_exists(&self, username: &str) -> Result<bool, sqlx::Error> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(self.db_conn.get_master_pool())
            .await?;
        Ok(row.is_some())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, sqlx::Error> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(self.db_conn.get_master_pool())
            .await?;
        Ok(row.is_some())
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, sqlx::Error> {
        let sql_ret = sqlx::query(
            "INSERT INTO users (username, email, password_hash, total_score, created_at)
             VALUES (?, ?, ?, 0, ?)",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(self.db_conn.get_master_pool())
        .await?;
        tracing::debug!("create_user - id:{}", sql_ret.last_insert_id());

        Ok(User {
            id: sql_ret.last_insert_id() as i64,
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            total_score: 0,
            created_at: user.created_at,
            last_login_at: None,
        })
    }

    async fn update_last_login(&self, user_id: i64, at: DateTime<Utc>) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = ? WHERE id = ?")
            .bind(at)
            .bind(user_id)
            .execute(self.db_conn.get_master_pool())
            .await?;
        Ok(())
    }
}
