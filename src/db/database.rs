use crate::config::parameter::AppConfig;
use async_trait::async_trait;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{Error, MySql, Pool};

pub struct Database {
    master_pool: Pool<MySql>,
    slave_pool: Pool<MySql>,
}

#[async_trait]
pub trait DatabaseTrait {
    async fn init(config: &AppConfig) -> Result<Self, Error>
    where
        Self: Sized;
    async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError>;
    fn get_master_pool(&self) -> &Pool<MySql>;
    fn get_slave_pool(&self) -> &Pool<MySql>;
}

#[async_trait]
impl DatabaseTrait for Database {
    async fn init(config: &AppConfig) -> Result<Self, Error> {
        let master_pool = MySqlPoolOptions::new()
            .max_connections(config.db_max_connections)
            .max_lifetime(std::time::Duration::from_secs(6 * 60 * 60))
            .connect(&config.master_db_url)
            .await?;
        let slave_pool = MySqlPoolOptions::new()
            .max_connections(config.db_max_connections)
            .max_lifetime(std::time::Duration::from_secs(6 * 60 * 60))
            .connect(&config.slave_db_url)
            .await?;

        Ok(Self {
            master_pool,
            slave_pool,
        })
    }

    /// 建表 + 写入徽章目录
    async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.master_pool).await
    }

    fn get_master_pool(&self) -> &Pool<MySql> {
        &self.master_pool
    }

    fn get_slave_pool(&self) -> &Pool<MySql> {
        &self.slave_pool
    }
}
