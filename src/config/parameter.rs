use dotenv;
use once_cell::sync::OnceCell;
use thiserror::Error;

static APP_CONFIG: OnceCell<AppConfig> = OnceCell::new();

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("config -- env var `{0}` is not exist")]
    Missing(&'static str),
    #[error("config -- env var `{name}` is invalid: {value}")]
    Invalid { name: &'static str, value: String },
}

/// 启动参数
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub master_db_url: String,
    pub slave_db_url: String,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_exp_minutes: i64,
    pub jwt_refresh_exp_minutes: i64,
    pub cookie_secure: bool,
    pub rules_file: String,
    pub log_dir: String,
}

impl AppConfig {
    /// 从任意 key-value 来源解析配置
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let master_db_url = lookup("MASTER_DB_URL").ok_or(ConfigError::Missing("MASTER_DB_URL"))?;
        // 未配置从库时读写都走主库
        let slave_db_url = lookup("SLAVE_DB_URL").unwrap_or_else(|| master_db_url.clone());
        let jwt_secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        Ok(Self {
            port: parse_or(&lookup, "PORT", 5000)?,
            master_db_url,
            slave_db_url,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            jwt_secret,
            jwt_exp_minutes: parse_or(&lookup, "JWT_EXP_MINUTES", 60)?,
            jwt_refresh_exp_minutes: parse_or(&lookup, "JWT_REFRESH_EXP_MINUTES", 60 * 24 * 7)?,
            cookie_secure: parse_or(&lookup, "COOKIE_SECURE", false)?,
            rules_file: lookup("RULES_FILE").unwrap_or_else(|| "static/data/rules.json".to_string()),
            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "log".to_string()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

pub fn init() -> Result<&'static AppConfig, ConfigError> {
    // .env 不存在时直接使用进程环境变量
    dotenv::dotenv().ok();
    // 给日志库设置环境变量
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "debug")
    }

    let config = AppConfig::from_lookup(|name| std::env::var(name).ok())?;
    Ok(APP_CONFIG.get_or_init(|| config))
}
