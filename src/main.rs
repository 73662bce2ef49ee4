use crate::config::parameter;
use crate::db::database::{self, DatabaseTrait};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use std::sync::Arc;

mod config;
mod db;
mod dto;
mod error;
mod handler;
mod middleware;
mod model;
mod repository;
mod response;
mod routes;
mod service;
mod state;
mod utils;

// 内存分配器
#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[cfg(target_env = "msvc")]
use mimalloc::MiMalloc;

#[cfg(target_env = "msvc")]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() {
    // 参数初始化
    let config = match parameter::init() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Server error: {}", err);
            std::process::exit(1);
        }
    };

    // 日志
    let file_appender = match RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("logger")
        .filename_suffix("log")
        .max_log_files(60)
        .build(&config.log_dir)
    {
        Ok(appender) => appender,
        Err(err) => {
            eprintln!("file log init failed: {}", err);
            std::process::exit(1);
        }
    };
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let file_log_subscriber = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_timer(time::LocalTime::rfc_3339());

    let console_subscriber = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_timer(time::LocalTime::rfc_3339());
    tracing_subscriber::registry()
        .with(file_log_subscriber)
        .with(console_subscriber)
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let connection = match database::Database::init(config).await {
        Ok(connection) => connection,
        Err(err) => {
            tracing::error!("Database error: {}", err.to_string());
            std::process::exit(1);
        }
    };
    // 建表 + 徽章目录
    if let Err(err) = connection.migrate().await {
        tracing::error!("Database migrate error: {}", err.to_string());
        std::process::exit(1);
    }
    let mysql_pool = Arc::new(connection);

    let host = format!("0.0.0.0:{}", config.port);
    let listener = match tokio::net::TcpListener::bind(&host).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("bind {} failed: {}", host, err.to_string());
            std::process::exit(1);
        }
    };
    tracing::info!("listening on {}", host);

    if let Err(err) = axum::serve(listener, routes::root::routes(mysql_pool, config)).await {
        tracing::error!("Server error: {}", err.to_string());
    }
}
