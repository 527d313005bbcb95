//! # Virtual-Bridge 命令入口
//!
//! Virtual-Bridge 的命令行入口，把一条浏览器控制命令分发到本地启动器服务。
//!
//! ## 主要功能
//! - 初始化日志与配置
//! - 基于文件存储构建配置仓库
//! - 分发单条命令并输出归一化的 JSON 结果
//!
//! ## 用法
//! `virtual-bridge <command> [param-json ...]`，例如：
//! - `virtual-bridge list-profiles`
//! - `virtual-bridge launch 3`
//! - `virtual-bridge set-global-data '"theme"' '"dark"'`
//!
//! ## 环境变量
//! - `VBRIDGE_LAUNCHER_URL`: 启动器服务地址（默认: http://localhost:9528）
//! - `VBRIDGE_DATA_DIR`: 持久化目录（默认: ~/.virtual-bridge）
//! - `VBRIDGE_DEFAULT_TIMEOUT_MS`: 默认命令超时（默认: 2000）

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use virtual_bridge::{
    config::Config,
    dispatch::CommandDispatcher,
    launcher::LauncherClient,
    native::CallbackRegistry,
    store::{ConfigStore, FileBackend},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing - respect RUST_LOG environment variable
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| v.parse::<Level>().ok())
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    info!("Virtual-Bridge v{}", virtual_bridge::VERSION);

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: launcher={}, data_dir={}",
        config.launcher_url, config.data_dir
    );

    // Command name plus JSON-encoded positional parameters; bare words are
    // taken as strings.
    let mut cli = std::env::args().skip(1);
    let name = cli
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: virtual-bridge <command> [param-json ...]"))?;
    let params: Vec<Value> = cli
        .map(|raw| serde_json::from_str(&raw).unwrap_or(Value::String(raw)))
        .collect();

    // A standalone process has no host channel, so the probe settles on the
    // launcher REST service.
    let backend = Arc::new(FileBackend::new(&config.data_dir));
    let store = Arc::new(ConfigStore::new(backend, None));
    let launcher = LauncherClient::new(&config.launcher_url);
    let registry = Arc::new(CallbackRegistry::new());

    let dispatcher = CommandDispatcher::new(
        None,
        registry,
        launcher,
        store,
        Duration::from_millis(config.default_timeout_ms),
    );

    let response = dispatcher.dispatch_named(&name, params).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
