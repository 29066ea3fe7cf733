//! Booster SDK - Booster 人形机器人 Rust SDK
//!
//! 客户端指令层的统一入口：位姿 / 手指参数的多形状输入、范围校验、
//! 指令分发与低层遥测解码。
//!
//! # 架构设计
//!
//! 从底层到高层：
//!
//! - **类型层** (`types`): 规范值类型、封闭枚举、遥测记录及其 CDR 编解码
//! - **客户端层** (`client`): 强制转换、预设、校验、分发器、设备绑定 trait
//!
//! 实时传输（发布/订阅总线）由外部的 [`DeviceBinding`] 实现提供。
//!
//! # 快速开始
//!
//! ```rust
//! use booster_sdk::prelude::*;
//!
//! let p = to_position([0.3, -0.1, 0.2]).unwrap();
//! assert_eq!(p, Position::new(0.3, -0.1, 0.2));
//! ```

pub use booster_client as client;
pub use booster_types as types;

// Prelude 模块
pub mod prelude;

// 客户端层（推荐入口）
pub use booster_client::{
    BoosterClient, BuildError, ClientBuilder, ClientConfig, ClientError, ConfigError,
    DeviceBinding, DeviceError, DeviceErrorKind, DexterousHandOptions, ErrorKind, Input,
    QuaternionPolicy, TelemetryFeed, to_finger_control, to_position, to_posture, to_quaternion,
    to_transform,
};

#[cfg(feature = "mock")]
pub use booster_client::mock;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// 默认日志级别（`RUST_LOG` 未设置时）
pub const DEFAULT_LOG_FILTER: &str = "info";

/// 日志初始化错误
#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Global tracing subscriber already set: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("Failed to bridge log records: {0}")]
    LogBridge(#[from] log::SetLoggerError),
}

/// 初始化日志
///
/// 安装 `tracing-subscriber` 的 fmt 输出，级别由 `RUST_LOG` 控制（默认 `info`），
/// 并把 `log` crate 的记录桥接到 tracing。重复调用是空操作。
///
/// ```rust,no_run
/// booster_sdk::init_logger();
/// tracing::info!("ready");
/// ```
pub fn init_logger() {
    let _ = try_init_logger();
}

/// 初始化日志，返回失败原因
pub fn try_init_logger() -> Result<(), LoggerError> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives)?,
        _ => EnvFilter::try_new(DEFAULT_LOG_FILTER)?,
    };
    init_with_filter(filter)
}

/// 使用显式的过滤指令初始化日志（忽略 `RUST_LOG`）
pub fn init_logger_with(directives: &str) -> Result<(), LoggerError> {
    init_with_filter(EnvFilter::try_new(directives)?)
}

fn init_with_filter(filter: EnvFilter) -> Result<(), LoggerError> {
    // 重复初始化必须在安装订阅者之前失败
    tracing_log::LogTracer::init()?;
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
