//! Client Builder
//!
//! 提供链式 API 创建 [`BoosterClient`]，可选地在构造时完成一次对端发现等待。

use crate::binding::DeviceBinding;
use crate::client::BoosterClient;
use crate::config::{ClientConfig, ConfigError};
use crate::error::{ClientError, DeviceError, DeviceErrorKind};
use crate::validate::QuaternionPolicy;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// 构建错误
#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Booster Client Builder
///
/// # 示例
///
/// ```rust
/// use booster_client::ClientBuilder;
/// use std::time::Duration;
///
/// # #[cfg(feature = "mock")]
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use booster_client::mock::RecordingBinding;
///
/// // 默认配置
/// let _client = ClientBuilder::new().build(RecordingBinding::new())?;
///
/// // 构造时等待对端发现，未发现则失败
/// let client = ClientBuilder::new()
///     .discovery_timeout(Duration::from_secs(3))
///     .wait_for_discovery(true)
///     .require_discovery(true)
///     .domain_id(1)
///     .build(RecordingBinding::new())?;
/// assert!(client.is_discovered());
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "mock"))]
/// # fn main() {}
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    wait_for_discovery: bool,
    env_overrides: bool,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以已有配置为基础
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// 从 TOML 文件加载配置
    pub fn config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        self.config = ClientConfig::load_from_file(path)?;
        Ok(self)
    }

    /// 设置对端发现的等待时间（默认: 2 秒）
    pub fn discovery_timeout(mut self, timeout: Duration) -> Self {
        self.config.discovery_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// 构造时执行一次发现等待（默认: 否）
    pub fn wait_for_discovery(mut self, wait: bool) -> Self {
        self.wait_for_discovery = wait;
        self
    }

    /// 未完成发现时拒绝控制指令（默认: 否，只记录警告）
    pub fn require_discovery(mut self, require: bool) -> Self {
        self.config.require_discovery = require;
        self
    }

    pub fn quaternion_policy(mut self, policy: QuaternionPolicy) -> Self {
        self.config.quaternion_policy = policy;
        self
    }

    /// 设置通信域 ID（优先于环境变量）
    pub fn domain_id(mut self, domain_id: u32) -> Self {
        self.config.domain_id = Some(domain_id);
        self
    }

    /// 未指定速度时夹爪使用的速度（默认: 500）
    pub fn default_gripper_speed(mut self, speed: u16) -> Self {
        self.config.default_gripper_speed = speed;
        self
    }

    /// 构建前应用环境变量覆盖
    pub fn with_env_overrides(mut self) -> Self {
        self.env_overrides = true;
        self
    }

    /// 构建客户端
    ///
    /// # 错误
    ///
    /// - 配置取值非法：`BuildError::Config`
    /// - 发现等待中绑定出错，或要求发现但超时未发现：`BuildError::Client`
    pub fn build<B: DeviceBinding>(self, binding: B) -> Result<BoosterClient<B>, BuildError> {
        let mut config = self.config;
        if self.env_overrides {
            config = config.with_env_overrides();
        }
        config.validate()?;

        let timeout = config.discovery_timeout();
        let require = config.require_discovery;
        let mut client = BoosterClient::with_config(binding, config);

        if self.wait_for_discovery && !client.wait_for_discovery(timeout)? && require {
            return Err(ClientError::from(DeviceError::new(
                DeviceErrorKind::NotDiscovered,
                format!("no peer discovered within {timeout:?}"),
            ))
            .into());
        }

        Ok(client)
    }
}
