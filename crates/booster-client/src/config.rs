//! # 客户端配置
//!
//! 发现等待、四元数策略、夹爪默认速度等运行参数，可以从 TOML 文件加载：
//!
//! ```toml
//! discovery_timeout_ms = 3000
//! require_discovery = true
//! quaternion_policy = "reject"
//! unit_tolerance = 0.001
//! default_gripper_speed = 300
//! domain_id = 2
//! ```
//!
//! 所有字段都可省略，省略时使用默认值。

use crate::telemetry::{DOMAIN_ENV, parse_domain_id};
use crate::validate::{GRIPPER_SPEED_MAX, GRIPPER_SPEED_MIN, QuaternionPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// 配置加载错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// 客户端配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// 对端发现的等待时间（毫秒）
    pub discovery_timeout_ms: u64,

    /// 未完成发现时拒绝控制指令（否则只记录一次警告）
    pub require_discovery: bool,

    /// 四元数单位长度处理策略
    pub quaternion_policy: QuaternionPolicy,

    /// 判断单位长度的容差
    pub unit_tolerance: f64,

    /// 未指定速度时夹爪使用的速度
    pub default_gripper_speed: u16,

    /// 通信域 ID（`None` 时读取环境变量，再回退到 0）
    pub domain_id: Option<u32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            discovery_timeout_ms: 2000,
            require_discovery: false,
            quaternion_policy: QuaternionPolicy::Normalize,
            unit_tolerance: 1e-3,
            default_gripper_speed: 500,
            domain_id: None,
        }
    }
}

impl ClientConfig {
    /// 从 TOML 字符串解析并校验
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 从文件加载
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 应用环境变量覆盖（`BOOSTER_DOMAIN_ID`）
    ///
    /// 环境变量存在且可解析时覆盖 `domain_id`；无法解析时保留原值并记录警告。
    pub fn with_env_overrides(self) -> Self {
        self.with_env_overrides_from(|key| std::env::var(key).ok())
    }

    /// 同 [`with_env_overrides`](Self::with_env_overrides)，环境变量通过 `lookup` 读取
    pub fn with_env_overrides_from(mut self, lookup: impl FnOnce(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(DOMAIN_ENV) {
            match parse_domain_id(&raw) {
                Some(id) => self.domain_id = Some(id),
                None => warn!("Ignoring invalid {}={:?}", DOMAIN_ENV, raw),
            }
        }
        self
    }

    /// 检查取值范围
    pub fn validate(&self) -> Result<(), ConfigError> {
        let speed = i64::from(self.default_gripper_speed);
        if !(GRIPPER_SPEED_MIN..=GRIPPER_SPEED_MAX).contains(&speed) {
            return Err(ConfigError::Invalid {
                field: "default_gripper_speed",
                reason: format!(
                    "{speed} is outside [{GRIPPER_SPEED_MIN}, {GRIPPER_SPEED_MAX}]"
                ),
            });
        }
        if !self.unit_tolerance.is_finite() || self.unit_tolerance < 0.0 {
            return Err(ConfigError::Invalid {
                field: "unit_tolerance",
                reason: format!("{} must be a non-negative number", self.unit_tolerance),
            });
        }
        Ok(())
    }

    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_millis(self.discovery_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_from_empty() {
        let config = ClientConfig::from_toml_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.discovery_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_parse_full() {
        let config = ClientConfig::from_toml_str(
            r#"
            discovery_timeout_ms = 3000
            require_discovery = true
            quaternion_policy = "reject"
            unit_tolerance = 0.01
            default_gripper_speed = 300
            domain_id = 2
            "#,
        )
        .unwrap();
        assert!(config.require_discovery);
        assert_eq!(config.quaternion_policy, QuaternionPolicy::Reject);
        assert_eq!(config.default_gripper_speed, 300);
        assert_eq!(config.domain_id, Some(2));
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = ClientConfig::from_toml_str("default_gripper_speed = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "default_gripper_speed", .. }));

        let err = ClientConfig::from_toml_str("unit_tolerance = -0.5").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "unit_tolerance", .. }));

        let err = ClientConfig::from_toml_str("quaternion_policy = \"guess\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = ClientConfig::from_toml_str("retries = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "discovery_timeout_ms = 500").unwrap();
        let config = ClientConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.discovery_timeout_ms, 500);

        let err = ClientConfig::load_from_file("/nonexistent/booster.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    fn lookup(value: &'static str) -> impl FnOnce(&str) -> Option<String> {
        move |key| (key == DOMAIN_ENV).then(|| value.to_string())
    }

    #[test]
    fn test_env_override() {

        let config = ClientConfig::default().with_env_overrides_from(lookup("7"));
        assert_eq!(config.domain_id, Some(7));

        let config = ClientConfig {
            domain_id: Some(3),
            ..ClientConfig::default()
        };
        assert_eq!(config.clone().with_env_overrides_from(lookup("seven")).domain_id, Some(3));
        assert_eq!(config.with_env_overrides_from(lookup("8")).domain_id, Some(8));

        let config = ClientConfig::default().with_env_overrides_from(|_| None);
        assert_eq!(config.domain_id, None);
    }
}
