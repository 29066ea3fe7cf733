//! 错误类型体系
//!
//! 分为三个族，调用方可以区分"传入了无法识别的数据"与"数据格式正确但物理上无效"：
//!
//! - [`CoercionError`]：输入形状不对（元素个数、缺字段、类型不支持、未知预设）
//! - [`ValidationError`]：数值越界（时长、速度、比例因子、非有限值）
//! - [`DeviceError`]：外部绑定执行失败（断连、拒绝、解码失败等）
//!
//! 前两族总是在任何调用到达绑定之前检测并返回；`DeviceError` 是唯一可能在
//! 分发之后出现的错误，原样向上传播，不会被吞掉。
//!
//! # 示例
//!
//! ```rust
//! use booster_client::{ClientError, ErrorKind, ValidationError, Bound};
//!
//! fn handle(err: &ClientError) {
//!     if err.is_caller_error() {
//!         eprintln!("请检查参数: {err}");
//!     } else {
//!         eprintln!("设备错误: {err}");
//!     }
//! }
//!
//! let err: ClientError = ValidationError::OutOfRange {
//!     parameter: "duration".into(),
//!     value: -1.0,
//!     bound: Bound::Positive,
//! }
//! .into();
//! assert_eq!(err.kind(), ErrorKind::OutOfRange);
//! handle(&err);
//! ```

use std::fmt;
use thiserror::Error;

/// 强制转换错误（调用方传入的数据形状无法识别）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoercionError {
    /// 序列/数组元素个数不符
    #[error("{target} sequence must have {expected} elements, got {actual}")]
    InvalidShape {
        target: &'static str,
        expected: usize,
        actual: usize,
    },

    /// 映射缺少必需的键
    #[error("{target} mapping is missing required key '{field}'")]
    MissingField {
        target: &'static str,
        field: &'static str,
    },

    /// 输入不匹配任何可接受的形状
    #[error("Cannot convert {actual} to {target}. Expected {accepted}")]
    UnsupportedType {
        target: String,
        actual: String,
        accepted: &'static str,
    },

    /// 未知的预设名称
    #[error("Unknown hand preset '{name}', expected one of: {accepted}")]
    InvalidPreset {
        name: String,
        accepted: &'static str,
    },
}

/// 数值边界
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// 严格大于 0（且有限）
    Positive,
    /// 闭区间 `[min, max]`
    Closed { min: f64, max: f64 },
    /// 有限值（非 NaN、非无穷）
    Finite,
    /// 接近单位长度（|x - 1| <= tolerance）
    NearUnit { tolerance: f64 },
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Positive => f.write_str("> 0"),
            Bound::Closed { min, max } => write!(f, "[{min}, {max}]"),
            Bound::Finite => f.write_str("finite"),
            Bound::NearUnit { tolerance } => write!(f, "1 ± {tolerance}"),
        }
    }
}

/// 校验错误（数据格式正确但超出物理/运行约束）
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Parameter '{parameter}' out of range: {value} (expected {bound})")]
    OutOfRange {
        parameter: String,
        value: f64,
        bound: Bound,
    },
}

impl ValidationError {
    /// 越界参数名
    pub fn parameter(&self) -> &str {
        match self {
            ValidationError::OutOfRange { parameter, .. } => parameter,
        }
    }
}

/// 设备错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceErrorKind {
    /// 连接丢失
    ConnectionLost,
    /// 对端拒绝执行
    Rejected,
    /// 等待对端响应超时
    Timeout,
    /// 遥测解码失败
    Decode,
    /// 客户端已关闭
    Closed,
    /// 尚未完成对端发现
    NotDiscovered,
    /// 其他后端错误
    Backend,
}

/// 结构化设备错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind:?}: {message}")]
pub struct DeviceError {
    pub kind: DeviceErrorKind,
    pub message: String,
}

impl DeviceError {
    pub fn new(kind: DeviceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// 是否为连接层面的致命错误（需要重新建立会话）
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind,
            DeviceErrorKind::ConnectionLost | DeviceErrorKind::Closed
        )
    }
}

impl From<booster_types::DecodeError> for DeviceError {
    fn from(err: booster_types::DecodeError) -> Self {
        Self::new(DeviceErrorKind::Decode, err.to_string())
    }
}

impl From<String> for DeviceError {
    fn from(message: String) -> Self {
        Self::new(DeviceErrorKind::Backend, message)
    }
}

impl From<&str> for DeviceError {
    fn from(message: &str) -> Self {
        Self::new(DeviceErrorKind::Backend, message)
    }
}

/// 错误种类（扁平的封闭集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidShape,
    MissingField,
    UnsupportedType,
    InvalidPreset,
    OutOfRange,
    DeviceError,
}

/// 客户端统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error(transparent)]
    Coercion(#[from] CoercionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Device error: {0}")]
    Device(#[from] DeviceError),
}

impl ClientError {
    /// 错误种类
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Coercion(CoercionError::InvalidShape { .. }) => ErrorKind::InvalidShape,
            ClientError::Coercion(CoercionError::MissingField { .. }) => ErrorKind::MissingField,
            ClientError::Coercion(CoercionError::UnsupportedType { .. }) => {
                ErrorKind::UnsupportedType
            },
            ClientError::Coercion(CoercionError::InvalidPreset { .. }) => ErrorKind::InvalidPreset,
            ClientError::Validation(ValidationError::OutOfRange { .. }) => ErrorKind::OutOfRange,
            ClientError::Device(_) => ErrorKind::DeviceError,
        }
    }

    /// 是否为调用方输入错误（强制转换或校验失败，指令未下发）
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, ClientError::Device(_))
    }

    /// 设备错误（如果是）
    pub fn as_device(&self) -> Option<&DeviceError> {
        match self {
            ClientError::Device(e) => Some(e),
            _ => None,
        }
    }
}

/// 客户端层 Result 别名
pub type Result<T> = std::result::Result<T, ClientError>;
