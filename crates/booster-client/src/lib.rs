//! # Booster Client
//!
//! Booster 机器人的指令层：把调用方给出的各种形状的位姿 / 手指数据归一化为规范类型，
//! 做范围校验，然后交给底层的设备绑定。
//!
//! ## 数据流
//!
//! ```text
//! 调用参数 → 强制转换 (coerce) → 预设展开 (presets) → 校验 (validate) → BoosterClient → DeviceBinding
//! ```
//!
//! 遥测走反方向，只经过绑定的解码（`TelemetryFeed`），本层不做变换。
//!
//! ## 模块
//!
//! - `input` / `coerce`: 输入模型与强制转换协议
//! - `presets`: 灵巧手预设与单指覆盖
//! - `validate`: 时长、速度、比例因子、四元数检查
//! - `client` / `builder`: 指令分发器及其构造
//! - `binding`: 设备绑定 trait（`mock` feature 提供内存实现）
//! - `telemetry`: 遥测主题键与解码流
//! - `config`: TOML 配置
//! - `error`: 错误类型

pub mod binding;
pub mod builder;
pub mod client;
pub mod coerce;
pub mod command;
pub mod config;
pub mod error;
pub mod input;
pub mod presets;
pub mod telemetry;
pub mod validate;

#[cfg(any(test, feature = "mock"))]
pub use binding::mock;

pub use binding::DeviceBinding;
pub use builder::{BuildError, ClientBuilder};
pub use client::{BoosterClient, ConnectionState};
pub use coerce::{to_finger_control, to_position, to_posture, to_quaternion, to_transform};
pub use command::{
    ContinuousHeadRotation, DEFAULT_GRIPPER_SPEED, DexterousHandCommand, GripperCommand,
    HandPoseCommand, HandTransformCommand, HeadRotation, MoveCommand,
};
pub use config::{ClientConfig, ConfigError};
pub use error::{
    Bound, ClientError, CoercionError, DeviceError, DeviceErrorKind, ErrorKind, Result,
    ValidationError,
};
pub use input::{Attributes, Canonical, Input, Number};
pub use presets::{DexterousHandOptions, FingerSet, FingerSlot, HandPreset};
pub use telemetry::{
    DOMAIN_ENV, TelemetryError, TelemetryFeed, low_state_key, resolve_domain_id,
    resolve_domain_id_from,
};
pub use validate::QuaternionPolicy;
