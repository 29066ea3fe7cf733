//! # Booster Types
//!
//! Booster 机器人客户端层使用的规范值类型（无硬件依赖）
//!
//! ## 模块
//!
//! - `spatial`: 位置、四元数、变换、位姿、单指控制
//! - `robot`: 封闭枚举（模式、手、方向、坐标系、夹爪模式、舞蹈等）
//! - `status`: 状态查询与机器人信息应答
//! - `telemetry`: 低层遥测记录及其 CDR 编解码
//!
//! ## 值语义
//!
//! 所有规范值都是 `Copy` 的独立快照：在强制转换边界构造，按值传给分发器，
//! 调用返回后即丢弃，彼此之间没有共享的可变状态。

pub mod robot;
pub mod spatial;
pub mod status;
pub mod telemetry;

// 重新导出常用类型
pub use robot::*;
pub use spatial::*;
pub use status::*;
pub use telemetry::*;
