//! Prelude - 常用类型的便捷导入
//!
//! ```rust
//! use booster_sdk::prelude::*;
//! ```

// 客户端层
pub use booster_client::{
    BoosterClient, ClientBuilder, ClientConfig, DeviceBinding, DexterousHandOptions,
    GripperCommand, Input, QuaternionPolicy, TelemetryFeed,
};
pub use booster_client::{
    to_finger_control, to_position, to_posture, to_quaternion, to_transform,
};

// 类型层
pub use booster_types::{
    BodyControl, DanceId, Direction, FingerControl, Frame, GripperMode, Hand, HandAction,
    LowState, Position, Posture, Quaternion, RobotAction, RobotInfo, RobotMode, RobotStatus,
    Transform, WholeBodyDanceId,
};

// 错误类型
pub use booster_client::{ClientError, CoercionError, DeviceError, ErrorKind, ValidationError};
