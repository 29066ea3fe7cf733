//! 机器人枚举类型
//!
//! 所有枚举都是封闭集合，数值与机器人端的接口编码一致。
//! 整数互转通过 `num_enum` 派生：
//!
//! ```rust
//! use booster_types::RobotMode;
//!
//! assert_eq!(i32::from(RobotMode::Walking), 2);
//! assert_eq!(RobotMode::try_from(1i32).unwrap(), RobotMode::Prepare);
//! assert!(RobotMode::try_from(42i32).is_err());
//! ```

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;

/// 机器人运行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum RobotMode {
    /// 未知（查询失败或固件返回了未定义值）
    Unknown = -1,
    /// 阻尼模式，电机柔顺
    Damping = 0,
    /// 准备模式，站立姿态
    Prepare = 1,
    /// 行走模式
    Walking = 2,
    /// 自定义模式
    Custom = 3,
    /// 足球模式
    Soccer = 4,
}

impl fmt::Display for RobotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RobotMode::Unknown => "unknown",
            RobotMode::Damping => "damping",
            RobotMode::Prepare => "prepare",
            RobotMode::Walking => "walking",
            RobotMode::Custom => "custom",
            RobotMode::Soccer => "soccer",
        };
        f.write_str(s)
    }
}

/// 左右手
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum Hand {
    Left = 0,
    Right = 1,
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hand::Left => f.write_str("left"),
            Hand::Right => f.write_str("right"),
        }
    }
}

/// 连续运动方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum Direction {
    /// 正方向
    Positive = 1,
    /// 停止
    Stop = 0,
    /// 负方向
    Negative = -1,
}

/// 机器人坐标系
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum Frame {
    Unknown = -1,
    /// 躯干中心
    Body = 0,
    Head = 1,
    LeftHand = 2,
    RightHand = 3,
    LeftFoot = 4,
    RightFoot = 5,
}

impl Frame {
    /// 接口使用的字符串名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Frame::Unknown => "unknown",
            Frame::Body => "body",
            Frame::Head => "head",
            Frame::LeftHand => "left_hand",
            Frame::RightHand => "right_hand",
            Frame::LeftFoot => "left_foot",
            Frame::RightFoot => "right_foot",
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 夹爪控制模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum GripperMode {
    /// 位置控制（0 = 全开，1000 = 全闭）
    Position = 0,
    /// 力控制（抓握力）
    Force = 1,
}

/// 手部动作（挥手、握手）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum HandAction {
    Open = 0,
    Close = 1,
}

/// 上半身舞蹈 / 手势
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum DanceId {
    NewYear = 0,
    Nezha = 1,
    TowardsFuture = 2,
    DabbingGesture = 3,
    UltramanGesture = 4,
    RespectGesture = 5,
    CheeringGesture = 6,
    LuckyCatGesture = 7,
    /// 停止当前舞蹈
    Stop = 1000,
}

/// 全身舞蹈
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum WholeBodyDanceId {
    ArbicDance = 0,
    MichaelDance1 = 1,
    MichaelDance2 = 2,
    MichaelDance3 = 3,
    MoonWalk = 4,
    BoxingStyleKick = 5,
    RoundhouseKick = 6,
}

/// 机器人当前的身体控制器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum BodyControl {
    Unknown = 0,
    Damping = 1,
    Prepare = 2,
    HumanlikeGait = 3,
    ProneBody = 4,
    SoccerGait = 5,
    Custom = 6,
    GetUp = 7,
    WholeBodyDance = 8,
    Shoot = 9,
    InsideFoot = 10,
    Goalie = 11,
    WbcGait = 12,
}

/// 正在执行的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum RobotAction {
    Unknown = 0,
    HandShake = 1,
    HandWave = 2,
    HandControl = 3,
    DanceNewYear = 4,
    DanceNezha = 5,
    DanceTowardsFuture = 6,
    GestureDabbing = 7,
    GestureUltraman = 8,
    GestureRespect = 9,
    GestureCheer = 10,
    GestureLuckyCat = 11,
    GestureBoxing = 12,
    ZeroTorqueDrag = 13,
    RecordTraj = 14,
    RunRecordedTraj = 15,
}

/// 电机控制模式
///
/// 在遥测负载中按 `u8` 编码。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize_repr,
    Deserialize_repr,
)]
#[repr(u8)]
pub enum MotorMode {
    /// 伺服（位置/速度控制）
    Servo = 0,
    /// 阻尼（低刚度）
    #[default]
    Damping = 1,
}
