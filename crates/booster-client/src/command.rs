//! 已校验的指令值
//!
//! 设备绑定只接收这些类型：所有字段都已经过强制转换与范围检查。

use crate::presets::FingerSet;
use booster_types::{Direction, GripperMode, Hand, Posture, Transform};
use std::time::Duration;

/// 默认夹爪速度
pub const DEFAULT_GRIPPER_SPEED: u16 = 500;

/// 位置模式下的全闭位置
pub const GRIPPER_CLOSED_POSITION: u16 = 1000;

/// 抓握力下限（更小的力无法稳定夹持）
pub const GRIPPER_MIN_GRASP_FORCE: u16 = 50;

/// 速度指令（机体坐标系）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveCommand {
    /// 前向速度（m/s）
    pub vx: f64,
    /// 侧向速度（m/s）
    pub vy: f64,
    /// 偏航角速度（rad/s）
    pub vyaw: f64,
}

/// 头部绝对角度（弧度）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadRotation {
    pub pitch: f64,
    pub yaw: f64,
}

/// 头部连续转动
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousHeadRotation {
    pub pitch: Direction,
    pub yaw: Direction,
    /// 归一化速率 `[0, 1]`
    pub speed: f64,
}

/// 末端位姿运动
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandPoseCommand {
    pub hand: Hand,
    pub target: Posture,
    /// 辅助位姿（肘部参考）
    pub aux: Option<Posture>,
    pub duration: Duration,
    /// 使用新版末端控制器
    pub new_version: bool,
}

/// 按变换移动末端
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandTransformCommand {
    pub hand: Hand,
    pub target: Transform,
    pub duration: Duration,
}

/// 夹爪指令
///
/// `motion_param` 在位置模式下是目标开度（0 全开，1000 全闭），在力模式下是抓握力。
///
/// ```rust
/// use booster_client::GripperCommand;
/// use booster_types::{GripperMode, Hand};
///
/// let cmd = GripperCommand::grasp(Hand::Left, 10);
/// assert_eq!(cmd.mode, GripperMode::Force);
/// assert_eq!(cmd.motion_param, 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GripperCommand {
    pub hand: Hand,
    pub mode: GripperMode,
    pub motion_param: u16,
    pub speed: u16,
}

impl GripperCommand {
    pub fn new(hand: Hand, mode: GripperMode, motion_param: u16, speed: u16) -> Self {
        Self {
            hand,
            mode,
            motion_param,
            speed,
        }
    }

    /// 全开
    pub fn open(hand: Hand) -> Self {
        Self::new(hand, GripperMode::Position, 0, DEFAULT_GRIPPER_SPEED)
    }

    /// 全闭
    pub fn close(hand: Hand) -> Self {
        Self::new(
            hand,
            GripperMode::Position,
            GRIPPER_CLOSED_POSITION,
            DEFAULT_GRIPPER_SPEED,
        )
    }

    /// 力控抓握，力限制在 `[50, 1000]`
    pub fn grasp(hand: Hand, force: u16) -> Self {
        Self::new(
            hand,
            GripperMode::Force,
            force.clamp(GRIPPER_MIN_GRASP_FORCE, GRIPPER_CLOSED_POSITION),
            DEFAULT_GRIPPER_SPEED,
        )
    }
}

/// 灵巧手指令
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DexterousHandCommand {
    pub hand: Hand,
    pub fingers: FingerSet,
}
