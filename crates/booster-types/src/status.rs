//! 状态查询应答
//!
//! 机器人端按原始整数码上报模式、身体控制器和动作列表；新固件可能出现本库还不认识的
//! 码值，所以原始值原样保留，枚举视图在访问时按需转换。

use crate::robot::{BodyControl, RobotAction, RobotMode};

/// `get_status` 的应答
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RobotStatus {
    pub current_mode: i32,
    pub current_body_control: i32,
    pub current_actions: Vec<i32>,
}

impl RobotStatus {
    /// 当前模式，未知码值返回 `None`
    pub fn mode(&self) -> Option<RobotMode> {
        RobotMode::try_from(self.current_mode).ok()
    }

    pub fn body_control(&self) -> Option<BodyControl> {
        BodyControl::try_from(self.current_body_control).ok()
    }

    /// 可识别的动作（未知码值被跳过）
    pub fn actions(&self) -> Vec<RobotAction> {
        self.current_actions
            .iter()
            .filter_map(|&code| RobotAction::try_from(code).ok())
            .collect()
    }
}

/// `get_robot_info` 的应答
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RobotInfo {
    pub name: String,
    pub nickname: String,
    pub version: String,
    pub model: String,
    pub serial_number: String,
}
