//! 设备绑定
//!
//! 客户端层之下的外部协作者：负责把规范指令编码到机器人的实时通信通道，
//! 以及把遥测负载解码为状态快照。客户端只依赖这个 trait，不关心具体传输。
//!
//! 所有方法都只接收已经过强制转换与校验的值。绑定返回的错误原样传给调用方。

use crate::command::{
    ContinuousHeadRotation, DexterousHandCommand, GripperCommand, HandPoseCommand,
    HandTransformCommand, HeadRotation, MoveCommand,
};
use crate::error::DeviceError;
use booster_types::{
    DanceId, Frame, HandAction, LowState, RobotInfo, RobotMode, RobotStatus, Transform,
    WholeBodyDanceId,
};
use std::time::Duration;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

/// 设备/传输绑定
///
/// 调用都是同步阻塞的：命令下发成功（或查询结果返回）之后才返回。
pub trait DeviceBinding {
    fn change_mode(&mut self, mode: RobotMode) -> Result<(), DeviceError>;

    fn get_mode(&mut self) -> Result<RobotMode, DeviceError>;

    fn get_status(&mut self) -> Result<RobotStatus, DeviceError>;

    fn get_robot_info(&mut self) -> Result<RobotInfo, DeviceError>;

    fn move_robot(&mut self, command: MoveCommand) -> Result<(), DeviceError>;

    fn get_up(&mut self) -> Result<(), DeviceError>;

    fn get_up_with_mode(&mut self, mode: RobotMode) -> Result<(), DeviceError>;

    fn lie_down(&mut self) -> Result<(), DeviceError>;

    fn shoot(&mut self) -> Result<(), DeviceError>;

    fn push_up(&mut self) -> Result<(), DeviceError>;

    fn reset_odometry(&mut self) -> Result<(), DeviceError>;

    fn rotate_head(&mut self, rotation: HeadRotation) -> Result<(), DeviceError>;

    fn rotate_head_continuous(&mut self, rotation: ContinuousHeadRotation) -> Result<(), DeviceError>;

    fn move_hand(&mut self, command: HandPoseCommand) -> Result<(), DeviceError>;

    fn move_hand_transform(&mut self, command: HandTransformCommand) -> Result<(), DeviceError>;

    fn stop_hand_end_effector(&mut self) -> Result<(), DeviceError>;

    /// 打开/关闭末端控制模式
    fn switch_hand_end_effector_control_mode(&mut self, switch_on: bool) -> Result<(), DeviceError>;

    fn wave_hand(&mut self, action: HandAction) -> Result<(), DeviceError>;

    fn handshake(&mut self, action: HandAction) -> Result<(), DeviceError>;

    fn dance(&mut self, dance: DanceId) -> Result<(), DeviceError>;

    fn whole_body_dance(&mut self, dance: WholeBodyDanceId) -> Result<(), DeviceError>;

    /// 零力矩拖动示教
    fn zero_torque_drag(&mut self, active: bool) -> Result<(), DeviceError>;

    fn record_trajectory(&mut self, active: bool) -> Result<(), DeviceError>;

    /// 回放机器人端已录制的轨迹文件
    fn replay_trajectory(&mut self, traj_file_path: &str) -> Result<(), DeviceError>;

    fn upper_body_custom_control(&mut self, start: bool) -> Result<(), DeviceError>;

    fn enter_wbc_gait(&mut self) -> Result<(), DeviceError>;

    fn exit_wbc_gait(&mut self) -> Result<(), DeviceError>;

    /// 播放机器人端的音频文件
    fn play_sound(&mut self, sound_file_path: &str) -> Result<(), DeviceError>;

    fn stop_sound(&mut self) -> Result<(), DeviceError>;

    fn control_gripper(&mut self, command: GripperCommand) -> Result<(), DeviceError>;

    fn control_dexterous_hand(&mut self, command: DexterousHandCommand) -> Result<(), DeviceError>;

    fn get_frame_transform(&mut self, src: Frame, dst: Frame) -> Result<Transform, DeviceError>;

    fn stop(&mut self) -> Result<(), DeviceError>;

    /// 等待对端发现完成
    ///
    /// 返回 `Ok(false)` 表示超时前没有发现对端。
    fn wait_for_discovery(&mut self, timeout: Duration) -> Result<bool, DeviceError>;

    /// 释放会话资源
    fn close(&mut self) -> Result<(), DeviceError> {
        Ok(())
    }

    /// 解码一帧低层遥测
    ///
    /// 默认按不带封装头的小端 CDR 解码；负载带 RTPS 封装头的传输应覆盖此方法，
    /// 改用 [`LowState::from_cdr_frame`]。
    fn decode_low_state(&self, payload: &[u8]) -> Result<LowState, DeviceError> {
        LowState::from_cdr_le(payload).map_err(DeviceError::from)
    }
}
