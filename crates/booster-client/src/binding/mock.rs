//! Mock 设备绑定
//!
//! 记录所有下发到绑定的调用，不依赖任何硬件或传输。用于单元测试、集成测试，
//! 以及在没有机器人的环境下调试调用方代码。
//!
//! `RecordingBinding` 可以克隆：克隆体共享同一份记录，测试代码保留一个句柄，
//! 另一个交给客户端。
//!
//! ```rust
//! use booster_client::mock::{BindingCall, RecordingBinding};
//! use booster_client::ClientBuilder;
//!
//! let binding = RecordingBinding::new();
//! let mut client = ClientBuilder::new().build(binding.clone()).unwrap();
//! client.get_up().unwrap();
//! assert_eq!(binding.calls(), vec![BindingCall::GetUp]);
//! ```

use super::DeviceBinding;
use crate::command::{
    ContinuousHeadRotation, DexterousHandCommand, GripperCommand, HandPoseCommand,
    HandTransformCommand, HeadRotation, MoveCommand,
};
use crate::error::{DeviceError, DeviceErrorKind};
use booster_types::{
    DanceId, Frame, HandAction, RobotInfo, RobotMode, RobotStatus, Transform, WholeBodyDanceId,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

/// 一次到达绑定的调用
#[derive(Debug, Clone, PartialEq)]
pub enum BindingCall {
    ChangeMode(RobotMode),
    GetMode,
    GetStatus,
    GetRobotInfo,
    Move(MoveCommand),
    GetUp,
    GetUpWithMode(RobotMode),
    LieDown,
    Shoot,
    PushUp,
    ResetOdometry,
    RotateHead(HeadRotation),
    RotateHeadContinuous(ContinuousHeadRotation),
    MoveHand(HandPoseCommand),
    MoveHandTransform(HandTransformCommand),
    StopHandEndEffector,
    SwitchHandEndEffectorControlMode(bool),
    WaveHand(HandAction),
    Handshake(HandAction),
    Dance(DanceId),
    WholeBodyDance(WholeBodyDanceId),
    ZeroTorqueDrag(bool),
    RecordTrajectory(bool),
    ReplayTrajectory(String),
    UpperBodyCustomControl(bool),
    EnterWbcGait,
    ExitWbcGait,
    PlaySound(String),
    StopSound,
    Gripper(GripperCommand),
    DexterousHand(DexterousHandCommand),
    GetFrameTransform(Frame, Frame),
    Stop,
    WaitForDiscovery(Duration),
    Close,
}

#[derive(Debug)]
struct MockState {
    calls: Vec<BindingCall>,
    /// 一次性失败（按顺序消费）
    queued_failures: VecDeque<DeviceError>,
    /// 持续失败，直到清除
    failure: Option<DeviceError>,
    mode: RobotMode,
    status: RobotStatus,
    robot_info: RobotInfo,
    frame_transform: Transform,
    discoverable: bool,
}

/// 记录调用的内存绑定
#[derive(Debug, Clone)]
pub struct RecordingBinding {
    state: Arc<Mutex<MockState>>,
}

impl Default for RecordingBinding {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingBinding {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                calls: Vec::new(),
                queued_failures: VecDeque::new(),
                failure: None,
                mode: RobotMode::Damping,
                status: RobotStatus::default(),
                robot_info: RobotInfo::default(),
                frame_transform: Transform::IDENTITY,
                discoverable: true,
            })),
        }
    }

    /// 已记录的调用（按到达顺序）
    pub fn calls(&self) -> Vec<BindingCall> {
        self.state.lock().calls.clone()
    }

    /// 最后一次调用
    pub fn last_call(&self) -> Option<BindingCall> {
        self.state.lock().calls.last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// 下一次调用失败
    pub fn fail_next(&self, error: DeviceError) {
        self.state.lock().queued_failures.push_back(error);
    }

    /// 此后所有调用都失败，直到 [`clear_failure`](Self::clear_failure)
    pub fn fail_always(&self, error: DeviceError) {
        self.state.lock().failure = Some(error);
    }

    pub fn clear_failure(&self) {
        let mut state = self.state.lock();
        state.failure = None;
        state.queued_failures.clear();
    }

    /// 设置 `get_mode` 的返回值
    pub fn set_mode(&self, mode: RobotMode) {
        self.state.lock().mode = mode;
    }

    /// 设置 `get_status` 的返回值
    pub fn set_status(&self, status: RobotStatus) {
        self.state.lock().status = status;
    }

    /// 设置 `get_robot_info` 的返回值
    pub fn set_robot_info(&self, info: RobotInfo) {
        self.state.lock().robot_info = info;
    }

    /// 设置 `get_frame_transform` 的返回值
    pub fn set_frame_transform(&self, transform: Transform) {
        self.state.lock().frame_transform = transform;
    }

    /// 设置 `wait_for_discovery` 能否发现对端
    pub fn set_discoverable(&self, discoverable: bool) {
        self.state.lock().discoverable = discoverable;
    }

    /// 记录调用并检查注入的失败
    fn record(&self, call: BindingCall) -> Result<(), DeviceError> {
        let mut state = self.state.lock();
        state.calls.push(call);
        if let Some(err) = state.queued_failures.pop_front() {
            return Err(err);
        }
        match &state.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl DeviceBinding for RecordingBinding {
    fn change_mode(&mut self, mode: RobotMode) -> Result<(), DeviceError> {
        self.record(BindingCall::ChangeMode(mode))?;
        self.state.lock().mode = mode;
        Ok(())
    }

    fn get_mode(&mut self) -> Result<RobotMode, DeviceError> {
        self.record(BindingCall::GetMode)?;
        Ok(self.state.lock().mode)
    }

    fn get_status(&mut self) -> Result<RobotStatus, DeviceError> {
        self.record(BindingCall::GetStatus)?;
        Ok(self.state.lock().status.clone())
    }

    fn get_robot_info(&mut self) -> Result<RobotInfo, DeviceError> {
        self.record(BindingCall::GetRobotInfo)?;
        Ok(self.state.lock().robot_info.clone())
    }

    fn move_robot(&mut self, command: MoveCommand) -> Result<(), DeviceError> {
        self.record(BindingCall::Move(command))
    }

    fn get_up(&mut self) -> Result<(), DeviceError> {
        self.record(BindingCall::GetUp)
    }

    fn get_up_with_mode(&mut self, mode: RobotMode) -> Result<(), DeviceError> {
        self.record(BindingCall::GetUpWithMode(mode))
    }

    fn lie_down(&mut self) -> Result<(), DeviceError> {
        self.record(BindingCall::LieDown)
    }

    fn shoot(&mut self) -> Result<(), DeviceError> {
        self.record(BindingCall::Shoot)
    }

    fn push_up(&mut self) -> Result<(), DeviceError> {
        self.record(BindingCall::PushUp)
    }

    fn reset_odometry(&mut self) -> Result<(), DeviceError> {
        self.record(BindingCall::ResetOdometry)
    }

    fn rotate_head(&mut self, rotation: HeadRotation) -> Result<(), DeviceError> {
        self.record(BindingCall::RotateHead(rotation))
    }

    fn rotate_head_continuous(&mut self, rotation: ContinuousHeadRotation) -> Result<(), DeviceError> {
        self.record(BindingCall::RotateHeadContinuous(rotation))
    }

    fn move_hand(&mut self, command: HandPoseCommand) -> Result<(), DeviceError> {
        self.record(BindingCall::MoveHand(command))
    }

    fn move_hand_transform(&mut self, command: HandTransformCommand) -> Result<(), DeviceError> {
        self.record(BindingCall::MoveHandTransform(command))
    }

    fn stop_hand_end_effector(&mut self) -> Result<(), DeviceError> {
        self.record(BindingCall::StopHandEndEffector)
    }

    fn switch_hand_end_effector_control_mode(&mut self, switch_on: bool) -> Result<(), DeviceError> {
        self.record(BindingCall::SwitchHandEndEffectorControlMode(switch_on))
    }

    fn wave_hand(&mut self, action: HandAction) -> Result<(), DeviceError> {
        self.record(BindingCall::WaveHand(action))
    }

    fn handshake(&mut self, action: HandAction) -> Result<(), DeviceError> {
        self.record(BindingCall::Handshake(action))
    }

    fn dance(&mut self, dance: DanceId) -> Result<(), DeviceError> {
        self.record(BindingCall::Dance(dance))
    }

    fn whole_body_dance(&mut self, dance: WholeBodyDanceId) -> Result<(), DeviceError> {
        self.record(BindingCall::WholeBodyDance(dance))
    }

    fn zero_torque_drag(&mut self, active: bool) -> Result<(), DeviceError> {
        self.record(BindingCall::ZeroTorqueDrag(active))
    }

    fn record_trajectory(&mut self, active: bool) -> Result<(), DeviceError> {
        self.record(BindingCall::RecordTrajectory(active))
    }

    fn replay_trajectory(&mut self, traj_file_path: &str) -> Result<(), DeviceError> {
        self.record(BindingCall::ReplayTrajectory(traj_file_path.to_string()))
    }

    fn upper_body_custom_control(&mut self, start: bool) -> Result<(), DeviceError> {
        self.record(BindingCall::UpperBodyCustomControl(start))
    }

    fn enter_wbc_gait(&mut self) -> Result<(), DeviceError> {
        self.record(BindingCall::EnterWbcGait)
    }

    fn exit_wbc_gait(&mut self) -> Result<(), DeviceError> {
        self.record(BindingCall::ExitWbcGait)
    }

    fn play_sound(&mut self, sound_file_path: &str) -> Result<(), DeviceError> {
        self.record(BindingCall::PlaySound(sound_file_path.to_string()))
    }

    fn stop_sound(&mut self) -> Result<(), DeviceError> {
        self.record(BindingCall::StopSound)
    }

    fn control_gripper(&mut self, command: GripperCommand) -> Result<(), DeviceError> {
        self.record(BindingCall::Gripper(command))
    }

    fn control_dexterous_hand(&mut self, command: DexterousHandCommand) -> Result<(), DeviceError> {
        self.record(BindingCall::DexterousHand(command))
    }

    fn get_frame_transform(&mut self, src: Frame, dst: Frame) -> Result<Transform, DeviceError> {
        self.record(BindingCall::GetFrameTransform(src, dst))?;
        Ok(self.state.lock().frame_transform)
    }

    fn stop(&mut self) -> Result<(), DeviceError> {
        self.record(BindingCall::Stop)
    }

    fn wait_for_discovery(&mut self, timeout: Duration) -> Result<bool, DeviceError> {
        self.record(BindingCall::WaitForDiscovery(timeout))?;
        Ok(self.state.lock().discoverable)
    }

    fn close(&mut self) -> Result<(), DeviceError> {
        self.record(BindingCall::Close)
    }
}

/// 构造一个模拟断连的设备错误
pub fn connection_lost(message: &str) -> DeviceError {
    DeviceError::new(DeviceErrorKind::ConnectionLost, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_records() {
        let binding = RecordingBinding::new();
        let mut handle = binding.clone();
        handle.stop().unwrap();
        assert_eq!(binding.calls(), vec![BindingCall::Stop]);
    }

    #[test]
    fn test_failure_injection() {
        let mut binding = RecordingBinding::new();
        binding.fail_next(connection_lost("link down"));
        assert_eq!(binding.get_up().unwrap_err().kind, DeviceErrorKind::ConnectionLost);
        assert!(binding.get_up().is_ok());

        binding.fail_always(DeviceError::new(DeviceErrorKind::Rejected, "busy"));
        assert!(binding.lie_down().is_err());
        assert!(binding.lie_down().is_err());
        binding.clear_failure();
        assert!(binding.lie_down().is_ok());
        assert_eq!(binding.call_count(), 5);
    }

    #[test]
    fn test_status_queries_return_configured_values() {
        let mut binding = RecordingBinding::new();
        let status = RobotStatus {
            current_mode: 2,
            current_body_control: 12,
            current_actions: vec![13],
        };
        binding.set_status(status.clone());
        binding.set_robot_info(RobotInfo {
            name: "booster".into(),
            ..RobotInfo::default()
        });
        assert_eq!(binding.get_status().unwrap(), status);
        assert_eq!(binding.get_robot_info().unwrap().name, "booster");
        assert_eq!(
            binding.calls(),
            vec![BindingCall::GetStatus, BindingCall::GetRobotInfo]
        );
    }

    #[test]
    fn test_mode_tracking() {
        let mut binding = RecordingBinding::new();
        binding.change_mode(RobotMode::Walking).unwrap();
        assert_eq!(binding.get_mode().unwrap(), RobotMode::Walking);
    }
}
