//! Booster 客户端（指令分发器）
//!
//! 面向调用方的操作入口。每个变更类操作都遵循同一流程：
//!
//! 1. 把位姿 / 手指参数强制转换为规范类型
//! 2. 展开灵巧手预设
//! 3. 范围校验
//! 4. 把规范的、已校验的值交给设备绑定
//! 5. 原样返回绑定的结果
//!
//! 查询类操作（模式、状态、机器人信息、坐标变换）直接转发。
//!
//! # 生命周期
//!
//! 只有两个状态：构造后为 `Connected`，调用 [`BoosterClient::close`]（或 drop）
//! 后为 `Closed`。关闭后的任何调用都返回 `DeviceError`（`Closed`），不会到达绑定。
//!
//! # 并发
//!
//! 所有操作都是同步阻塞的，并且需要 `&mut self`：同一个实例上的调用由借用检查器
//! 串行化。需要跨线程共享时由调用方包一层 `Mutex`。

use crate::binding::DeviceBinding;
use crate::coerce::{to_posture, to_transform};
use crate::command::{
    ContinuousHeadRotation, DexterousHandCommand, GripperCommand, HandPoseCommand,
    HandTransformCommand, HeadRotation, MoveCommand,
};
use crate::config::ClientConfig;
use crate::error::{Bound, DeviceError, DeviceErrorKind, Result, ValidationError};
use crate::input::Input;
use crate::presets::DexterousHandOptions;
use crate::telemetry::{low_state_key, resolve_domain_id};
use crate::validate;
use booster_types::{
    DanceId, Direction, Frame, GripperMode, Hand, HandAction, LowState, RobotInfo, RobotMode,
    RobotStatus, Transform, WholeBodyDanceId,
};
use std::time::Duration;
use tracing::{debug, info, warn};

/// 夹爪位置/力参数上限
pub const GRIPPER_MOTION_MAX: i64 = 1000;

/// 连接状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    Closed,
}

/// Booster 客户端
///
/// 通常通过 [`ClientBuilder`](crate::ClientBuilder) 创建。
///
/// # 示例
///
/// ```rust
/// # #[cfg(feature = "mock")]
/// # {
/// use booster_client::mock::RecordingBinding;
/// use booster_client::{BoosterClient, ErrorKind};
/// use booster_types::Hand;
///
/// let mut client = BoosterClient::new(RecordingBinding::new());
///
/// client.move_hand(Hand::Left, ([0.3, 0.2, 0.1], [0.0, 0.0, 0.0]), 2.0).unwrap();
///
/// let err = client.move_hand(Hand::Left, ([0.3, 0.2, 0.1], [0.0, 0.0, 0.0]), -1.0).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::OutOfRange);
/// # }
/// ```
pub struct BoosterClient<B: DeviceBinding> {
    binding: B,
    config: ClientConfig,
    state: ConnectionState,
    domain_id: u32,
    discovered: bool,
    warned_undiscovered: bool,
}

impl<B: DeviceBinding> BoosterClient<B> {
    /// 使用默认配置创建
    pub fn new(binding: B) -> Self {
        Self::with_config(binding, ClientConfig::default())
    }

    /// 使用指定配置创建（配置应已校验）
    pub fn with_config(binding: B, config: ClientConfig) -> Self {
        let domain_id = resolve_domain_id(config.domain_id);
        debug!("Booster client created on domain {}", domain_id);
        Self {
            binding,
            config,
            state: ConnectionState::Connected,
            domain_id,
            discovered: false,
            warned_undiscovered: false,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == ConnectionState::Closed
    }

    /// 是否已经完成对端发现
    pub fn is_discovered(&self) -> bool {
        self.discovered
    }

    pub fn domain_id(&self) -> u32 {
        self.domain_id
    }

    /// 当前通信域的低层状态主题键
    pub fn low_state_key(&self) -> String {
        low_state_key(self.domain_id)
    }

    /// 底层绑定
    pub fn binding(&self) -> &B {
        &self.binding
    }

    fn ensure_open(&self) -> Result<()> {
        if self.state == ConnectionState::Closed {
            return Err(DeviceError::new(DeviceErrorKind::Closed, "client is closed").into());
        }
        Ok(())
    }

    /// 控制指令的前置检查：连接状态 + 发现顺序
    fn ensure_ready(&mut self, op: &'static str) -> Result<()> {
        self.ensure_open()?;
        if self.discovered {
            return Ok(());
        }
        if self.config.require_discovery {
            return Err(DeviceError::new(
                DeviceErrorKind::NotDiscovered,
                format!("{op} called before wait_for_discovery succeeded"),
            )
            .into());
        }
        if !self.warned_undiscovered {
            self.warned_undiscovered = true;
            warn!(
                "{} called before peer discovery completed; the transport may drop early commands",
                op
            );
        }
        Ok(())
    }

    /// 前置检查通过后把调用交给绑定
    fn dispatch<T>(
        &mut self,
        op: &'static str,
        call: impl FnOnce(&mut B) -> std::result::Result<T, DeviceError>,
    ) -> Result<T> {
        self.ensure_ready(op)?;
        debug!("Dispatching {}", op);
        call(&mut self.binding).map_err(|e| {
            debug!("{} failed: {}", op, e);
            e.into()
        })
    }

    /// 查询类操作：只检查连接状态
    fn query<T>(
        &mut self,
        op: &'static str,
        call: impl FnOnce(&mut B) -> std::result::Result<T, DeviceError>,
    ) -> Result<T> {
        self.ensure_open()?;
        debug!("Querying {}", op);
        call(&mut self.binding).map_err(Into::into)
    }

    // ==================== 模式 ====================

    pub fn change_mode(&mut self, mode: RobotMode) -> Result<()> {
        self.dispatch("change_mode", |b| b.change_mode(mode))
    }

    pub fn get_mode(&mut self) -> Result<RobotMode> {
        self.query("get_mode", |b| b.get_mode())
    }

    /// 当前模式、身体控制器与正在执行的动作
    pub fn get_status(&mut self) -> Result<RobotStatus> {
        self.query("get_status", |b| b.get_status())
    }

    pub fn get_robot_info(&mut self) -> Result<RobotInfo> {
        self.query("get_robot_info", |b| b.get_robot_info())
    }

    // ==================== 运动 ====================

    /// 速度指令（m/s, m/s, rad/s）
    pub fn move_robot(&mut self, vx: f64, vy: f64, vyaw: f64) -> Result<()> {
        let command = MoveCommand {
            vx: validate::finite("vx", vx)?,
            vy: validate::finite("vy", vy)?,
            vyaw: validate::finite("vyaw", vyaw)?,
        };
        self.dispatch("move_robot", |b| b.move_robot(command))
    }

    pub fn get_up(&mut self) -> Result<()> {
        self.dispatch("get_up", |b| b.get_up())
    }

    /// 起身后进入指定模式
    pub fn get_up_with_mode(&mut self, mode: RobotMode) -> Result<()> {
        self.dispatch("get_up_with_mode", |b| b.get_up_with_mode(mode))
    }

    pub fn lie_down(&mut self) -> Result<()> {
        self.dispatch("lie_down", |b| b.lie_down())
    }

    /// 紧急停止当前动作
    pub fn stop(&mut self) -> Result<()> {
        self.dispatch("stop", |b| b.stop())
    }

    pub fn shoot(&mut self) -> Result<()> {
        self.dispatch("shoot", |b| b.shoot())
    }

    pub fn push_up(&mut self) -> Result<()> {
        self.dispatch("push_up", |b| b.push_up())
    }

    /// 里程计清零
    pub fn reset_odometry(&mut self) -> Result<()> {
        self.dispatch("reset_odometry", |b| b.reset_odometry())
    }

    pub fn enter_wbc_gait(&mut self) -> Result<()> {
        self.dispatch("enter_wbc_gait", |b| b.enter_wbc_gait())
    }

    pub fn exit_wbc_gait(&mut self) -> Result<()> {
        self.dispatch("exit_wbc_gait", |b| b.exit_wbc_gait())
    }

    // ==================== 头部 ====================

    /// 头部转到指定角度（弧度）
    pub fn rotate_head(&mut self, pitch: f64, yaw: f64) -> Result<()> {
        let rotation = HeadRotation {
            pitch: validate::finite("pitch", pitch)?,
            yaw: validate::finite("yaw", yaw)?,
        };
        self.dispatch("rotate_head", |b| b.rotate_head(rotation))
    }

    /// 头部按方向持续转动，`speed` 为 `[0, 1]` 的归一化速率
    pub fn rotate_head_continuous(
        &mut self,
        pitch: Direction,
        yaw: Direction,
        speed: f64,
    ) -> Result<()> {
        let rotation = ContinuousHeadRotation {
            pitch,
            yaw,
            speed: validate::rate_factor("speed", speed)?,
        };
        self.dispatch("rotate_head_continuous", |b| b.rotate_head_continuous(rotation))
    }

    // ==================== 手臂 ====================

    /// 末端移动到目标位姿
    ///
    /// `target` 可以是任意 `Posture` 形状；`duration` 单位为秒，必须为正。
    pub fn move_hand(&mut self, hand: Hand, target: impl Into<Input>, duration: f64) -> Result<()> {
        let target = to_posture(target)?;
        validate::posture("target", &target)?;
        let command = HandPoseCommand {
            hand,
            target,
            aux: None,
            duration: validate::duration("duration", duration)?,
            new_version: false,
        };
        self.dispatch("move_hand", |b| b.move_hand(command))
    }

    /// 与 [`move_hand`](Self::move_hand) 相同，但交给新版末端控制器执行
    pub fn move_hand_v2(
        &mut self,
        hand: Hand,
        target: impl Into<Input>,
        duration: f64,
    ) -> Result<()> {
        let target = to_posture(target)?;
        validate::posture("target", &target)?;
        let command = HandPoseCommand {
            hand,
            target,
            aux: None,
            duration: validate::duration("duration", duration)?,
            new_version: true,
        };
        self.dispatch("move_hand_v2", |b| b.move_hand(command))
    }

    /// 末端移动到目标位姿，附带辅助位姿
    pub fn move_hand_with_aux(
        &mut self,
        hand: Hand,
        target: impl Into<Input>,
        aux: impl Into<Input>,
        duration: f64,
    ) -> Result<()> {
        let target = to_posture(target)?;
        let aux = to_posture(aux)?;
        validate::posture("target", &target)?;
        validate::posture("aux", &aux)?;
        let command = HandPoseCommand {
            hand,
            target,
            aux: Some(aux),
            duration: validate::duration("duration", duration)?,
            new_version: false,
        };
        self.dispatch("move_hand_with_aux", |b| b.move_hand(command))
    }

    /// 末端按变换移动
    ///
    /// 旋转四元数按配置的 [`QuaternionPolicy`](crate::QuaternionPolicy) 处理。
    pub fn move_hand_transform(
        &mut self,
        hand: Hand,
        target: impl Into<Input>,
        duration: f64,
    ) -> Result<()> {
        let target = validate::transform(
            "target",
            to_transform(target)?,
            self.config.quaternion_policy,
            self.config.unit_tolerance,
        )?;
        let command = HandTransformCommand {
            hand,
            target,
            duration: validate::duration("duration", duration)?,
        };
        self.dispatch("move_hand_transform", |b| b.move_hand_transform(command))
    }

    /// 中止正在执行的末端运动
    pub fn stop_hand_end_effector(&mut self) -> Result<()> {
        self.dispatch("stop_hand_end_effector", |b| b.stop_hand_end_effector())
    }

    pub fn switch_hand_end_effector_control_mode(&mut self, switch_on: bool) -> Result<()> {
        self.dispatch("switch_hand_end_effector_control_mode", |b| {
            b.switch_hand_end_effector_control_mode(switch_on)
        })
    }

    /// 上半身交给调用方自定义控制（`start = false` 交还）
    pub fn upper_body_custom_control(&mut self, start: bool) -> Result<()> {
        self.dispatch("upper_body_custom_control", |b| b.upper_body_custom_control(start))
    }

    // ==================== 手势 ====================

    pub fn wave_hand(&mut self, action: HandAction) -> Result<()> {
        self.dispatch("wave_hand", |b| b.wave_hand(action))
    }

    pub fn handshake(&mut self, action: HandAction) -> Result<()> {
        self.dispatch("handshake", |b| b.handshake(action))
    }

    /// 上半身舞蹈 / 手势，`DanceId::Stop` 停止
    pub fn dance(&mut self, dance: DanceId) -> Result<()> {
        self.dispatch("dance", |b| b.dance(dance))
    }

    pub fn whole_body_dance(&mut self, dance: WholeBodyDanceId) -> Result<()> {
        self.dispatch("whole_body_dance", |b| b.whole_body_dance(dance))
    }

    // ==================== 示教与声音 ====================

    pub fn zero_torque_drag(&mut self, active: bool) -> Result<()> {
        self.dispatch("zero_torque_drag", |b| b.zero_torque_drag(active))
    }

    pub fn record_trajectory(&mut self, active: bool) -> Result<()> {
        self.dispatch("record_trajectory", |b| b.record_trajectory(active))
    }

    /// `traj_file_path` 是机器人端的路径
    pub fn replay_trajectory(&mut self, traj_file_path: &str) -> Result<()> {
        self.dispatch("replay_trajectory", |b| b.replay_trajectory(traj_file_path))
    }

    /// `sound_file_path` 是机器人端的路径
    pub fn play_sound(&mut self, sound_file_path: &str) -> Result<()> {
        self.dispatch("play_sound", |b| b.play_sound(sound_file_path))
    }

    pub fn stop_sound(&mut self) -> Result<()> {
        self.dispatch("stop_sound", |b| b.stop_sound())
    }

    // ==================== 末端执行器 ====================

    /// 夹爪控制
    ///
    /// - `motion_param`：位置模式下为开度，力模式下为抓握力，范围 `[0, 1000]`
    /// - `speed`：`[1, 1000]`，`None` 时使用配置的默认速度
    pub fn control_gripper(
        &mut self,
        hand: Hand,
        mode: GripperMode,
        motion_param: i64,
        speed: Option<i64>,
    ) -> Result<()> {
        let motion_param = validate_motion_param(motion_param)?;
        let speed = match speed {
            Some(speed) => validate::gripper_speed(speed)?,
            None => validate::gripper_speed(i64::from(self.config.default_gripper_speed))?,
        };
        let command = GripperCommand::new(hand, mode, motion_param, speed);
        self.dispatch("control_gripper", |b| b.control_gripper(command))
    }

    /// 下发预先构造好的夹爪指令
    pub fn publish_gripper_command(&mut self, command: GripperCommand) -> Result<()> {
        validate_motion_param(i64::from(command.motion_param))?;
        validate::gripper_speed(i64::from(command.speed))?;
        self.dispatch("publish_gripper_command", |b| b.control_gripper(command))
    }

    /// 灵巧手控制（预设和/或单指参数）
    ///
    /// 显式给出的单指参数覆盖预设中对应手指的值。
    pub fn control_dexterous_hand(
        &mut self,
        hand: Hand,
        options: DexterousHandOptions,
    ) -> Result<()> {
        let fingers = options.resolve()?;
        let command = DexterousHandCommand { hand, fingers };
        self.dispatch("control_dexterous_hand", |b| b.control_dexterous_hand(command))
    }

    // ==================== 查询 ====================

    /// 查询 `src` 坐标系到 `dst` 坐标系的变换
    pub fn get_frame_transform(&mut self, src: Frame, dst: Frame) -> Result<Transform> {
        self.query("get_frame_transform", |b| b.get_frame_transform(src, dst))
    }

    /// 用绑定的解码器解码一帧低层遥测
    pub fn decode_low_state(&self, payload: &[u8]) -> Result<LowState> {
        self.ensure_open()?;
        self.binding.decode_low_state(payload).map_err(Into::into)
    }

    // ==================== 生命周期 ====================

    /// 等待对端发现完成，返回是否在超时前发现
    pub fn wait_for_discovery(&mut self, timeout: Duration) -> Result<bool> {
        self.ensure_open()?;
        let found = self.binding.wait_for_discovery(timeout)?;
        if found {
            info!("Peer discovered on domain {}", self.domain_id);
            self.discovered = true;
        } else {
            warn!("No peer discovered on domain {} within {:?}", self.domain_id, timeout);
        }
        Ok(found)
    }

    /// 关闭客户端
    ///
    /// 重复调用是空操作。绑定关闭失败时状态仍然变为 `Closed`，错误返回给调用方。
    pub fn close(&mut self) -> Result<()> {
        if self.state == ConnectionState::Closed {
            return Ok(());
        }
        self.state = ConnectionState::Closed;
        info!("Closing Booster client");
        self.binding.close().map_err(Into::into)
    }
}

impl<B: DeviceBinding> Drop for BoosterClient<B> {
    fn drop(&mut self) {
        if self.state == ConnectionState::Connected {
            self.state = ConnectionState::Closed;
            if let Err(e) = self.binding.close() {
                warn!("Failed to close binding on drop: {}", e);
            }
        }
    }
}

fn validate_motion_param(value: i64) -> Result<u16> {
    if !(0..=GRIPPER_MOTION_MAX).contains(&value) {
        return Err(ValidationError::OutOfRange {
            parameter: "motion_param".to_string(),
            value: value as f64,
            bound: Bound::Closed {
                min: 0.0,
                max: GRIPPER_MOTION_MAX as f64,
            },
        }
        .into());
    }
    Ok(value as u16)
}
