//! 低层遥测数据
//!
//! 机器人通过发布/订阅总线以 CDR（小端）编码发送 `LowState`：IMU 读数加上
//! 两组电机（并联组、串联组）的状态。本模块只做编解码，不对数据做任何变换。
//!
//! 编解码由 `cdr-encoding` 完成：基本类型按自身大小对齐（以负载起点为基准），
//! 定长数组没有长度前缀，变长序列以 `u32` 元素个数开头。
//!
//! 经由 RTPS 转发的原始负载前面还有 4 字节封装头（`00 01 00 00` 表示 CDR_LE），
//! 使用 [`LowState::from_cdr_frame`] 处理。

use crate::robot::MotorMode;
use byteorder::LittleEndian;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 单组电机数量的上限（超过视为损坏的负载）
pub const MAX_MOTORS_PER_GROUP: usize = 64;

/// CDR 小端封装头
pub const CDR_LE_HEADER: [u8; 4] = [0x00, 0x01, 0x00, 0x00];

/// 遥测编解码错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Truncated payload: need {needed} more bytes at offset {offset}")]
    Truncated { offset: usize, needed: usize },

    #[error("Malformed CDR payload: {0}")]
    Cdr(String),

    #[error("Sequence {field} too long: {len} (max {max})")]
    SequenceTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("Unsupported encapsulation header: {0:02X?}")]
    UnsupportedEncapsulation([u8; 4]),
}

impl From<cdr_encoding::Error> for DecodeError {
    fn from(err: cdr_encoding::Error) -> Self {
        DecodeError::Cdr(err.to_string())
    }
}

/// IMU 状态
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImuState {
    /// roll, pitch, yaw（弧度）
    pub rpy: [f32; 3],
    /// 角速度（rad/s）
    pub gyro: [f32; 3],
    /// 线加速度（m/s²）
    pub acc: [f32; 3],
}

/// 单个电机的反馈状态
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MotorState {
    pub mode: MotorMode,
    /// 位置（rad）
    pub q: f32,
    /// 速度（rad/s）
    pub dq: f32,
    /// 加速度（rad/s²）
    pub ddq: f32,
    /// 估计力矩（N·m）
    pub tau_est: f32,
    /// 温度（°C）
    pub temperature: u8,
    /// 固件统计的丢包计数，非零表示与该电机的连接有丢失
    pub lost: u32,
    pub reserve: [u32; 2],
}

impl MotorState {
    /// 是否出现过通信丢失
    pub fn has_lost_connection(&self) -> bool {
        self.lost != 0
    }
}

/// 低层状态快照
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LowState {
    pub imu_state: ImuState,
    /// 并联组电机（如腿部）
    pub motor_state_parallel: Vec<MotorState>,
    /// 串联组电机（如手臂）
    pub motor_state_serial: Vec<MotorState>,
}

impl LowState {
    /// 解码不带封装头的小端 CDR 负载
    ///
    /// 负载末尾多余的字节被忽略。
    pub fn from_cdr_le(bytes: &[u8]) -> Result<Self, DecodeError> {
        let (state, _consumed) = cdr_encoding::from_bytes::<LowState, LittleEndian>(bytes)?;
        state.check_group_sizes()?;
        Ok(state)
    }

    fn check_group_sizes(&self) -> Result<(), DecodeError> {
        for (field, len) in [
            ("motor_state_parallel", self.motor_state_parallel.len()),
            ("motor_state_serial", self.motor_state_serial.len()),
        ] {
            if len > MAX_MOTORS_PER_GROUP {
                return Err(DecodeError::SequenceTooLong {
                    field,
                    len,
                    max: MAX_MOTORS_PER_GROUP,
                });
            }
        }
        Ok(())
    }

    /// 解码带 4 字节封装头的负载（仅支持 CDR_LE）
    ///
    /// 封装头之后的对齐以数据体起点为基准。
    pub fn from_cdr_frame(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() < CDR_LE_HEADER.len() {
            return Err(DecodeError::Truncated {
                offset: 0,
                needed: CDR_LE_HEADER.len() - bytes.len(),
            });
        }
        let (header, body) = bytes.split_at(CDR_LE_HEADER.len());
        if header[..2] != CDR_LE_HEADER[..2] {
            let mut h = [0u8; 4];
            h.copy_from_slice(header);
            return Err(DecodeError::UnsupportedEncapsulation(h));
        }
        Self::from_cdr_le(body)
    }

    /// 编码为不带封装头的小端 CDR 负载
    ///
    /// 主要用于仿真端和测试中构造遥测样本。
    pub fn to_cdr_le(&self) -> Result<Vec<u8>, DecodeError> {
        Ok(cdr_encoding::to_vec::<LowState, LittleEndian>(self)?)
    }

    /// 两组电机总数
    pub fn motor_count(&self) -> usize {
        self.motor_state_parallel.len() + self.motor_state_serial.len()
    }

    /// 出现过通信丢失的电机（组名，组内索引）
    pub fn lost_motors(&self) -> Vec<(&'static str, usize)> {
        let parallel = self
            .motor_state_parallel
            .iter()
            .enumerate()
            .filter(|(_, m)| m.has_lost_connection())
            .map(|(i, _)| ("parallel", i));
        let serial = self
            .motor_state_serial
            .iter()
            .enumerate()
            .filter(|(_, m)| m.has_lost_connection())
            .map(|(i, _)| ("serial", i));
        parallel.chain(serial).collect()
    }
}
