//! 低层遥测订阅
//!
//! 遥测通过发布/订阅总线传输，主题键为 `domain{id}/rt/low_state`。传输层把
//! 原始负载推入 `crossbeam_channel`，[`TelemetryFeed`] 负责解码；单帧解码失败
//! 只影响这一帧，消费者不会因此中断。

use crate::binding::DeviceBinding;
use crate::error::DeviceError;
use booster_types::LowState;
use bytes::Bytes;
use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// 覆盖通信域 ID 的环境变量
pub const DOMAIN_ENV: &str = "BOOSTER_DOMAIN_ID";

/// 默认通信域
pub const DEFAULT_DOMAIN_ID: u32 = 0;

/// 解析通信域 ID（允许首尾空白）
pub fn parse_domain_id(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

/// 确定实际使用的通信域 ID
///
/// 优先级：显式配置 > 环境变量 > 0。环境变量无法解析时回退到 0。
pub fn resolve_domain_id(configured: Option<u32>) -> u32 {
    resolve_domain_id_from(configured, |key| std::env::var(key).ok())
}

/// 同 [`resolve_domain_id`]，环境变量通过 `lookup` 读取
///
/// ```rust
/// use booster_client::resolve_domain_id_from;
///
/// assert_eq!(resolve_domain_id_from(None, |_| Some("4".into())), 4);
/// assert_eq!(resolve_domain_id_from(Some(1), |_| Some("4".into())), 1);
/// ```
pub fn resolve_domain_id_from(
    configured: Option<u32>,
    lookup: impl FnOnce(&str) -> Option<String>,
) -> u32 {
    if let Some(id) = configured {
        return id;
    }
    match lookup(DOMAIN_ENV) {
        Some(raw) => parse_domain_id(&raw).unwrap_or_else(|| {
            warn!("Invalid {}={:?}, falling back to domain {}", DOMAIN_ENV, raw, DEFAULT_DOMAIN_ID);
            DEFAULT_DOMAIN_ID
        }),
        None => DEFAULT_DOMAIN_ID,
    }
}

/// 低层状态的主题键
///
/// ```rust
/// assert_eq!(booster_client::low_state_key(3), "domain3/rt/low_state");
/// ```
pub fn low_state_key(domain_id: u32) -> String {
    format!("domain{domain_id}/rt/low_state")
}

/// 单帧遥测错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TelemetryError {
    #[error("Failed to decode low state: {0}")]
    Decode(DeviceError),

    #[error("Timed out waiting for telemetry")]
    Timeout,

    #[error("Telemetry channel disconnected")]
    Disconnected,
}

type Decoder = Box<dyn Fn(&[u8]) -> Result<LowState, DeviceError> + Send>;

/// 遥测流
///
/// # 示例
///
/// ```rust
/// use booster_client::TelemetryFeed;
/// use booster_types::LowState;
/// use std::time::Duration;
///
/// let (tx, rx) = crossbeam_channel::unbounded();
/// let mut feed = TelemetryFeed::new(rx);
///
/// tx.send(LowState::default().to_cdr_le().unwrap().into()).unwrap();
/// tx.send(vec![0xFF].into()).unwrap();
/// drop(tx);
///
/// // 迭代器跳过损坏的帧
/// assert_eq!(feed.by_ref().count(), 1);
/// assert_eq!(feed.decode_failures(), 1);
/// ```
pub struct TelemetryFeed {
    rx: Receiver<Bytes>,
    decoder: Decoder,
    decode_failures: u64,
}

impl TelemetryFeed {
    /// 使用默认的小端 CDR 解码
    pub fn new(rx: Receiver<Bytes>) -> Self {
        Self::with_decoder(rx, |payload| {
            LowState::from_cdr_le(payload).map_err(DeviceError::from)
        })
    }

    /// 使用绑定自身的解码实现
    pub fn for_binding<B>(rx: Receiver<Bytes>, binding: &B) -> Self
    where
        B: DeviceBinding + Clone + Send + 'static,
    {
        let binding = binding.clone();
        Self::with_decoder(rx, move |payload| binding.decode_low_state(payload))
    }

    pub fn with_decoder<F>(rx: Receiver<Bytes>, decoder: F) -> Self
    where
        F: Fn(&[u8]) -> Result<LowState, DeviceError> + Send + 'static,
    {
        Self {
            rx,
            decoder: Box::new(decoder),
            decode_failures: 0,
        }
    }

    /// 累计解码失败次数
    pub fn decode_failures(&self) -> u64 {
        self.decode_failures
    }

    fn decode(&mut self, payload: &[u8]) -> Result<LowState, TelemetryError> {
        (self.decoder)(payload).map_err(|e| {
            self.decode_failures += 1;
            TelemetryError::Decode(e)
        })
    }

    /// 阻塞等待下一帧
    pub fn recv_timeout(&mut self, timeout: Duration) -> Result<LowState, TelemetryError> {
        let payload = self.rx.recv_timeout(timeout).map_err(|e| match e {
            RecvTimeoutError::Timeout => TelemetryError::Timeout,
            RecvTimeoutError::Disconnected => TelemetryError::Disconnected,
        })?;
        self.decode(&payload)
    }

    /// 非阻塞读取，没有新帧时返回 `Ok(None)`
    pub fn try_recv(&mut self) -> Result<Option<LowState>, TelemetryError> {
        match self.rx.try_recv() {
            Ok(payload) => self.decode(&payload).map(Some),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(TelemetryError::Disconnected),
        }
    }

    /// 丢弃积压的帧，只解码最新一帧
    pub fn latest(&mut self) -> Result<Option<LowState>, TelemetryError> {
        let mut newest = None;
        loop {
            match self.rx.try_recv() {
                Ok(payload) => newest = Some(payload),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) if newest.is_some() => break,
                Err(TryRecvError::Disconnected) => return Err(TelemetryError::Disconnected),
            }
        }
        newest.map(|payload| self.decode(&payload)).transpose()
    }
}

impl Iterator for TelemetryFeed {
    type Item = LowState;

    /// 阻塞直到解码出一帧；通道关闭时结束
    fn next(&mut self) -> Option<LowState> {
        loop {
            let payload = self.rx.recv().ok()?;
            match self.decode(&payload) {
                Ok(state) => return Some(state),
                Err(e) => {
                    warn!("Dropping telemetry sample: {}", e);
                    debug!("Corrupt payload is {} bytes", payload.len());
                },
            }
        }
    }
}
