//! 指令参数校验
//!
//! 在强制转换之后、下发之前执行的无状态范围检查。任何一项失败都会让整条指令
//! 被拒绝，不会有部分参数到达设备绑定。

use crate::error::{Bound, ValidationError};
use booster_types::{Position, Posture, Quaternion, Transform};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// 夹爪速度下限
pub const GRIPPER_SPEED_MIN: i64 = 1;
/// 夹爪速度上限
pub const GRIPPER_SPEED_MAX: i64 = 1000;

/// 四元数单位长度处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuaternionPolicy {
    /// 原样下发
    PassThrough,
    /// 偏离单位长度时归一化（零四元数仍然拒绝）
    #[default]
    Normalize,
    /// 偏离单位长度超过容差时拒绝
    Reject,
}

fn out_of_range(parameter: &str, value: f64, bound: Bound) -> ValidationError {
    ValidationError::OutOfRange {
        parameter: parameter.to_string(),
        value,
        bound,
    }
}

/// 检查有限值
pub fn finite(parameter: &str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(out_of_range(parameter, value, Bound::Finite));
    }
    Ok(value)
}

/// 时长（秒）必须为正
///
/// 正值无论量级都会通过：小于 1ns 的值向上取到 1ns，超出 `Duration` 表示范围的值
/// （包括 `+inf`）取 `Duration::MAX`。
///
/// ```rust
/// use booster_client::validate;
/// use std::time::Duration;
///
/// assert_eq!(validate::duration("duration", 1.5).unwrap(), Duration::from_millis(1500));
/// assert_eq!(validate::duration("duration", 1e-12).unwrap(), Duration::from_nanos(1));
/// assert!(validate::duration("duration", 0.0).is_err());
/// ```
pub fn duration(parameter: &str, seconds: f64) -> Result<Duration, ValidationError> {
    if seconds.is_nan() || seconds <= 0.0 {
        return Err(out_of_range(parameter, seconds, Bound::Positive));
    }
    let converted = Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX);
    // 正时长不能以零下发
    Ok(converted.max(Duration::from_nanos(1)))
}

/// 夹爪速度必须在 `[1, 1000]` 内
pub fn gripper_speed(speed: i64) -> Result<u16, ValidationError> {
    if !(GRIPPER_SPEED_MIN..=GRIPPER_SPEED_MAX).contains(&speed) {
        return Err(out_of_range(
            "speed",
            speed as f64,
            Bound::Closed {
                min: GRIPPER_SPEED_MIN as f64,
                max: GRIPPER_SPEED_MAX as f64,
            },
        ));
    }
    // 范围已检查，不会截断
    Ok(speed as u16)
}

/// 归一化比例因子必须在 `[0.0, 1.0]` 内
pub fn rate_factor(parameter: &str, value: f64) -> Result<f64, ValidationError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(out_of_range(parameter, value, Bound::Closed { min: 0.0, max: 1.0 }));
    }
    Ok(value)
}

/// 位置（或欧拉角三元组）的每个分量必须有限
pub fn position(parameter: &str, p: &Position) -> Result<(), ValidationError> {
    for (axis, v) in [("x", p.x), ("y", p.y), ("z", p.z)] {
        finite(&format!("{parameter}.{axis}"), v)?;
    }
    Ok(())
}

pub fn posture(parameter: &str, p: &Posture) -> Result<(), ValidationError> {
    position(&format!("{parameter}.position"), &p.position)?;
    position(&format!("{parameter}.orientation"), &p.orientation)
}

/// 按策略检查四元数，返回实际下发的值
///
/// 分量必须有限；`Normalize` 和 `Reject` 下零四元数都会被拒绝。
pub fn quaternion(
    parameter: &str,
    q: Quaternion,
    policy: QuaternionPolicy,
    tolerance: f64,
) -> Result<Quaternion, ValidationError> {
    for (axis, v) in [("x", q.x), ("y", q.y), ("z", q.z), ("w", q.w)] {
        finite(&format!("{parameter}.{axis}"), v)?;
    }

    let norm = q.norm();
    let near_unit = (norm - 1.0).abs() <= tolerance;
    match policy {
        QuaternionPolicy::PassThrough => Ok(q),
        QuaternionPolicy::Normalize if near_unit => Ok(q),
        QuaternionPolicy::Normalize => match q.normalized() {
            Some(unit) => {
                warn!("Quaternion {} has norm {:.4}, normalizing before dispatch", parameter, norm);
                Ok(unit)
            },
            None => Err(out_of_range(&format!("{parameter}.norm"), norm, Bound::Positive)),
        },
        QuaternionPolicy::Reject if near_unit => Ok(q),
        QuaternionPolicy::Reject => Err(out_of_range(
            &format!("{parameter}.norm"),
            norm,
            Bound::NearUnit { tolerance },
        )),
    }
}

pub fn transform(
    parameter: &str,
    t: Transform,
    policy: QuaternionPolicy,
    tolerance: f64,
) -> Result<Transform, ValidationError> {
    position(&format!("{parameter}.position"), &t.position)?;
    let rotation = quaternion(&format!("{parameter}.rotation"), t.rotation, policy, tolerance)?;
    Ok(Transform::new(t.position, rotation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_bounds() {
        assert!(duration("duration", 0.0).is_err());
        assert!(duration("duration", -1.0).is_err());
        assert!(duration("duration", f64::NAN).is_err());
        assert!(duration("duration", f64::NEG_INFINITY).is_err());
        assert_eq!(duration("duration", f64::INFINITY).unwrap(), Duration::MAX);
        assert_eq!(duration("duration", 0.25).unwrap(), Duration::from_millis(250));
        assert!(duration("duration", 1e-6).is_ok());
        assert!(duration("duration", 1e9).is_ok());
        assert_eq!(duration("duration", 1e300).unwrap(), Duration::MAX);

        let err = duration("duration", -1.0).unwrap_err();
        assert_eq!(err.parameter(), "duration");
    }

    #[test]
    fn test_sub_nanosecond_duration_rounds_up() {
        assert_eq!(duration("duration", 1e-12).unwrap(), Duration::from_nanos(1));
        assert_eq!(duration("duration", f64::MIN_POSITIVE).unwrap(), Duration::from_nanos(1));
        assert_eq!(duration("duration", 1e-9).unwrap(), Duration::from_nanos(1));
        assert_eq!(duration("duration", 2e-9).unwrap(), Duration::from_nanos(2));
    }

    #[test]
    fn test_gripper_speed_bounds() {
        assert!(gripper_speed(0).is_err());
        assert!(gripper_speed(1001).is_err());
        assert!(gripper_speed(-5).is_err());
        assert_eq!(gripper_speed(1).unwrap(), 1);
        assert_eq!(gripper_speed(1000).unwrap(), 1000);
    }

    #[test]
    fn test_rate_factor_bounds() {
        assert_eq!(rate_factor("speed", 0.0).unwrap(), 0.0);
        assert_eq!(rate_factor("speed", 1.0).unwrap(), 1.0);
        assert!(rate_factor("speed", 1.01).is_err());
        assert!(rate_factor("speed", -0.01).is_err());
        assert!(rate_factor("speed", f64::NAN).is_err());
    }

    #[test]
    fn test_position_finite() {
        let err = position("target", &Position::new(0.0, f64::NAN, 0.0)).unwrap_err();
        assert_eq!(err.parameter(), "target.y");
    }

    #[test]
    fn test_quaternion_policies() {
        let q = Quaternion::new(0.0, 0.0, 0.0, 2.0);

        assert_eq!(quaternion("q", q, QuaternionPolicy::PassThrough, 1e-3).unwrap(), q);
        assert_eq!(
            quaternion("q", q, QuaternionPolicy::Normalize, 1e-3).unwrap(),
            Quaternion::IDENTITY
        );
        let err = quaternion("q", q, QuaternionPolicy::Reject, 1e-3).unwrap_err();
        assert_eq!(err.parameter(), "q.norm");

        // 容差内不改动
        let near = Quaternion::new(0.0, 0.0, 0.0, 1.0005);
        assert_eq!(quaternion("q", near, QuaternionPolicy::Normalize, 1e-3).unwrap(), near);
        assert_eq!(quaternion("q", near, QuaternionPolicy::Reject, 1e-3).unwrap(), near);
    }

    #[test]
    fn test_zero_quaternion() {
        let zero = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        assert!(quaternion("q", zero, QuaternionPolicy::Normalize, 1e-3).is_err());
        assert!(quaternion("q", zero, QuaternionPolicy::Reject, 1e-3).is_err());
        assert!(quaternion("q", zero, QuaternionPolicy::PassThrough, 1e-3).is_ok());
    }

    #[test]
    fn test_policy_serde_names() {
        let policy: QuaternionPolicy = serde_json::from_str("\"pass_through\"").unwrap();
        assert_eq!(policy, QuaternionPolicy::PassThrough);
        assert_eq!(serde_json::to_string(&QuaternionPolicy::Normalize).unwrap(), "\"normalize\"");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// 非正时长一律越界
            #[test]
            fn non_positive_duration_rejected(secs in -1.0e6..=0.0f64) {
                let err = duration("duration", secs).unwrap_err();
                prop_assert_eq!(err.parameter(), "duration");
            }

            /// 正的有限时长一律通过，且换算不丢失量级
            #[test]
            fn positive_duration_accepted(secs in 1.0e-3..1.0e6f64) {
                let d = duration("duration", secs).unwrap();
                prop_assert!((d.as_secs_f64() - secs).abs() <= 1e-9 * secs.max(1.0));
            }

            /// 任意正值都换算为非零时长
            #[test]
            fn positive_duration_never_zero(exp in -300i32..300, mantissa in 1.0..10.0f64) {
                let secs = mantissa * 10f64.powi(exp);
                prop_assert!(secs > 0.0);
                prop_assert!(!duration("duration", secs).unwrap().is_zero());
            }

            /// 夹爪速度只接受 [1, 1000]
            #[test]
            fn gripper_speed_range(speed in -5000i64..5000) {
                let accepted = (GRIPPER_SPEED_MIN..=GRIPPER_SPEED_MAX).contains(&speed);
                prop_assert_eq!(gripper_speed(speed).is_ok(), accepted);
            }

            /// 归一化后范数为 1
            #[test]
            fn normalized_quaternion_is_unit(
                x in -10.0..10.0f64,
                y in -10.0..10.0f64,
                z in -10.0..10.0f64,
                w in 0.1..10.0f64,
            ) {
                let q = quaternion("q", Quaternion::new(x, y, z, w), QuaternionPolicy::Normalize, 1e-3)
                    .unwrap();
                prop_assert!((q.norm() - 1.0).abs() <= 1e-3);
            }
        }
    }
}
