//! 空间类型
//!
//! 位置、四元数、变换与姿态。这些是客户端层所有输入形状最终归一化的目标类型，
//! 本身不携带行为，只是不可变的值快照。
//!
//! # 示例
//!
//! ```rust
//! use booster_types::{Position, Quaternion, Transform};
//!
//! let tf = Transform::new(Position::new(0.3, -0.1, 0.2), Quaternion::IDENTITY);
//! assert_eq!(tf.rotation.norm(), 1.0);
//! ```

use std::fmt;

/// 三维位置（米）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// X 坐标
    pub x: f64,
    /// Y 坐标
    pub y: f64,
    /// Z 坐标
    pub z: f64,
}

impl Position {
    /// 创建新的位置
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Position { x, y, z }
    }

    /// 原点
    pub const ZERO: Self = Position::new(0.0, 0.0, 0.0);

    /// 以 `[x, y, z]` 形式返回分量
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// 所有分量是否有限（非 NaN、非无穷）
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// 四元数（x, y, z, w 顺序）
///
/// 本层不强制单位长度，是否归一化由客户端配置决定。
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quaternion {
    /// 虚部 i
    pub x: f64,
    /// 虚部 j
    pub y: f64,
    /// 虚部 k
    pub z: f64,
    /// 实部
    pub w: f64,
}

impl Quaternion {
    /// 创建新的四元数
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Quaternion { x, y, z, w }
    }

    /// 单位四元数（无旋转）
    pub const IDENTITY: Self = Quaternion::new(0.0, 0.0, 0.0, 1.0);

    /// 以 `[x, y, z, w]` 形式返回分量
    pub const fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// 模长
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// 除以模长；模长为 0 时返回 `None`
    pub fn normalized(&self) -> Option<Self> {
        let n = self.norm();
        if n == 0.0 || !n.is_finite() {
            return None;
        }
        Some(Quaternion::new(self.x / n, self.y / n, self.z / n, self.w / n))
    }

    /// 所有分量是否有限
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Quaternion::IDENTITY
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Q({:.3}, {:.3}, {:.3}, {:.3})",
            self.x, self.y, self.z, self.w
        )
    }
}

/// 三维变换（平移 + 四元数旋转）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    /// 平移
    pub position: Position,
    /// 旋转
    pub rotation: Quaternion,
}

impl Transform {
    /// 创建新的变换
    pub const fn new(position: Position, rotation: Quaternion) -> Self {
        Transform { position, rotation }
    }

    /// 恒等变换
    pub const IDENTITY: Self = Transform::new(Position::ZERO, Quaternion::IDENTITY);
}

/// 位姿（位置 + 欧拉角姿态）
///
/// 与 [`Transform`] 不同，`orientation` 是 roll/pitch/yaw 三元组（弧度），
/// 复用 [`Position`] 作为三维向量载体。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Posture {
    /// 位置（米）
    pub position: Position,
    /// 姿态 (roll, pitch, yaw)，弧度
    pub orientation: Position,
}

impl Posture {
    /// 创建新的位姿
    pub const fn new(position: Position, orientation: Position) -> Self {
        Posture {
            position,
            orientation,
        }
    }
}

/// 单指控制参数（灵巧手）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FingerControl {
    /// 目标角度（弧度）
    pub angle: f64,
    /// 目标力
    pub force: i32,
    /// 运动速度
    pub speed: i32,
}

impl FingerControl {
    /// 创建新的单指控制
    pub const fn new(angle: f64, force: i32, speed: i32) -> Self {
        FingerControl {
            angle,
            force,
            speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quaternion_normalized() {
        let q = Quaternion::new(0.0, 0.0, 0.0, 2.0).normalized().unwrap();
        assert_eq!(q, Quaternion::IDENTITY);
        assert!(Quaternion::new(0.0, 0.0, 0.0, 0.0).normalized().is_none());
    }

    #[test]
    fn test_position_finite() {
        assert!(Position::new(1.0, 2.0, 3.0).is_finite());
        assert!(!Position::new(f64::NAN, 0.0, 0.0).is_finite());
        assert!(!Position::new(0.0, f64::INFINITY, 0.0).is_finite());
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(1.0, 2.0, 3.0).to_string(), "(1.000, 2.000, 3.000)");
        assert_eq!(
            Quaternion::IDENTITY.to_string(),
            "Q(0.000, 0.000, 0.000, 1.000)"
        );
    }

    #[test]
    fn test_identity_defaults() {
        assert_eq!(Transform::default(), Transform::IDENTITY);
        assert_eq!(Posture::default().orientation, Position::ZERO);
    }
}
