//! 输入模型
//!
//! 调用方可以用多种形状描述同一个位姿：规范结构体、定长序列、键值映射、
//! nalgebra 稠密向量，或者任何暴露了对应属性的对象。[`Input`] 把这些形状
//! 收敛为一个封闭的标签联合，强制转换逻辑只需要按分支分派。
//!
//! # 示例
//!
//! ```rust
//! use booster_client::Input;
//! use booster_types::Position;
//! use nalgebra::Vector3;
//!
//! let a: Input = [1.0, 2.0, 3.0].into();
//! let b: Input = Vector3::new(1.0, 2.0, 3.0).into();
//! let c: Input = Position::new(1.0, 2.0, 3.0).into();
//! let d: Input = serde_json::json!({"x": 1.0, "y": 2.0, "z": 3.0}).into();
//!
//! assert_eq!(a.type_name(), "sequence");
//! assert_eq!(b.type_name(), "array");
//! assert_eq!(c.type_name(), "Position");
//! assert_eq!(d.type_name(), "mapping");
//! ```

use booster_types::{FingerControl, Position, Posture, Quaternion, Transform};
use nalgebra::{DVector, Vector3, Vector4};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// 属性访问能力
///
/// 任何暴露了目标类型全部字段的对象都可以参与强制转换，例如其他库的向量类型
/// 或调用方自定义的结构体。只有在序列、数组、映射三种形状都不适用时才会查询属性。
///
/// ```rust
/// use booster_client::{Attributes, Input, to_position};
///
/// #[derive(Debug)]
/// struct Waypoint { east: f64, north: f64, up: f64 }
///
/// impl Attributes for Waypoint {
///     fn type_name(&self) -> &str { "Waypoint" }
///
///     fn attribute(&self, name: &str) -> Option<Input> {
///         match name {
///             "x" => Some(self.east.into()),
///             "y" => Some(self.north.into()),
///             "z" => Some(self.up.into()),
///             _ => None,
///         }
///     }
/// }
///
/// let p = to_position(Input::object(Waypoint { east: 1.0, north: 2.0, up: 0.5 })).unwrap();
/// assert_eq!(p.z, 0.5);
/// ```
pub trait Attributes: fmt::Debug + Send + Sync {
    /// 用于错误信息的类型名
    fn type_name(&self) -> &str;

    /// 按名称读取属性，不存在时返回 `None`
    fn attribute(&self, name: &str) -> Option<Input>;
}

/// 已经是规范类型的输入
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Canonical {
    Position(Position),
    Quaternion(Quaternion),
    Transform(Transform),
    Posture(Posture),
    FingerControl(FingerControl),
}

impl Attributes for Canonical {
    fn type_name(&self) -> &str {
        match self {
            Canonical::Position(_) => "Position",
            Canonical::Quaternion(_) => "Quaternion",
            Canonical::Transform(_) => "Transform",
            Canonical::Posture(_) => "Posture",
            Canonical::FingerControl(_) => "FingerControl",
        }
    }

    fn attribute(&self, name: &str) -> Option<Input> {
        match self {
            Canonical::Position(p) => p.attribute(name),
            Canonical::Quaternion(q) => q.attribute(name),
            Canonical::Transform(t) => t.attribute(name),
            Canonical::Posture(p) => p.attribute(name),
            Canonical::FingerControl(f) => f.attribute(name),
        }
    }
}

impl Attributes for Position {
    fn type_name(&self) -> &str {
        "Position"
    }

    fn attribute(&self, name: &str) -> Option<Input> {
        match name {
            "x" => Some(self.x.into()),
            "y" => Some(self.y.into()),
            "z" => Some(self.z.into()),
            _ => None,
        }
    }
}

impl Attributes for Quaternion {
    fn type_name(&self) -> &str {
        "Quaternion"
    }

    fn attribute(&self, name: &str) -> Option<Input> {
        match name {
            "x" => Some(self.x.into()),
            "y" => Some(self.y.into()),
            "z" => Some(self.z.into()),
            "w" => Some(self.w.into()),
            _ => None,
        }
    }
}

impl Attributes for Transform {
    fn type_name(&self) -> &str {
        "Transform"
    }

    fn attribute(&self, name: &str) -> Option<Input> {
        match name {
            "position" => Some(self.position.into()),
            "rotation" => Some(self.rotation.into()),
            _ => None,
        }
    }
}

impl Attributes for Posture {
    fn type_name(&self) -> &str {
        "Posture"
    }

    fn attribute(&self, name: &str) -> Option<Input> {
        match name {
            "position" => Some(self.position.into()),
            "orientation" => Some(self.orientation.into()),
            _ => None,
        }
    }
}

impl Attributes for FingerControl {
    fn type_name(&self) -> &str {
        "FingerControl"
    }

    fn attribute(&self, name: &str) -> Option<Input> {
        match name {
            "angle" => Some(self.angle.into()),
            "force" => Some(self.force.into()),
            "speed" => Some(self.speed.into()),
            _ => None,
        }
    }
}

/// 数值叶子
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

/// 强制转换的输入
#[derive(Debug, Clone)]
pub enum Input {
    /// 规范值
    Canonical(Canonical),
    /// 数值
    Number(Number),
    /// 有序序列（按位置解释）
    Sequence(Vec<Input>),
    /// 稠密数值向量
    Array(DVector<f64>),
    /// 字符串键映射
    Mapping(BTreeMap<String, Input>),
    /// 暴露属性的任意对象
    Object(Arc<dyn Attributes>),
    Text(String),
    Bool(bool),
    Null,
}

impl Input {
    /// 包装一个暴露属性的对象
    pub fn object(value: impl Attributes + 'static) -> Self {
        Input::Object(Arc::new(value))
    }

    /// 从键值对构造映射
    pub fn mapping<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Input>,
    {
        Input::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// 输入形状的名称（用于错误信息）
    pub fn type_name(&self) -> String {
        match self {
            Input::Canonical(c) => c.type_name().to_string(),
            Input::Number(Number::Int(_)) => "int".to_string(),
            Input::Number(Number::Float(_)) => "float".to_string(),
            Input::Sequence(_) => "sequence".to_string(),
            Input::Array(_) => "array".to_string(),
            Input::Mapping(_) => "mapping".to_string(),
            Input::Object(obj) => obj.type_name().to_string(),
            Input::Text(_) => "str".to_string(),
            Input::Bool(_) => "bool".to_string(),
            Input::Null => "null".to_string(),
        }
    }
}

macro_rules! impl_from_canonical {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for Input {
                fn from(value: $ty) -> Self {
                    Input::Canonical(Canonical::$ty(value))
                }
            }
        )*
    };
}

impl_from_canonical!(Position, Quaternion, Transform, Posture, FingerControl);

impl From<Canonical> for Input {
    fn from(value: Canonical) -> Self {
        Input::Canonical(value)
    }
}

impl From<f64> for Input {
    fn from(value: f64) -> Self {
        Input::Number(Number::Float(value))
    }
}

impl From<f32> for Input {
    fn from(value: f32) -> Self {
        Input::Number(Number::Float(f64::from(value)))
    }
}

impl From<i64> for Input {
    fn from(value: i64) -> Self {
        Input::Number(Number::Int(value))
    }
}

impl From<i32> for Input {
    fn from(value: i32) -> Self {
        Input::Number(Number::Int(i64::from(value)))
    }
}

impl From<u16> for Input {
    fn from(value: u16) -> Self {
        Input::Number(Number::Int(i64::from(value)))
    }
}

impl From<bool> for Input {
    fn from(value: bool) -> Self {
        Input::Bool(value)
    }
}

impl From<&str> for Input {
    fn from(value: &str) -> Self {
        Input::Text(value.to_string())
    }
}

impl From<String> for Input {
    fn from(value: String) -> Self {
        Input::Text(value)
    }
}

impl<T: Into<Input>, const N: usize> From<[T; N]> for Input {
    fn from(value: [T; N]) -> Self {
        Input::Sequence(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Input>> From<Vec<T>> for Input {
    fn from(value: Vec<T>) -> Self {
        Input::Sequence(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Input> + Clone> From<&[T]> for Input {
    fn from(value: &[T]) -> Self {
        Input::Sequence(value.iter().cloned().map(Into::into).collect())
    }
}

impl<A: Into<Input>, B: Into<Input>> From<(A, B)> for Input {
    fn from((a, b): (A, B)) -> Self {
        Input::Sequence(vec![a.into(), b.into()])
    }
}

impl<A: Into<Input>, B: Into<Input>, C: Into<Input>> From<(A, B, C)> for Input {
    fn from((a, b, c): (A, B, C)) -> Self {
        Input::Sequence(vec![a.into(), b.into(), c.into()])
    }
}

impl<A, B, C, D> From<(A, B, C, D)> for Input
where
    A: Into<Input>,
    B: Into<Input>,
    C: Into<Input>,
    D: Into<Input>,
{
    fn from((a, b, c, d): (A, B, C, D)) -> Self {
        Input::Sequence(vec![a.into(), b.into(), c.into(), d.into()])
    }
}

impl From<DVector<f64>> for Input {
    fn from(value: DVector<f64>) -> Self {
        Input::Array(value)
    }
}

impl From<Vector3<f64>> for Input {
    fn from(value: Vector3<f64>) -> Self {
        Input::Array(DVector::from_column_slice(value.as_slice()))
    }
}

impl From<Vector4<f64>> for Input {
    fn from(value: Vector4<f64>) -> Self {
        Input::Array(DVector::from_column_slice(value.as_slice()))
    }
}

/// nalgebra 四元数按 `[x, y, z, w]` 存储，直接映射为规范四元数
impl From<nalgebra::Quaternion<f64>> for Input {
    fn from(value: nalgebra::Quaternion<f64>) -> Self {
        let c = value.coords;
        Quaternion::new(c[0], c[1], c[2], c[3]).into()
    }
}

impl From<nalgebra::UnitQuaternion<f64>> for Input {
    fn from(value: nalgebra::UnitQuaternion<f64>) -> Self {
        value.into_inner().into()
    }
}

impl<V: Into<Input>> From<BTreeMap<String, V>> for Input {
    fn from(value: BTreeMap<String, V>) -> Self {
        Input::mapping(value)
    }
}

impl<V: Into<Input>> From<HashMap<String, V>> for Input {
    fn from(value: HashMap<String, V>) -> Self {
        Input::mapping(value)
    }
}

impl From<serde_json::Value> for Input {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Input::Null,
            Value::Bool(b) => Input::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Input::Number(Number::Int(i)),
                None => Input::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            Value::String(s) => Input::Text(s),
            Value::Array(items) => Input::Sequence(items.into_iter().map(Input::from).collect()),
            Value::Object(map) => Input::mapping(map),
        }
    }
}

impl From<&serde_json::Value> for Input {
    fn from(value: &serde_json::Value) -> Self {
        value.clone().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_shapes() {
        let input: Input = json!({"position": [1, 2.5, 3], "rotation": null}).into();
        let Input::Mapping(map) = input else {
            panic!("expected mapping");
        };
        let Some(Input::Sequence(items)) = map.get("position") else {
            panic!("expected sequence");
        };
        assert!(matches!(items[0], Input::Number(Number::Int(1))));
        assert!(matches!(items[1], Input::Number(Number::Float(f)) if f == 2.5));
        assert!(matches!(map.get("rotation"), Some(Input::Null)));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Input::from(1).type_name(), "int");
        assert_eq!(Input::from(1.0).type_name(), "float");
        assert_eq!(Input::from("pinch").type_name(), "str");
        assert_eq!(Input::from(Quaternion::IDENTITY).type_name(), "Quaternion");
        assert_eq!(Input::from(Vector4::new(0.0, 0.0, 0.0, 1.0)).type_name(), "array");
        assert_eq!(Input::Null.type_name(), "null");
    }

    #[test]
    fn test_nalgebra_quaternion_order() {
        let q = nalgebra::Quaternion::new(1.0, 0.1, 0.2, 0.3);
        let Input::Canonical(Canonical::Quaternion(out)) = Input::from(q) else {
            panic!("expected canonical quaternion");
        };
        assert_eq!(out, Quaternion::new(0.1, 0.2, 0.3, 1.0));
    }

    #[test]
    fn test_canonical_attributes() {
        let tf = Canonical::Transform(Transform::IDENTITY);
        assert_eq!(tf.type_name(), "Transform");
        assert!(matches!(
            tf.attribute("rotation"),
            Some(Input::Canonical(Canonical::Quaternion(_)))
        ));
        assert!(tf.attribute("orientation").is_none());

        let finger = FingerControl::new(1.2, 400, 500);
        assert!(matches!(
            finger.attribute("force"),
            Some(Input::Number(Number::Int(400)))
        ));
    }
}
