//! 强制转换
//!
//! 每个规范类型有一个转换函数，按固定顺序尝试可接受的形状，前面的规则适用时
//! 不会再尝试后面的规则：
//!
//! 1. 已是目标类型的规范值，原样返回
//! 2. 定长序列（元素个数必须精确匹配，否则 `InvalidShape`）
//! 3. 稠密数值数组（同样的个数规则；复合类型不接受）
//! 4. 字符串键映射（按声明顺序报告第一个缺失的键 `MissingField`，多余的键忽略）
//! 5. 暴露全部字段的属性对象（包括其他类型的规范值）
//! 6. 其余一律 `UnsupportedType`
//!
//! 复合类型（`Transform`、`Posture`）的子字段递归走各自类型的协议，因此
//! `Transform` 的 `rotation` 本身也可以是任意四元数形状。

use crate::error::CoercionError;
use crate::input::{Attributes, Canonical, Input, Number};
use booster_types::{FingerControl, Position, Posture, Quaternion, Transform};

/// 单个规范类型的转换规则
trait Coerce: Sized {
    const TARGET: &'static str;
    /// 字段名（声明顺序即序列中的位置顺序）
    const FIELDS: &'static [&'static str];
    const ACCEPTS_ARRAY: bool;
    const ACCEPTED: &'static str;

    fn from_canonical(value: &Canonical) -> Option<Self>;

    /// 由按 `FIELDS` 顺序排列的字段值构造
    fn from_fields(fields: Vec<Input>) -> Result<Self, CoercionError>;
}

fn coerce<T: Coerce>(input: Input) -> Result<T, CoercionError> {
    match input {
        Input::Canonical(value) => match T::from_canonical(&value) {
            Some(out) => Ok(out),
            None => from_attributes(&value),
        },
        Input::Sequence(items) => {
            check_arity::<T>(items.len())?;
            T::from_fields(items)
        },
        Input::Array(values) if T::ACCEPTS_ARRAY => {
            check_arity::<T>(values.len())?;
            T::from_fields(values.iter().map(|v| Input::Number(Number::Float(*v))).collect())
        },
        Input::Mapping(mut map) => {
            let fields = T::FIELDS
                .iter()
                .map(|&field| {
                    map.remove(field).ok_or(CoercionError::MissingField {
                        target: T::TARGET,
                        field,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            T::from_fields(fields)
        },
        Input::Object(obj) => from_attributes(obj.as_ref()),
        other => Err(unsupported::<T>(other.type_name())),
    }
}

fn check_arity<T: Coerce>(actual: usize) -> Result<(), CoercionError> {
    if actual != T::FIELDS.len() {
        return Err(CoercionError::InvalidShape {
            target: T::TARGET,
            expected: T::FIELDS.len(),
            actual,
        });
    }
    Ok(())
}

fn from_attributes<T: Coerce>(source: &dyn Attributes) -> Result<T, CoercionError> {
    let fields: Option<Vec<Input>> = T::FIELDS.iter().map(|f| source.attribute(f)).collect();
    match fields {
        Some(fields) => T::from_fields(fields),
        None => Err(unsupported::<T>(source.type_name().to_string())),
    }
}

fn unsupported<T: Coerce>(actual: String) -> CoercionError {
    CoercionError::UnsupportedType {
        target: T::TARGET.to_string(),
        actual,
        accepted: T::ACCEPTED,
    }
}

/// 转换复合类型的子字段，错误的 `target` 改写为 `path`（如 `Posture.orientation`）
fn nested<T: Coerce>(path: &'static str, input: Input) -> Result<T, CoercionError> {
    coerce::<T>(input).map_err(|err| match err {
        CoercionError::InvalidShape {
            expected, actual, ..
        } => CoercionError::InvalidShape {
            target: path,
            expected,
            actual,
        },
        CoercionError::MissingField { field, .. } => CoercionError::MissingField {
            target: path,
            field,
        },
        CoercionError::UnsupportedType {
            target,
            actual,
            accepted,
        } => CoercionError::UnsupportedType {
            // 保留叶子字段后缀：Position.y -> Posture.orientation.y
            target: match target.strip_prefix(T::TARGET) {
                Some(rest) => format!("{path}{rest}"),
                None => path.to_string(),
            },
            actual,
            accepted,
        },
        other => other,
    })
}

/// 把字段列表拆成定长数组
fn take<T: Coerce, const N: usize>(fields: Vec<Input>) -> Result<[Input; N], CoercionError> {
    fields
        .try_into()
        .map_err(|rest: Vec<Input>| CoercionError::InvalidShape {
            target: T::TARGET,
            expected: N,
            actual: rest.len(),
        })
}

fn float_field<T: Coerce>(field: &str, value: &Input) -> Result<f64, CoercionError> {
    match value {
        Input::Number(n) => Ok(n.as_f64()),
        other => Err(CoercionError::UnsupportedType {
            target: format!("{}.{field}", T::TARGET),
            actual: other.type_name(),
            accepted: "a number",
        }),
    }
}

/// 整数字段接受整数，或者能放进 i32 的有限浮点数（向零截断）
fn int_field<T: Coerce>(field: &str, value: &Input) -> Result<i32, CoercionError> {
    let converted = match value {
        Input::Number(Number::Int(i)) => i32::try_from(*i).ok(),
        Input::Number(Number::Float(f))
            if f.is_finite() && f.trunc() >= f64::from(i32::MIN) && f.trunc() <= f64::from(i32::MAX) =>
        {
            Some(f.trunc() as i32)
        },
        _ => None,
    };
    converted.ok_or_else(|| CoercionError::UnsupportedType {
        target: format!("{}.{field}", T::TARGET),
        actual: value.type_name(),
        accepted: "an integer in i32 range",
    })
}

impl Coerce for Position {
    const TARGET: &'static str = "Position";
    const FIELDS: &'static [&'static str] = &["x", "y", "z"];
    const ACCEPTS_ARRAY: bool = true;
    const ACCEPTED: &'static str = "Position, a sequence or array of 3 numbers, \
         a mapping with keys x, y, z, or an object with attributes x, y, z";

    fn from_canonical(value: &Canonical) -> Option<Self> {
        match value {
            Canonical::Position(p) => Some(*p),
            _ => None,
        }
    }

    fn from_fields(fields: Vec<Input>) -> Result<Self, CoercionError> {
        let [x, y, z] = take::<Self, 3>(fields)?;
        Ok(Position::new(
            float_field::<Self>("x", &x)?,
            float_field::<Self>("y", &y)?,
            float_field::<Self>("z", &z)?,
        ))
    }
}

impl Coerce for Quaternion {
    const TARGET: &'static str = "Quaternion";
    const FIELDS: &'static [&'static str] = &["x", "y", "z", "w"];
    const ACCEPTS_ARRAY: bool = true;
    const ACCEPTED: &'static str = "Quaternion, a sequence or array of 4 numbers, \
         a mapping with keys x, y, z, w, or an object with attributes x, y, z, w";

    fn from_canonical(value: &Canonical) -> Option<Self> {
        match value {
            Canonical::Quaternion(q) => Some(*q),
            _ => None,
        }
    }

    fn from_fields(fields: Vec<Input>) -> Result<Self, CoercionError> {
        let [x, y, z, w] = take::<Self, 4>(fields)?;
        Ok(Quaternion::new(
            float_field::<Self>("x", &x)?,
            float_field::<Self>("y", &y)?,
            float_field::<Self>("z", &z)?,
            float_field::<Self>("w", &w)?,
        ))
    }
}

impl Coerce for Transform {
    const TARGET: &'static str = "Transform";
    const FIELDS: &'static [&'static str] = &["position", "rotation"];
    const ACCEPTS_ARRAY: bool = false;
    const ACCEPTED: &'static str = "Transform, a (position, rotation) pair, \
         a mapping with keys position, rotation, or an object with attributes position, rotation";

    fn from_canonical(value: &Canonical) -> Option<Self> {
        match value {
            Canonical::Transform(t) => Some(*t),
            _ => None,
        }
    }

    fn from_fields(fields: Vec<Input>) -> Result<Self, CoercionError> {
        let [position, rotation] = take::<Self, 2>(fields)?;
        Ok(Transform::new(
            nested("Transform.position", position)?,
            nested("Transform.rotation", rotation)?,
        ))
    }
}

impl Coerce for Posture {
    const TARGET: &'static str = "Posture";
    const FIELDS: &'static [&'static str] = &["position", "orientation"];
    const ACCEPTS_ARRAY: bool = false;
    const ACCEPTED: &'static str = "Posture, a (position, orientation) pair, \
         a mapping with keys position, orientation, or an object with attributes position, orientation";

    fn from_canonical(value: &Canonical) -> Option<Self> {
        match value {
            Canonical::Posture(p) => Some(*p),
            _ => None,
        }
    }

    fn from_fields(fields: Vec<Input>) -> Result<Self, CoercionError> {
        let [position, orientation] = take::<Self, 2>(fields)?;
        // orientation 是 roll/pitch/yaw 三元组，复用位置的转换协议
        Ok(Posture::new(
            nested::<Position>("Posture.position", position)?,
            nested::<Position>("Posture.orientation", orientation)?,
        ))
    }
}

impl Coerce for FingerControl {
    const TARGET: &'static str = "FingerControl";
    const FIELDS: &'static [&'static str] = &["angle", "force", "speed"];
    const ACCEPTS_ARRAY: bool = true;
    const ACCEPTED: &'static str = "FingerControl, a sequence or array of 3 numbers, \
         a mapping with keys angle, force, speed, or an object with attributes angle, force, speed";

    fn from_canonical(value: &Canonical) -> Option<Self> {
        match value {
            Canonical::FingerControl(f) => Some(*f),
            _ => None,
        }
    }

    fn from_fields(fields: Vec<Input>) -> Result<Self, CoercionError> {
        let [angle, force, speed] = take::<Self, 3>(fields)?;
        Ok(FingerControl::new(
            float_field::<Self>("angle", &angle)?,
            int_field::<Self>("force", &force)?,
            int_field::<Self>("speed", &speed)?,
        ))
    }
}

/// 转换为 [`Position`]
///
/// ```rust
/// use booster_client::to_position;
/// use booster_types::Position;
///
/// assert_eq!(to_position([1.0, 2.0, 3.0]).unwrap(), Position::new(1.0, 2.0, 3.0));
/// assert!(to_position([1.0, 2.0]).is_err());
/// ```
pub fn to_position(value: impl Into<Input>) -> Result<Position, CoercionError> {
    coerce(value.into())
}

/// 转换为 [`Quaternion`]（不做归一化，单位长度检查在校验阶段）
pub fn to_quaternion(value: impl Into<Input>) -> Result<Quaternion, CoercionError> {
    coerce(value.into())
}

/// 转换为 [`Transform`]
pub fn to_transform(value: impl Into<Input>) -> Result<Transform, CoercionError> {
    coerce(value.into())
}

/// 转换为 [`Posture`]
pub fn to_posture(value: impl Into<Input>) -> Result<Posture, CoercionError> {
    coerce(value.into())
}

/// 转换为 [`FingerControl`]
pub fn to_finger_control(value: impl Into<Input>) -> Result<FingerControl, CoercionError> {
    coerce(value.into())
}
