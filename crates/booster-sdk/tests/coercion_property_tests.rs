//! 强制转换的属性测试
//!
//! 使用 proptest 验证各输入形状之间的一致性。

use booster_sdk::prelude::*;
use booster_sdk::{Input, client::Attributes};
use nalgebra::{DVector, Vector3};
use proptest::prelude::*;
use serde_json::json;

fn finite() -> impl Strategy<Value = f64> {
    -1.0e6..1.0e6f64
}

fn wrong_arity(expected: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(finite(), 0..8).prop_filter("arity must differ", move |v| v.len() != expected)
}

/// 只暴露部分字段的对象
#[derive(Debug)]
struct Partial;

impl Attributes for Partial {
    fn type_name(&self) -> &str {
        "Partial"
    }

    fn attribute(&self, name: &str) -> Option<Input> {
        (name == "x").then(|| 1.0.into())
    }
}

proptest! {
    /// 三元序列原样转换为位置
    #[test]
    fn position_from_sequence_is_identity(x in finite(), y in finite(), z in finite()) {
        prop_assert_eq!(to_position([x, y, z]).unwrap(), Position::new(x, y, z));
    }

    /// 映射与序列给出相同的位置
    #[test]
    fn position_mapping_matches_sequence(x in finite(), y in finite(), z in finite()) {
        let from_map = to_position(json!({"x": x, "y": y, "z": z})).unwrap();
        let from_seq = to_position(vec![x, y, z]).unwrap();
        prop_assert_eq!(from_map, from_seq);
    }

    /// 稠密数组与序列给出相同的位置
    #[test]
    fn position_array_matches_sequence(x in finite(), y in finite(), z in finite()) {
        prop_assert_eq!(
            to_position(Vector3::new(x, y, z)).unwrap(),
            to_position((x, y, z)).unwrap()
        );
    }

    /// 元素个数不为 3 的序列一律 InvalidShape
    #[test]
    fn position_wrong_arity(values in wrong_arity(3)) {
        let err = to_position(values.clone()).unwrap_err();
        prop_assert_eq!(
            err,
            CoercionError::InvalidShape { target: "Position", expected: 3, actual: values.len() }
        );
        let err = to_position(DVector::from_vec(values.clone())).unwrap_err();
        let is_invalid_shape = matches!(err, CoercionError::InvalidShape { .. });
        prop_assert!(is_invalid_shape);
    }

    /// 元素个数不为 4 的序列一律 InvalidShape
    #[test]
    fn quaternion_wrong_arity(values in wrong_arity(4)) {
        let err = to_quaternion(values.clone()).unwrap_err();
        prop_assert_eq!(
            err,
            CoercionError::InvalidShape { target: "Quaternion", expected: 4, actual: values.len() }
        );
    }

    /// 缺少任一键时报告该键
    #[test]
    fn quaternion_missing_key(missing in 0usize..4, v in finite()) {
        let keys = ["x", "y", "z", "w"];
        let map: serde_json::Map<String, serde_json::Value> = keys
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != missing)
            .map(|(_, k)| (k.to_string(), json!(v)))
            .collect();
        let err = to_quaternion(serde_json::Value::Object(map)).unwrap_err();
        prop_assert_eq!(err, CoercionError::MissingField { target: "Quaternion", field: keys[missing] });
    }

    /// 变换的组合性质
    #[test]
    fn transform_composes(
        p in prop::array::uniform3(finite()),
        q in prop::array::uniform4(finite()),
    ) {
        let composed = to_transform((p, q)).unwrap();
        prop_assert_eq!(
            composed,
            Transform::new(to_position(p).unwrap(), to_quaternion(q).unwrap())
        );
    }

    /// 强制转换幂等
    #[test]
    fn position_coercion_idempotent(x in finite(), y in finite(), z in finite()) {
        let once = to_position([x, y, z]).unwrap();
        prop_assert_eq!(to_position(once).unwrap(), once);
    }

    /// 单指参数的整数字段保持不变
    #[test]
    fn finger_control_integers(angle in -3.0..3.0f64, force in 0i32..1000, speed in 1i32..1000) {
        let fc = to_finger_control(json!({"angle": angle, "force": force, "speed": speed})).unwrap();
        prop_assert_eq!(fc, FingerControl::new(angle, force, speed));
    }
}

#[test]
fn test_position_scenario() {
    assert_eq!(
        to_position([1.0, 2.0, 3.0]).unwrap(),
        Position::new(1.0, 2.0, 3.0)
    );
}

#[test]
fn test_quaternion_scenario() {
    assert_eq!(
        to_quaternion(json!({"x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0})).unwrap(),
        Quaternion::new(0.0, 0.0, 0.0, 1.0)
    );
}

#[test]
fn test_no_matching_shape_is_unsupported() {
    for input in [
        Input::from("x=1"),
        Input::from(true),
        Input::Null,
        Input::from(3.5),
        Input::object(Partial),
    ] {
        let err = to_position(input).unwrap_err();
        assert!(
            matches!(err, CoercionError::UnsupportedType { .. }),
            "unexpected error: {err}"
        );
    }
}

#[test]
fn test_mapping_beats_attributes() {
    // 映射规则先于属性规则：缺键时报告 MissingField 而不是 UnsupportedType
    let err = to_position(json!({"x": 1.0, "y": 2.0})).unwrap_err();
    assert_eq!(
        err,
        CoercionError::MissingField {
            target: "Position",
            field: "z"
        }
    );
}
