//! 指令分发的端到端场景
//!
//! 通过记录型 mock 绑定检查：哪些调用到达了绑定，到达时携带的是什么值。

use booster_client::mock::{BindingCall, RecordingBinding, connection_lost};
use booster_client::{FingerSlot, HandPreset};
use booster_sdk::prelude::*;
use booster_sdk::{DeviceErrorKind, client::ConnectionState};
use proptest::prelude::*;
use serde_json::json;
use std::time::Duration;

fn connected() -> (BoosterClient<RecordingBinding>, RecordingBinding) {
    let binding = RecordingBinding::new();
    let client = ClientBuilder::new()
        .wait_for_discovery(true)
        .build(binding.clone())
        .unwrap();
    binding.clear_calls();
    (client, binding)
}

#[test]
fn test_move_hand_with_mapping_target() {
    let (mut client, binding) = connected();
    let target = json!({
        "position": {"x": 0.35, "y": 0.25, "z": 0.1},
        "orientation": [0.0, 0.0, 0.0],
    });
    client.move_hand(Hand::Left, &target, 2.0).unwrap();

    let Some(BindingCall::MoveHand(cmd)) = binding.last_call() else {
        panic!("expected MoveHand, got {:?}", binding.calls());
    };
    assert_eq!(cmd.target.position, Position::new(0.35, 0.25, 0.1));
    assert_eq!(cmd.target.orientation, Position::ZERO);
    assert_eq!(cmd.duration, Duration::from_secs(2));
}

#[test]
fn test_negative_duration_reports_parameter() {
    let (mut client, binding) = connected();
    let err = client
        .move_hand(Hand::Right, ([0.3, -0.2, 0.1], [0.0, 0.0, 0.0]), -1.0)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::OutOfRange);
    let ClientError::Validation(ValidationError::OutOfRange { parameter, value, .. }) = &err
    else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(parameter, "duration");
    assert_eq!(*value, -1.0);
    assert_eq!(binding.call_count(), 0);
}

#[test]
fn test_unknown_preset_is_rejected() {
    let (mut client, binding) = connected();
    let err = client
        .control_dexterous_hand(Hand::Left, DexterousHandOptions::new().preset("squeeze"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidPreset);
    assert!(err.to_string().contains("squeeze"));
    assert!(err.to_string().contains(HandPreset::NAMES));
    assert_eq!(binding.call_count(), 0);
}

#[test]
fn test_preset_with_override() {
    let (mut client, binding) = connected();
    let options = DexterousHandOptions::new()
        .preset("close_all")
        .thumb(json!({"angle": 0.2, "force": 100, "speed": 300}));
    client.control_dexterous_hand(Hand::Right, options).unwrap();

    let Some(BindingCall::DexterousHand(cmd)) = binding.last_call() else {
        panic!("expected DexterousHand");
    };
    assert_eq!(cmd.hand, Hand::Right);
    assert_eq!(
        cmd.fingers.get(FingerSlot::Thumb),
        Some(FingerControl::new(0.2, 100, 300))
    );
    let closed = HandPreset::CloseAll.fingers();
    for slot in FingerSlot::ALL {
        if slot != FingerSlot::Thumb {
            assert_eq!(cmd.fingers.get(slot), closed.get(slot), "{}", slot.name());
        }
    }
}

#[test]
fn test_finger_shape_errors_name_the_field() {
    let (mut client, _binding) = connected();
    let err = client
        .control_dexterous_hand(
            Hand::Left,
            DexterousHandOptions::new().index(json!({"angle": 1.0, "force": 200})),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingField);
    assert!(err.to_string().contains("speed"));
}

#[test]
fn test_gripper_scenarios() {
    let (mut client, binding) = connected();

    assert!(client
        .control_gripper(Hand::Left, GripperMode::Position, 500, Some(0))
        .is_err());
    assert!(client
        .control_gripper(Hand::Left, GripperMode::Position, 500, Some(1001))
        .is_err());
    assert!(client
        .control_gripper(Hand::Left, GripperMode::Position, 1001, Some(500))
        .is_err());
    assert_eq!(binding.call_count(), 0);

    client
        .control_gripper(Hand::Left, GripperMode::Position, 0, Some(1))
        .unwrap();
    client
        .control_gripper(Hand::Left, GripperMode::Force, 1000, Some(1000))
        .unwrap();
    client
        .publish_gripper_command(GripperCommand::grasp(Hand::Right, 300))
        .unwrap();
    assert_eq!(binding.call_count(), 3);
}

#[test]
fn test_transform_policy_reject() {
    let binding = RecordingBinding::new();
    let mut client = ClientBuilder::new()
        .quaternion_policy(QuaternionPolicy::Reject)
        .build(binding.clone())
        .unwrap();

    let err = client
        .move_hand_transform(Hand::Left, ([0.1, 0.0, 0.2], [0.0, 0.0, 0.0, 2.0]), 1.0)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);

    client
        .move_hand_transform(
            Hand::Left,
            Transform::new(Position::new(0.1, 0.0, 0.2), Quaternion::IDENTITY),
            1.0,
        )
        .unwrap();
    assert_eq!(binding.call_count(), 1);
}

#[test]
fn test_device_error_passes_through() {
    let (mut client, binding) = connected();
    binding.fail_next(connection_lost("bus timeout"));

    let err = client.rotate_head(0.1, -0.2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DeviceError);
    assert_eq!(err.as_device().map(|e| e.kind), Some(DeviceErrorKind::ConnectionLost));
    assert!(!err.is_caller_error());
    assert_eq!(err.as_device(), Some(&connection_lost("bus timeout")));

    // 失败不改变客户端状态
    client.rotate_head(0.1, -0.2).unwrap();
    assert_eq!(client.state(), ConnectionState::Connected);
}

#[test]
fn test_session_sequence() {
    let (mut client, binding) = connected();

    client.change_mode(RobotMode::Prepare).unwrap();
    client.get_up().unwrap();
    client.change_mode(RobotMode::Walking).unwrap();
    client.move_robot(0.5, 0.0, 0.1).unwrap();
    client.wave_hand(HandAction::Open).unwrap();
    client.dance(DanceId::NewYear).unwrap();
    client.stop().unwrap();
    assert_eq!(client.get_mode().unwrap(), RobotMode::Walking);
    client.close().unwrap();

    let calls = binding.calls();
    assert_eq!(calls.first(), Some(&BindingCall::ChangeMode(RobotMode::Prepare)));
    assert_eq!(calls.last(), Some(&BindingCall::Close));
    assert_eq!(calls.len(), 9);

    assert!(client.get_up().is_err());
    assert_eq!(binding.call_count(), 9);
}

#[test]
fn test_status_and_teaching_session() {
    let (mut client, binding) = connected();
    binding.set_status(RobotStatus {
        current_mode: 3,
        current_body_control: 6,
        current_actions: vec![13, 14],
    });

    client.change_mode(RobotMode::Custom).unwrap();
    client.zero_torque_drag(true).unwrap();
    client.record_trajectory(true).unwrap();
    client.record_trajectory(false).unwrap();
    client.zero_torque_drag(false).unwrap();
    let status = client.get_status().unwrap();
    assert_eq!(status.mode(), Some(RobotMode::Custom));
    assert_eq!(status.body_control(), Some(BodyControl::Custom));
    assert_eq!(
        status.actions(),
        vec![RobotAction::ZeroTorqueDrag, RobotAction::RecordTraj]
    );
    client.replay_trajectory("traj/demo.json").unwrap();
    client.move_hand_v2(Hand::Right, ([0.3, -0.2, 0.1], [0.0; 3]), 1.0).unwrap();
    client.stop_hand_end_effector().unwrap();

    let calls = binding.calls();
    assert_eq!(calls[1], BindingCall::ZeroTorqueDrag(true));
    assert_eq!(calls[5], BindingCall::GetStatus);
    assert_eq!(calls[6], BindingCall::ReplayTrajectory("traj/demo.json".into()));
    assert!(matches!(&calls[7], BindingCall::MoveHand(cmd) if cmd.new_version));
    assert_eq!(calls.last(), Some(&BindingCall::StopHandEndEffector));
}

#[test]
fn test_sub_nanosecond_duration_is_not_zero() {
    let (mut client, binding) = connected();
    client
        .move_hand(Hand::Left, ([0.3, 0.2, 0.1], [0.0, 0.0, 0.0]), 1e-12)
        .unwrap();
    let Some(BindingCall::MoveHand(cmd)) = binding.last_call() else {
        panic!("expected MoveHand");
    };
    assert!(!cmd.duration.is_zero());
}

#[test]
fn test_infinite_duration_saturates() {
    let (mut client, binding) = connected();
    client
        .move_hand_transform(Hand::Left, Transform::IDENTITY, f64::INFINITY)
        .unwrap();
    let Some(BindingCall::MoveHandTransform(cmd)) = binding.last_call() else {
        panic!("expected MoveHandTransform");
    };
    assert_eq!(cmd.duration, Duration::MAX);
}

#[test]
fn test_non_finite_velocity_rejected() {
    let (mut client, binding) = connected();
    let err = client.move_robot(f64::INFINITY, 0.0, 0.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
    assert_eq!(binding.call_count(), 0);
}

proptest! {
    /// 所有带时长的操作：非正时长越界且不下发，正时长不因时长失败
    #[test]
    fn duration_bearing_operations(secs in -1.0e4..1.0e4f64) {
        let (mut client, binding) = connected();
        let pose = ([0.3, 0.2, 0.1], [0.0, 0.0, 0.0]);
        let results = [
            client.move_hand(Hand::Left, pose, secs),
            client.move_hand_with_aux(Hand::Left, pose, pose, secs),
            client.move_hand_transform(Hand::Left, Transform::IDENTITY, secs),
        ];

        if secs <= 0.0 {
            for result in results {
                prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::OutOfRange);
            }
            prop_assert_eq!(binding.call_count(), 0);
        } else {
            for result in results {
                prop_assert!(result.is_ok());
            }
            prop_assert_eq!(binding.call_count(), 3);
        }
    }
}
