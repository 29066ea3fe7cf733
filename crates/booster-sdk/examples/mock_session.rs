//! Mock 会话示例
//!
//! 在没有机器人的环境下演示完整的调用流程：发现、模式切换、手臂与灵巧手指令、
//! 遥测解码。所有指令都由记录型绑定接收并打印。
//!
//! # 使用说明
//!
//! ```bash
//! RUST_LOG=debug cargo run -p booster-sdk --example mock_session --features mock
//! ```

use booster_sdk::mock::RecordingBinding;
use booster_sdk::prelude::*;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    booster_sdk::init_logger();

    println!("════════════════════════════════════════");
    println!("       Booster mock 会话");
    println!("════════════════════════════════════════");

    // === 1. 构建客户端 ===

    let binding = RecordingBinding::new();
    let mut client = ClientBuilder::new()
        .discovery_timeout(Duration::from_secs(1))
        .wait_for_discovery(true)
        .require_discovery(true)
        .with_env_overrides()
        .build(binding.clone())?;
    println!("✅ 已连接，主题: {}", client.low_state_key());

    // === 2. 起身并进入行走模式 ===

    client.change_mode(RobotMode::Prepare)?;
    client.get_up_with_mode(RobotMode::Walking)?;
    client.move_robot(0.3, 0.0, 0.0)?;

    // === 3. 手臂：三种不同形状的目标位姿 ===

    client.move_hand(Hand::Left, ([0.35, 0.25, 0.1], [0.0, 0.0, 0.0]), 2.0)?;
    client.move_hand(
        Hand::Right,
        &serde_json::json!({
            "position": {"x": 0.35, "y": -0.25, "z": 0.1},
            "orientation": {"x": 0.0, "y": 0.0, "z": 0.0},
        }),
        2.0,
    )?;
    client.move_hand_transform(
        Hand::Right,
        Transform::new(Position::new(0.3, -0.2, 0.2), Quaternion::IDENTITY),
        1.5,
    )?;

    // 非法时长在下发前被拒绝
    if let Err(e) = client.move_hand(Hand::Left, ([0.3, 0.2, 0.1], [0.0; 3]), -1.0) {
        println!("⚠️  已拒绝: {e}");
    }

    // === 4. 灵巧手：预设 + 单指覆盖 ===

    client.control_dexterous_hand(
        Hand::Left,
        DexterousHandOptions::new().preset("pinch").index((0.8, 300, 500)),
    )?;
    client.control_gripper(Hand::Right, GripperMode::Force, 300, None)?;

    // === 5. 遥测 ===

    let (tx, rx) = crossbeam_channel::unbounded();
    let mut feed = TelemetryFeed::for_binding(rx, client.binding());
    tx.send(LowState::default().to_cdr_le()?.into())?;
    let state = feed.recv_timeout(Duration::from_millis(100))?;
    println!("📊 收到遥测，电机数: {}", state.motor_count());

    client.lie_down()?;
    client.close()?;

    println!();
    println!("绑定收到的调用:");
    for call in binding.calls() {
        println!("  {call:?}");
    }
    Ok(())
}
