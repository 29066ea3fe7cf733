//! 顶层导出测试
//!
//! 验证核心类型可以从 `booster_sdk` 直接导入

use booster_sdk::{
    ClientBuilder, ClientConfig, ClientError, DEFAULT_LOG_FILTER, DeviceError, DeviceErrorKind,
    ErrorKind, LoggerError, QuaternionPolicy, client, types,
};

#[test]
fn test_top_level_exports() {
    let _builder: ClientBuilder = ClientBuilder::new();
    let _config: ClientConfig = ClientConfig::default();
    let _policy: QuaternionPolicy = QuaternionPolicy::default();
    let error: ClientError = DeviceError::new(DeviceErrorKind::Timeout, "no reply").into();
    assert_eq!(error.kind(), ErrorKind::DeviceError);
    assert_eq!(DEFAULT_LOG_FILTER, "info");
}

#[test]
fn test_module_aliases() {
    let p = client::to_position([1.0, 2.0, 3.0]).unwrap();
    assert_eq!(p, types::Position::new(1.0, 2.0, 3.0));
    assert_eq!(types::Hand::try_from(1i32).unwrap(), types::Hand::Right);
}

#[test]
fn test_logger_init_is_idempotent() {
    booster_sdk::init_logger();
    booster_sdk::init_logger();
    // 重复初始化在桥接阶段就失败，订阅者保持第一次安装的那个
    let err = booster_sdk::init_logger_with("debug").unwrap_err();
    assert!(matches!(err, LoggerError::LogBridge(_)), "{err}");
    assert!(tracing::dispatcher::has_been_set());
}
