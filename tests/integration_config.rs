//! 配置与进程级设置集成测试
//!
//! 测试范围:
//! - Config - TOML 读写、缺省值、非法值
//! - logging::init - 安装比较模式后常量按补齐空格规则排序

use std::cmp::Ordering;

use serial_test::serial;
use sqlsymbol::config::Config;
use sqlsymbol::core::types::expression::Constant;
use sqlsymbol::core::value::ValueComparator;
use sqlsymbol::utils::logging;

#[test]
fn test_config_save_and_load() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("sqlsymbol.toml");

    let mut config = Config::default();
    config.log.level = "debug".to_string();
    config.comparison.pad_space = true;
    config.save(&path).expect("Failed to save config");

    let loaded = Config::load(&path).expect("Failed to load config");
    assert_eq!(loaded, config);
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    assert!(Config::load(dir.path().join("missing.toml")).is_err());
}

#[test]
fn test_rejects_malformed_toml() {
    assert!(Config::from_toml_str("[log\nlevel = ").is_err());
    assert!(Config::from_toml_str("[log]\nmax_files = 0\n").is_err());
}

#[test]
#[serial]
fn test_init_installs_pad_space() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut config = Config::default();
    config.log.dir = dir.path().to_string_lossy().into_owned();
    config.comparison.pad_space = true;

    logging::init(&config).expect("日志初始化失败");
    assert!(ValueComparator::global().pad_space());

    let padded = Constant::new("abc  ");
    let plain = Constant::new("abc");
    assert_eq!(padded.compare_to(&plain), Ok(Ordering::Equal));
    assert_eq!(
        padded.compare_with(&plain, &ValueComparator::with_pad_space(false)),
        Ok(Ordering::Greater)
    );

    // 第二次安装不生效
    config.comparison.pad_space = false;
    assert!(!ValueComparator::install(&config.comparison));
    assert!(ValueComparator::global().pad_space());

    logging::shutdown();
}
