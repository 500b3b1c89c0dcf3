use super::*;
use tempfile::NamedTempFile;

#[test]
fn test_validate_default_config() {
    let config = Config::default();
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_empty_level() {
    let mut config = Config::default();
    config.logging.level = "  ".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "logging.level"));
}

#[test]
fn test_validate_unknown_level() {
    let mut config = Config::default();
    config.logging.level = "verbose".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
}

#[test]
fn test_validate_level_is_case_insensitive() {
    let mut config = Config::default();
    config.logging.level = "DEBUG".to_string();

    assert!(ConfigValidator::validate(&config).is_valid());
}

#[test]
fn test_validate_directive_warns() {
    let mut config = Config::default();
    config.logging.level = "formwire_core=trace,info".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn test_validate_log_dir_is_file() {
    let file = NamedTempFile::new().unwrap();
    let mut config = Config::default();
    config.logging.dir = Some(file.path().to_path_buf());

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "logging.dir"));
}

#[test]
fn test_validate_missing_log_dir_is_ok() {
    let mut config = Config::default();
    config.logging.dir = Some("/nonexistent/formwire/logs".into());

    assert!(ConfigValidator::validate(&config).is_valid());
}
