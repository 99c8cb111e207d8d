/*!
 * Tests for application configuration functionality
 */

use std::fs;

use anyhow::Result;
use subedit::app_config::{Config, LogLevel};

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_shouldHaveExpectedValues() {
    let config = Config::default();
    assert_eq!(config.language, "en");
    assert_eq!(config.subtitle.output_extension, "dfxp");
    assert!(config.subtitle.trim_paragraph_whitespace);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test validation of language codes
#[test]
fn test_validate_withUnknownLanguage_shouldFail() {
    let config = Config {
        language: "zz-invalid".to_string(),
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

/// Test validation accepts regional tags
#[test]
fn test_validate_withRegionalTag_shouldPass() {
    let config = Config {
        language: "pt-BR".to_string(),
        ..Config::default()
    };
    assert!(config.validate().is_ok());
}

/// Test validation of the output extension
#[test]
fn test_validate_withEmptyExtension_shouldFail() {
    let mut config = Config::default();
    config.subtitle.output_extension = ".".to_string();
    assert!(config.validate().is_err());
}

/// Test saving and reloading a configuration file
#[test]
fn test_save_thenFromFile_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.language = "fr".to_string();
    config.log_level = LogLevel::Debug;
    config.subtitle.trim_paragraph_whitespace = false;
    config.save(&path)?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded.language, "fr");
    assert_eq!(loaded.log_level, LogLevel::Debug);
    assert!(!loaded.subtitle.read_options().trim_whitespace);
    Ok(())
}

/// Test that missing sections fall back to defaults
#[test]
fn test_fromFile_withPartialConfig_shouldUseDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", r#"{"language": "de"}"#)?;

    let config = Config::from_file(&path)?;
    assert_eq!(config.language, "de");
    assert_eq!(config.subtitle.output_extension, "dfxp");
    assert_eq!(config.log_level, LogLevel::Info);
    Ok(())
}

/// Test creation of a default file when none exists
#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("new_conf.json");

    let config = Config::load_or_create(&path)?;
    assert_eq!(config.language, "en");
    assert!(path.exists());

    let written = fs::read_to_string(&path)?;
    assert!(written.contains("\"log_level\": \"info\""));
    Ok(())
}

/// Test that invalid JSON is reported
#[test]
fn test_fromFile_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;
    assert!(Config::from_file(&path).is_err());
    Ok(())
}
