use claimdesk::config::Config;
use claimdesk::constants::{DEFAULT_API_URL, DEFAULT_PAGE_SIZE};
use claimdesk::utils::datetime;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.api.base_url, DEFAULT_API_URL);
    assert_eq!(config.ui.page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(config.ui.start_route, "/");
    assert!(!config.ui.mouse_enabled);
    assert!(!config.logging.enabled);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    config.api.base_url = "localhost:5000/api".to_string();
    assert!(config.validate().is_err());

    config = Config::default();
    config.ui.page_size = 0;
    assert!(config.validate().is_err());

    config = Config::default();
    config.api.timeout_secs = 0;
    assert!(config.validate().is_err());

    config = Config::default();
    config.ui.start_route = "/nowhere".to_string();
    assert!(config.validate().is_err());

    config = Config::default();
    config.logging.level = "loud".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_known_start_routes_validate() {
    for route in ["/", "/claims", "/claims/new", "/claims/7", "/analytics", "/login"] {
        let mut config = Config::default();
        config.ui.start_route = route.to_string();
        assert!(config.validate().is_ok(), "{route} should be accepted");
    }
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("[api]"));
    assert!(toml_str.contains(&format!("base_url = \"{DEFAULT_API_URL}\"")));
    assert!(toml_str.contains(&format!("page_size = {DEFAULT_PAGE_SIZE}")));
}

#[test]
fn test_partial_config_deserialization() {
    // Partial TOML configs merge with defaults
    let partial_toml = r#"
[api]
base_url = "https://claims.example.com/api"

[logging]
enabled = true
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    assert_eq!(config.api.base_url, "https://claims.example.com/api");
    assert!(config.logging.enabled);

    // Unspecified values keep their defaults
    assert_eq!(config.api.timeout_secs, Config::default().api.timeout_secs);
    assert_eq!(config.ui.page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(config.display.date_format, datetime::DATE_FORMAT);
    assert_eq!(config.display.currency_symbol, "$");
}

#[test]
fn test_empty_config_deserialization() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_from_file_rejects_invalid_values() {
    let dir = std::env::temp_dir().join("claimdesk_test_invalid_config");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "[ui]\npage_size = 1000\n").unwrap();

    assert!(Config::load_from_file(&path).is_err());
    assert!(Config::load(Some(&path)).is_err());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_generate_config_creates_directory() {
    use std::fs;

    let temp_dir = std::env::temp_dir().join("claimdesk_test_config");
    let config_path = temp_dir.join("nested").join("config.toml");

    if temp_dir.exists() {
        let _ = fs::remove_dir_all(&temp_dir);
    }
    assert!(!temp_dir.exists());

    // Generate config should create the directory structure
    let result = Config::generate_default_config(&config_path);
    assert!(result.is_ok());
    assert!(config_path.exists());

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("# claimdesk configuration file"));
    assert!(content.contains("CLAIMDESK_API_URL"));

    // The generated file loads back to the defaults
    let loaded = Config::load_from_file(&config_path).unwrap();
    assert_eq!(loaded, Config::default());

    let _ = fs::remove_dir_all(&temp_dir);
}
