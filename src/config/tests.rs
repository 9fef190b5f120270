use crate::config::{
    AppConfig, ConfigOverrides, DEFAULT_CATALOG_URL, FileConfig, HttpConfig, PROJECT_CONFIG_DIR,
    PartialHttpConfig, load_project_config,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_project_config() {
    let temp_dir = TempDir::new().unwrap();
    let project_root = temp_dir.path();

    let config_dir = project_root.join(PROJECT_CONFIG_DIR);
    fs::create_dir_all(&config_dir).unwrap();

    let config_content = r#"
catalog_url = "http://localhost:8080/stac"

[http]
page_limit = 25
max_pages = 40
request_timeout_ms = 1500
"#;
    fs::write(config_dir.join("config.toml"), config_content).unwrap();

    let project_cfg = load_project_config(project_root).unwrap();
    assert_eq!(
        project_cfg.catalog_url,
        Some("http://localhost:8080/stac".to_string())
    );
    let http = project_cfg.http.unwrap();
    assert_eq!(http.page_limit, Some(25));
    assert_eq!(http.max_pages, Some(40));
    assert_eq!(http.request_timeout_ms, Some(1500));
    assert_eq!(http.connect_timeout_ms, None);
}

#[test]
fn test_load_project_config_not_exists() {
    let temp_dir = TempDir::new().unwrap();
    let project_cfg = load_project_config(temp_dir.path()).unwrap();
    assert_eq!(project_cfg, FileConfig::default());
}

#[test]
fn test_load_project_config_invalid_toml_falls_back() {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join(PROJECT_CONFIG_DIR);
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "catalog_url = [").unwrap();

    let project_cfg = load_project_config(temp_dir.path()).unwrap();
    assert_eq!(project_cfg, FileConfig::default());
}

#[test]
fn test_layered_defaults() {
    let cfg = AppConfig::layered(
        ConfigOverrides::default(),
        None,
        FileConfig::default(),
        FileConfig::default(),
    );
    assert_eq!(cfg.catalog_url, DEFAULT_CATALOG_URL);
    assert_eq!(cfg.http, HttpConfig::default());
}

#[test]
fn test_layered_precedence() {
    let project_cfg = FileConfig {
        catalog_url: Some("http://project".to_string()),
        http: Some(PartialHttpConfig {
            page_limit: Some(10),
            ..Default::default()
        }),
    };
    let file_cfg = FileConfig {
        catalog_url: Some("http://global".to_string()),
        http: Some(PartialHttpConfig {
            page_limit: Some(50),
            connect_timeout_ms: Some(42),
            max_pages: Some(7),
            ..Default::default()
        }),
    };

    let cfg = AppConfig::layered(
        ConfigOverrides::default(),
        None,
        project_cfg.clone(),
        file_cfg.clone(),
    );
    assert_eq!(cfg.catalog_url, "http://project");
    assert_eq!(cfg.http.page_limit, 10);
    assert_eq!(cfg.http.connect_timeout_ms, 42);
    assert_eq!(cfg.http.max_pages, 7);
    assert_eq!(
        cfg.http.request_timeout_ms,
        HttpConfig::default().request_timeout_ms
    );

    let cfg = AppConfig::layered(
        ConfigOverrides::default(),
        Some("http://env".to_string()),
        project_cfg.clone(),
        file_cfg.clone(),
    );
    assert_eq!(cfg.catalog_url, "http://env");

    let cfg = AppConfig::layered(
        ConfigOverrides {
            catalog_url: Some("http://cli".to_string()),
        },
        Some("http://env".to_string()),
        project_cfg,
        file_cfg,
    );
    assert_eq!(cfg.catalog_url, "http://cli");
}
