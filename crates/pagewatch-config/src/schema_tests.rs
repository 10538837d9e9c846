use super::*;

fn sample() -> Config {
    Config {
        settings: Settings::default(),
        pages: vec![
            PageConfig::new("Portal", "https://portal.example.com/"),
            PageConfig::new("Mail", "https://mail.example.com/"),
            PageConfig::new("Library", "https://library.example.com/"),
        ],
    }
}

#[test]
fn test_settings_default() {
    let settings = Settings::default();
    assert_eq!(settings.timeout_secs, 20);
    assert_eq!(settings.max_hops, 10);
    assert_eq!(settings.concurrency, 8);
    assert!(settings.user_agent.starts_with("pagewatch/"));
}

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(config.pages.is_empty());
    assert_eq!(config.settings.max_hops, 10);
}

#[test]
fn test_page_overrides() {
    let mut config = sample();
    config.pages[1].timeout_secs = Some(5);
    config.pages[1].max_hops = Some(3);

    assert_eq!(config.page_timeout(&config.pages[0]), 20);
    assert_eq!(config.page_max_hops(&config.pages[0]), 10);
    assert_eq!(config.page_timeout(&config.pages[1]), 5);
    assert_eq!(config.page_max_hops(&config.pages[1]), 3);
}

#[test]
fn test_select_keeps_order() {
    let mut config = sample();
    config
        .select(&["library".to_string(), "PORTAL".to_string()])
        .unwrap();

    let names: Vec<_> = config.pages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Portal", "Library"]);
}

#[test]
fn test_select_empty_keeps_all() {
    let mut config = sample();
    config.select(&[]).unwrap();
    assert_eq!(config.pages.len(), 3);
}

#[test]
fn test_select_unknown_page() {
    let mut config = sample();
    let err = config.select(&["Intranet".to_string()]).unwrap_err();
    assert!(err.to_string().contains("Intranet"));
    assert_eq!(config.pages.len(), 3);
}

#[test]
fn test_page_builder() {
    let page = PageConfig::new("Portal", "https://portal.example.com/")
        .with_success("Welcome")
        .with_maintenance("scheduled maintenance");
    assert_eq!(page.success, vec!["Welcome"]);
    assert_eq!(page.maintenance, vec!["scheduled maintenance"]);
}

#[test]
fn test_page_serialization_skips_unset_overrides() {
    let page = PageConfig::new("Portal", "https://portal.example.com/");
    let json = serde_json::to_string(&page).unwrap();
    assert!(!json.contains("timeout_secs"));
    assert!(!json.contains("max_hops"));
}

#[test]
fn test_config_deserialization() {
    let json = r#"{
        "settings": {"timeout_secs": 5},
        "pages": [{"name": "Portal", "url": "https://portal.example.com/", "success": ["Welcome"]}]
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.settings.timeout_secs, 5);
    assert_eq!(config.settings.max_hops, 10);
    assert_eq!(config.pages[0].success, vec!["Welcome"]);
    assert!(config.pages[0].maintenance.is_empty());
}
