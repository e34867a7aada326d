mod common;

use expense_core::config::{Config, ConfigManager};

#[test]
fn loading_without_a_file_yields_defaults() {
    let manager = ConfigManager::with_base_dir(common::test_base_dir()).unwrap();
    let config = manager.load().unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.currency, "USD");
    assert_eq!(config.recent_limit, 5);
}

#[test]
fn saved_configuration_round_trips() {
    let manager = ConfigManager::with_base_dir(common::test_base_dir()).unwrap();
    let mut config = Config::default();
    config.currency = "EUR".into();
    config.recent_limit = 8;
    manager.save(&config).unwrap();

    let reloaded = manager.load().unwrap();
    assert_eq!(reloaded, config);
    assert!(manager.path().exists());
}

#[test]
fn saving_twice_overwrites_cleanly() {
    let manager = ConfigManager::with_base_dir(common::test_base_dir()).unwrap();
    let mut config = Config::default();
    config.locale = "en-GB".into();
    manager.save(&config).unwrap();
    config.locale = "de-DE".into();
    manager.save(&config).unwrap();

    assert_eq!(manager.load().unwrap().locale, "de-DE");
}
