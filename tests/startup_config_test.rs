//! Startup configuration from the environment. Serialized because the
//! process environment is shared across test threads.

use pluma::api::DEFAULT_BASE_URL;
use pluma::startup::StartupConfig;
use serial_test::serial;

#[test]
#[serial]
fn from_env_uses_default_without_override() {
    std::env::remove_var("PLUMA_API_URL");
    let config = StartupConfig::from_env();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
}

#[test]
#[serial]
fn from_env_honors_pluma_api_url() {
    std::env::set_var("PLUMA_API_URL", "https://blog.example.com");
    let config = StartupConfig::from_env();
    assert_eq!(config.base_url, "https://blog.example.com");
    std::env::remove_var("PLUMA_API_URL");
}

#[test]
#[serial]
fn from_env_ignores_blank_override() {
    std::env::set_var("PLUMA_API_URL", "   ");
    let config = StartupConfig::from_env();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    std::env::remove_var("PLUMA_API_URL");
}
