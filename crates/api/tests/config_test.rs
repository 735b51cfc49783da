use pretty_assertions::assert_eq;

use agenda_api::config::ApiConfig;

// Environment mutation is process-global, so everything lives in one test
// function to keep it off the parallel test threads.
#[test]
fn config_from_env() {
    unsafe {
        std::env::remove_var("API_HOST");
        std::env::remove_var("API_PORT");
        std::env::remove_var("LOG_LEVEL");
        std::env::remove_var("API_CORS_ORIGINS");
        std::env::remove_var("API_REQUEST_TIMEOUT_SECONDS");
        std::env::remove_var("API_DEVELOPMENT");
        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("JWT_SECRET");
    }

    // Without the required variables the load must fail.
    assert!(ApiConfig::from_env().is_err());

    unsafe {
        std::env::set_var("DATABASE_URL", "postgres://localhost/agenda_test");
    }
    let err = ApiConfig::from_env().unwrap_err();
    assert!(err.to_string().contains("JWT_SECRET"));

    unsafe {
        std::env::set_var("JWT_SECRET", "test-secret");
    }
    let config = ApiConfig::from_env().expect("required variables are set");
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 3000);
    assert_eq!(config.request_timeout, 30);
    assert_eq!(config.cors_origins, None);
    assert!(!config.development);
    assert_eq!(config.server_addr(), "0.0.0.0:3000");

    unsafe {
        std::env::set_var("API_HOST", "127.0.0.1");
        std::env::set_var("API_PORT", "8080");
        std::env::set_var("API_CORS_ORIGINS", "http://a.test, http://b.test");
        std::env::set_var("API_REQUEST_TIMEOUT_SECONDS", "5");
        std::env::set_var("API_DEVELOPMENT", "true");
    }
    let config = ApiConfig::from_env().unwrap();
    assert_eq!(config.server_addr(), "127.0.0.1:8080");
    assert_eq!(config.request_timeout, 5);
    assert_eq!(
        config.cors_origins,
        Some(vec!["http://a.test".to_string(), "http://b.test".to_string()])
    );
    assert!(config.development);

    // Unparseable port is an error, not a silent default.
    unsafe {
        std::env::set_var("API_PORT", "not-a-port");
    }
    assert!(ApiConfig::from_env().is_err());
}
