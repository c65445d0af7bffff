use job_tracker::api::SortOrder;
use job_tracker::app::{Config, ConfigError, LogFormat, LogLevel};
use job_tracker::domain::Role;
use serial_test::serial;
use std::{env, fs, time::Duration};
use tempfile::TempDir;

// Helper function to clean all environment variables before and after tests
fn clean_all_env_vars() {
    let env_vars = [
        "JOB_TRACKER_API_URL",
        "JOB_TRACKER_TIMEOUT_SECS",
        "JOB_TRACKER_CONNECT_TIMEOUT_SECS",
        "JOB_TRACKER_PAGE_SIZE",
        "JOB_TRACKER_SORT_BY",
        "JOB_TRACKER_SORT_ORDER",
        "JOB_TRACKER_ROLE",
        "JOB_TRACKER_CONFIG",
        "LOG_LEVEL",
        "LOG_FORMAT",
    ];

    unsafe {
        for var in &env_vars {
            env::remove_var(var);
        }
    }
}

#[test]
#[serial]
fn test_config_from_args() {
    clean_all_env_vars();

    let config = Config::from_args([
        "job-tracker",
        "--api-url",
        "https://jobs.example.com/api",
        "--page-size",
        "25",
        "--sort-order",
        "asc",
        "--view",
        "admin",
        "--log-level",
        "debug",
        "--log-format",
        "json",
    ])
    .unwrap();

    assert_eq!(config.api_url, "https://jobs.example.com/api");
    assert_eq!(config.page_size, 25);
    assert_eq!(config.sort_order, SortOrder::Asc);
    assert_eq!(config.role, Role::Admin);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.timeout, Duration::from_secs(10));
}

#[test]
#[serial]
fn test_config_from_args_rejects_invalid_page_size() {
    clean_all_env_vars();

    let result = Config::from_args(["job-tracker", "--page-size", "500"]);
    assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
}

#[test]
#[serial]
fn test_config_from_env() {
    clean_all_env_vars();
    unsafe {
        env::set_var("JOB_TRACKER_API_URL", "http://tracker.internal:8080/api");
        env::set_var("JOB_TRACKER_TIMEOUT_SECS", "3");
        env::set_var("JOB_TRACKER_PAGE_SIZE", "20");
        env::set_var("JOB_TRACKER_ROLE", "Admin");
        env::set_var("LOG_LEVEL", "warn");
    }

    let config = Config::from_env().unwrap();
    assert_eq!(config.api_url, "http://tracker.internal:8080/api");
    assert_eq!(config.timeout, Duration::from_secs(3));
    assert_eq!(config.page_size, 20);
    assert_eq!(config.role, Role::Admin);
    assert_eq!(config.log_level, LogLevel::Warn);
    assert_eq!(config.sort_by, "createdAt");

    clean_all_env_vars();
}

#[test]
#[serial]
fn test_config_from_env_reports_bad_number() {
    clean_all_env_vars();
    unsafe {
        env::set_var("JOB_TRACKER_TIMEOUT_SECS", "soon");
    }

    let result = Config::from_env();
    match result {
        Err(ConfigError::EnvError(message)) => {
            assert!(message.contains("JOB_TRACKER_TIMEOUT_SECS"));
        }
        other => panic!("Expected EnvError, got {other:?}"),
    }

    clean_all_env_vars();
}

#[test]
#[serial]
fn test_env_feeds_cli_defaults() {
    clean_all_env_vars();
    unsafe {
        env::set_var("JOB_TRACKER_PAGE_SIZE", "15");
    }

    let config = Config::from_args(["job-tracker"]).unwrap();
    assert_eq!(config.page_size, 15);

    let config = Config::from_args(["job-tracker", "--page-size", "5"]).unwrap();
    assert_eq!(config.page_size, 5, "flags win over environment");

    clean_all_env_vars();
}

#[test]
#[serial]
fn test_config_from_file() {
    clean_all_env_vars();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("job-tracker.toml");
    fs::write(
        &path,
        r#"
api_url = "https://jobs.example.com/api"
timeout_secs = 30
page_size = 50
sort_by = "company"
sort_order = "asc"
role = "admin"
log_format = "json"
"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.api_url, "https://jobs.example.com/api");
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.connect_timeout, Duration::from_secs(5));
    assert_eq!(config.page_size, 50);
    assert_eq!(config.sort_by, "company");
    assert_eq!(config.role, Role::Admin);
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.log_format, LogFormat::Json);
}

#[test]
#[serial]
fn test_resolve_prefers_config_file() {
    clean_all_env_vars();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("job-tracker.toml");
    fs::write(&path, "page_size = 42\n").unwrap();

    let config = Config {
        config_file: Some(path.clone()),
        ..Config::default()
    }
    .resolve()
    .unwrap();

    assert_eq!(config.page_size, 42);
    assert_eq!(config.config_file, Some(path));
}

#[test]
#[serial]
fn test_config_from_file_errors() {
    clean_all_env_vars();
    let temp_dir = TempDir::new().unwrap();

    let missing = Config::from_file(temp_dir.path().join("missing.toml"));
    assert!(matches!(missing, Err(ConfigError::FileError(_))));

    let path = temp_dir.path().join("broken.toml");
    fs::write(&path, "page_size = \"many\"\n").unwrap();
    assert!(matches!(
        Config::from_file(&path),
        Err(ConfigError::ParseError(_))
    ));

    let path = temp_dir.path().join("invalid.toml");
    fs::write(&path, "api_url = \"ftp://example.com\"\n").unwrap();
    assert!(matches!(
        Config::from_file(&path),
        Err(ConfigError::InvalidUrl(_))
    ));
}
