use reinsure_portal::config::{AppConfig, DEFAULT_COOKIE_MAX_AGE_SECS, Env};
use serial_test::serial;
use std::{env, panic};

// --- Setup/Teardown Utilities ---

/// Utility to run a test function and restore environment variables afterward
fn run_with_env<T, R>(test: T, cleanup_vars: Vec<&'static str>) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    // Save current environment variables
    let originals: Vec<(String, Option<String>)> = cleanup_vars
        .iter()
        .map(|&var| (var.to_string(), env::var(var).ok()))
        .collect();

    // Run the test
    let result = panic::catch_unwind(test);

    // Restore original environment variables
    for (key, original_value) in originals.into_iter().rev() {
        unsafe {
            if let Some(val) = original_value {
                env::set_var(&key, val);
            } else {
                env::remove_var(&key);
            }
        }
    }

    // Re-panic if the test failed
    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

// --- Tests ---

#[test]
#[serial]
fn test_defaults_without_environment() {
    run_with_env(
        || {
            unsafe {
                env::remove_var("APP_ENV");
                env::remove_var("BIND_ADDR");
                env::remove_var("SESSION_COOKIE_MAX_AGE");
            }
            let config = AppConfig::load();
            assert_eq!(config.env, Env::Local);
            assert_eq!(config.bind_addr, "0.0.0.0:3000");
            assert_eq!(config.cookie_max_age_secs, DEFAULT_COOKIE_MAX_AGE_SECS);
        },
        vec!["APP_ENV", "BIND_ADDR", "SESSION_COOKIE_MAX_AGE"],
    )
}

#[test]
#[serial]
fn test_production_environment_is_recognized() {
    run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "production");
            }
            let config = AppConfig::load();
            assert_eq!(config.env, Env::Production);
        },
        vec!["APP_ENV"],
    )
}

#[test]
#[serial]
fn test_cookie_max_age_override() {
    run_with_env(
        || {
            unsafe {
                env::set_var("SESSION_COOKIE_MAX_AGE", "3600");
            }
            let config = AppConfig::load();
            assert_eq!(config.cookie_max_age_secs, 3600);
        },
        vec!["SESSION_COOKIE_MAX_AGE"],
    )
}

#[test]
#[serial]
fn test_malformed_cookie_max_age_fails_fast() {
    run_with_env(
        || {
            // We expect this to panic because the max-age is not numeric.
            let result = panic::catch_unwind(|| {
                unsafe {
                    env::set_var("SESSION_COOKIE_MAX_AGE", "one-week");
                }
                AppConfig::load()
            });
            assert!(result.is_err());
        },
        vec!["SESSION_COOKIE_MAX_AGE"],
    )
}

#[test]
fn test_default_config_is_safe_for_tests() {
    let config = AppConfig::default();
    assert_eq!(config.env, Env::Local);
    assert_eq!(config.cookie_max_age_secs, DEFAULT_COOKIE_MAX_AGE_SECS);
}
