//! Environment helpers for configuration tests.
//!
//! Callers must run under `#[serial]`, the process environment is shared.

use crate::config::{EnvoyConfig, RowPolicy};

/// Sets `vars` for the duration of `f`, restoring previous values afterwards.
pub fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let originals: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
        .collect();

    for (key, value) in vars {
        std::env::set_var(key, value);
    }

    let result = f();
    restore(originals);
    result
}

/// Removes `keys` for the duration of `f`, restoring previous values afterwards.
pub fn without_env_vars<F, R>(keys: &[&str], f: F) -> R
where
    F: FnOnce() -> R,
{
    let originals: Vec<(String, Option<String>)> = keys
        .iter()
        .map(|&key| (key.to_string(), std::env::var(key).ok()))
        .collect();

    for key in keys {
        std::env::remove_var(key);
    }

    let result = f();
    restore(originals);
    result
}

fn restore(originals: Vec<(String, Option<String>)>) {
    for (key, original) in originals {
        match original {
            Some(val) => std::env::set_var(&key, val),
            None => std::env::remove_var(&key),
        }
    }
}

/// Config pointing at a mock server, with an explicit cache timeout.
pub fn test_envoy_config(url: &str, cache_timeout_sec: u64) -> EnvoyConfig {
    EnvoyConfig::new(url)
        .with_cache_timeout_sec(cache_timeout_sec)
        .with_system_stats_rows(RowPolicy::Strict)
}
