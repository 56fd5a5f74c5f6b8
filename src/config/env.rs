use std::time::Duration;

use humantime::parse_duration;

use crate::error::ConfigError;

pub(super) fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

pub(super) fn env_string<F>(lookup: &F, key: &'static str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Accepts `1/true/yes/y` and `0/false/no/n`, case-insensitive.
pub(super) fn env_bool<F>(
    lookup: &F,
    key: &'static str,
) -> std::result::Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    env_string(lookup, key).map_or(Ok(None), |value| {
        parse_bool(&value)
            .map(Some)
            .ok_or_else(|| ConfigError::InvalidField {
                field: key,
                message: format!("expected a boolean, got {value:?}"),
            })
    })
}

pub(super) fn env_duration<F>(
    lookup: &F,
    key: &'static str,
) -> std::result::Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    env_string(lookup, key).map_or(Ok(None), |value| {
        parse_duration(&value)
            .map(Some)
            .map_err(|err| ConfigError::InvalidField {
                field: key,
                message: err.to_string(),
            })
    })
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
