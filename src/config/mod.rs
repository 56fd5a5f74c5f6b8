use std::path::Path;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::Result;
use crate::error::Error as ItemsError;

mod defaults;
mod duration;
mod env;
mod raw;

use duration::HumantimeDuration;

/// Connection settings for the Zabbix API.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub token: SecretString,
    pub insecure_http: bool,
    pub http_connect_timeout: Duration,
    pub http_request_timeout: Duration,
}

impl Config {
    /// Load configuration from a file and the environment.
    ///
    /// The file is optional; `ZBX_URL` and `ZBX_TOKEN` alone are enough.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration file cannot be parsed, when
    /// environment overrides are invalid, or when the resulting values fail
    /// validation.
    pub fn from_env_and_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut raw = raw::load(path).map_err(ItemsError::from)?;
        raw.apply_env_overrides().map_err(ItemsError::from)?;
        raw.validate_and_build()
    }
}
