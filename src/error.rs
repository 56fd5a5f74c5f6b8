use std::fmt;
use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Zabbix(#[from] ZbxError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
    #[error("failed to write output: {0}")]
    Output(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    #[error("missing required configuration field: {field}")]
    MissingField { field: &'static str },
    #[error("invalid configuration for {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
    #[error("configuration error: {0}")]
    Other(String),
}

/// Failures reported by the JSON-RPC transport.
#[derive(Debug, Error)]
pub enum ZbxError {
    #[error("failed to build HTTP client")]
    Client {
        #[source]
        source: reqwest::Error,
    },
    #[error("request failed: {source}")]
    Request {
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: reqwest::StatusCode },
    #[error("invalid JSON payload: {message}")]
    Json { message: String },
    #[error("Zabbix API error {code}: {message}")]
    Api { code: i64, message: String },
    #[error("missing field in API response: {field}")]
    MissingField { field: &'static str },
}

/// Numeric fields of an item that can fail to decode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ItemField {
    HostId,
    ItemId,
    LastClock,
    LastValueType,
}

impl ItemField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HostId => "hostID",
            Self::ItemId => "itemID",
            Self::LastClock => "lastClock",
            Self::LastValueType => "lastValueType",
        }
    }
}

impl fmt::Display for ItemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("invalid {field} {value:?}: {source}")]
pub struct DecodeError {
    pub field: ItemField,
    pub value: String,
    #[source]
    pub source: ParseIntError,
}

#[derive(Debug, Error)]
#[error("failed to decode item {index}")]
pub struct RecordError {
    pub index: usize,
    #[source]
    pub source: DecodeError,
}

/// Outcome of an `item.get` query that did not yield items.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] ZbxError),
    #[error("no results were found matching the given search parameters")]
    NotFound,
    #[error("failed to decode item {index} in response")]
    Decode {
        index: usize,
        #[source]
        source: DecodeError,
    },
}

impl From<RecordError> for FetchError {
    fn from(err: RecordError) -> Self {
        Self::Decode {
            index: err.index,
            source: err.source,
        }
    }
}

impl From<reqwest::Error> for ZbxError {
    fn from(source: reqwest::Error) -> Self {
        if source.is_status() {
            if let Some(status) = source.status() {
                return Self::HttpStatus { status };
            }
        }
        Self::Request { source }
    }
}

impl Error {
    /// True when the query ran fine but matched nothing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Fetch(FetchError::NotFound))
    }
}
