use std::time::{Duration, Instant};

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::Result;
use crate::error::{Error, ZbxError};

use super::rpc::{RpcEnvelope, RpcRequest, body_preview};
use super::transport::Transport;

const CORRELATION_HEADER: &str = "x-correlation-id";
const REQUEST_ID: u64 = 1;

/// JSON-RPC client for the Zabbix frontend API. One HTTP request per call.
#[derive(Clone)]
pub struct ZbxClient {
    http: reqwest::Client,
    base: Url,
    token: SecretString,
}

impl ZbxClient {
    /// Build a `ZbxClient` configured with the supplied parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTPS is required but the URL uses HTTP, or if the
    /// underlying HTTP client fails to build.
    pub fn new(
        base: Url,
        token: SecretString,
        timeout: Duration,
        connect_timeout: Duration,
        insecure_http: bool,
    ) -> Result<Self> {
        if base.scheme() != "https" && !insecure_http {
            return Err(Error::Config(crate::error::ConfigError::InvalidField {
                field: "zabbix.url",
                message: "only https URLs are accepted without --insecure".to_string(),
            }));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json-rpc"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            HeaderValue::from_static("application/json"),
        );

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .user_agent(concat!("zbx-items/", env!("CARGO_PKG_VERSION")));

        if !insecure_http {
            builder = builder.https_only(true);
        }

        let http = builder
            .build()
            .map_err(|err| ZbxError::Client { source: err })?;

        Ok(Self { http, base, token })
    }

    async fn send<T>(
        &self,
        method: &str,
        params: Value,
        correlation_id: &str,
    ) -> std::result::Result<T, ZbxError>
    where
        T: DeserializeOwned,
    {
        let payload = RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: REQUEST_ID,
            auth: self.token.expose_secret(),
        };
        let response = self
            .http
            .post(self.base.clone())
            .header(CORRELATION_HEADER, correlation_id)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ZbxError::HttpStatus { status });
        }

        let body = response.bytes().await?;
        let envelope: RpcEnvelope<T> =
            serde_json::from_slice(&body).map_err(|err| ZbxError::Json {
                message: format!(
                    "error decoding response body: {err}; body preview: {}",
                    body_preview(&body)
                ),
            })?;

        if let Some(err) = envelope.error {
            return Err(ZbxError::Api {
                code: err.code,
                message: err.into_message(),
            });
        }

        envelope
            .result
            .ok_or(ZbxError::MissingField { field: "result" })
    }
}

impl Transport for ZbxClient {
    async fn call<T>(&self, method: &str, params: Value) -> std::result::Result<T, ZbxError>
    where
        T: DeserializeOwned + Send,
    {
        let correlation_id = Uuid::now_v7().to_string();
        let started = Instant::now();
        match self.send(method, params, &correlation_id).await {
            Ok(result) => {
                debug!(
                    method,
                    %correlation_id,
                    latency_ms = started.elapsed().as_millis() as u64,
                    "zabbix call succeeded"
                );
                Ok(result)
            }
            Err(err) => {
                warn!(
                    method,
                    %correlation_id,
                    latency_ms = started.elapsed().as_millis() as u64,
                    error = %err,
                    "zabbix call failed"
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use secrecy::SecretString;
    use url::Url;

    use super::ZbxClient;
    use crate::error::{ConfigError, Error};

    fn url(raw: &str) -> Url {
        match Url::parse(raw) {
            Ok(url) => url,
            Err(err) => panic!("invalid test url {raw}: {err}"),
        }
    }

    #[test]
    fn plain_http_requires_insecure_flag() {
        let res = ZbxClient::new(
            url("http://zabbix.local/api_jsonrpc.php"),
            SecretString::from("token"),
            Duration::from_secs(1),
            Duration::from_secs(1),
            false,
        );
        assert!(matches!(
            res,
            Err(Error::Config(ConfigError::InvalidField {
                field: "zabbix.url",
                ..
            }))
        ));
    }

    #[test]
    fn https_url_builds_client() {
        let res = ZbxClient::new(
            url("https://zabbix.local/api_jsonrpc.php"),
            SecretString::from("token"),
            Duration::from_secs(1),
            Duration::from_secs(1),
            false,
        );
        assert!(res.is_ok());
    }
}
