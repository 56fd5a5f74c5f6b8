use std::future::Future;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ZbxError;

/// Something that can run a Zabbix JSON-RPC method and hand back its `result`.
///
/// [`ZbxClient`](super::ZbxClient) is the HTTP implementation; tests plug in
/// canned responses.
pub trait Transport {
    /// Invoke `method` with `params` and deserialize the `result` member.
    fn call<T>(
        &self,
        method: &str,
        params: Value,
    ) -> impl Future<Output = std::result::Result<T, ZbxError>> + Send
    where
        T: DeserializeOwned + Send;
}
