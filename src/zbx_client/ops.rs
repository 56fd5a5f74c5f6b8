use crate::error::{FetchError, ZbxError};

use super::ZbxClient;
use super::models::{Item, RawItem, decode_items};
use super::params::ItemGetParams;
use super::transport::Transport;

pub const ITEM_GET: &str = "item.get";

/// Query `item.get` through `transport` and decode the returned items.
///
/// # Errors
///
/// [`FetchError::NotFound`] when the query matches nothing,
/// [`FetchError::Decode`] when a returned record has a non-numeric id, clock or
/// value type, and [`FetchError::Transport`] for anything the transport reports.
pub async fn fetch_items<T>(
    transport: &T,
    params: &ItemGetParams,
) -> std::result::Result<Vec<Item>, FetchError>
where
    T: Transport + Sync,
{
    let params = serde_json::to_value(params).map_err(|err| ZbxError::Json {
        message: format!("error encoding item.get params: {err}"),
    })?;
    let raw: Vec<RawItem> = transport.call(ITEM_GET, params).await?;
    if raw.is_empty() {
        return Err(FetchError::NotFound);
    }
    Ok(decode_items(raw)?)
}

impl ZbxClient {
    /// Items matching `params`; see [`fetch_items`].
    ///
    /// # Errors
    ///
    /// Same as [`fetch_items`].
    pub async fn items(
        &self,
        params: &ItemGetParams,
    ) -> std::result::Result<Vec<Item>, FetchError> {
        fetch_items(self, params).await
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use std::sync::Mutex;

    use serde::de::DeserializeOwned;
    use serde_json::{Value, json};

    use super::{ITEM_GET, fetch_items};
    use crate::error::{FetchError, ItemField, ZbxError};
    use crate::zbx_client::params::ItemGetParams;
    use crate::zbx_client::transport::Transport;

    enum Reply {
        Result(Value),
        ApiError(i64, &'static str),
    }

    struct StubTransport {
        reply: Reply,
        calls: Mutex<Vec<(String, Value)>>,
    }

    impl StubTransport {
        fn returning(result: Value) -> Self {
            Self {
                reply: Reply::Result(result),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(code: i64, message: &'static str) -> Self {
            Self {
                reply: Reply::ApiError(code, message),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(String, Value)> {
            self.calls.lock().expect("calls lock").clone()
        }
    }

    impl Transport for StubTransport {
        async fn call<T>(&self, method: &str, params: Value) -> Result<T, ZbxError>
        where
            T: DeserializeOwned + Send,
        {
            self.calls
                .lock()
                .expect("calls lock")
                .push((method.to_string(), params));
            match &self.reply {
                Reply::Result(value) => {
                    serde_json::from_value(value.clone()).map_err(|err| ZbxError::Json {
                        message: err.to_string(),
                    })
                }
                Reply::ApiError(code, message) => Err(ZbxError::Api {
                    code: *code,
                    message: (*message).to_string(),
                }),
            }
        }
    }

    fn item(itemid: &str, lastclock: &str) -> Value {
        json!({
            "hostid": "10084",
            "itemid": itemid,
            "name": "Free disk space on /",
            "lastclock": lastclock,
            "lastvalue": "12884901888",
            "value_type": "3"
        })
    }

    #[tokio::test]
    async fn empty_result_is_not_found() {
        let transport = StubTransport::returning(json!([]));
        let err = fetch_items(&transport, &ItemGetParams::default())
            .await
            .expect_err("empty result");
        assert!(matches!(err, FetchError::NotFound));
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn malformed_second_record_fails_whole_fetch() {
        let transport = StubTransport::returning(json!([
            item("23296", "1700000000"),
            item("23297", "yesterday"),
        ]));
        let err = fetch_items(&transport, &ItemGetParams::default())
            .await
            .expect_err("second record is malformed");
        match err {
            FetchError::Decode { index, source } => {
                assert_eq!(index, 1);
                assert_eq!(source.field, ItemField::LastClock);
                assert_eq!(source.value, "yesterday");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn returns_decoded_items_in_order() {
        let transport = StubTransport::returning(json!([
            item("23296", "1700000000"),
            item("23297", "1700000060"),
        ]));
        let items = fetch_items(&transport, &ItemGetParams::default())
            .await
            .expect("items");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].item_id, 23296);
        assert_eq!(items[1].last_clock, 1_700_000_060);
        assert_eq!(items[1].last_value, "12884901888");
    }

    #[tokio::test]
    async fn sends_only_set_filters_to_item_get() {
        let transport = StubTransport::returning(json!([item("23296", "1700000000")]));
        let params = ItemGetParams {
            host_ids: vec!["10084".to_string()],
            monitored: true,
            ..ItemGetParams::default()
        };
        fetch_items(&transport, &params).await.expect("items");

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        let (method, sent) = &calls[0];
        assert_eq!(method, ITEM_GET);
        assert_eq!(sent, &json!({"hostids": ["10084"], "monitored": true}));
    }

    #[tokio::test]
    async fn transport_errors_pass_through_once() {
        let transport = StubTransport::failing(-32602, "Invalid params.");
        let err = fetch_items(&transport, &ItemGetParams::default())
            .await
            .expect_err("api error");
        match err {
            FetchError::Transport(ZbxError::Api { code, message }) => {
                assert_eq!(code, -32602);
                assert_eq!(message, "Invalid params.");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(transport.calls().len(), 1);
    }
}
