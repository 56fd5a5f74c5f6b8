use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, ItemField, RecordError};
use crate::types::ValueType;

/// An item as returned by `item.get`, with numeric fields decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub host_id: i64,
    pub item_id: i64,
    pub name: String,
    pub description: String,
    /// Time of the last value, in epoch seconds.
    pub last_clock: i64,
    pub last_value: String,
    pub last_value_type: i64,
}

impl Item {
    /// Typed view of `last_value_type`, `None` for codes this crate does not know.
    #[must_use]
    pub const fn value_type(&self) -> Option<ValueType> {
        ValueType::from_zabbix(self.last_value_type)
    }

    #[must_use]
    pub fn last_clock_local(&self) -> String {
        Local
            .timestamp_opt(self.last_clock, 0)
            .single()
            .map_or_else(
                || format!("(invalid timestamp: {})", self.last_clock),
                |d| d.format("%Y-%m-%d %H:%M:%S").to_string(),
            )
    }
}

/// Wire shape of an item. The API sends every scalar as a string; absent
/// members read as "".
#[derive(Debug, Default, Deserialize)]
pub struct RawItem {
    #[serde(default, rename = "hostid")]
    pub(crate) host_id: String,
    #[serde(default, rename = "itemid")]
    pub(crate) item_id: String,
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(default, rename = "lastclock")]
    pub(crate) last_clock: String,
    #[serde(default, rename = "lastvalue")]
    pub(crate) last_value: String,
    #[serde(default, rename = "value_type")]
    pub(crate) value_type: String,
}

impl TryFrom<RawItem> for Item {
    type Error = DecodeError;

    fn try_from(value: RawItem) -> std::result::Result<Self, DecodeError> {
        let host_id = parse_i64(ItemField::HostId, &value.host_id)?;
        let item_id = parse_i64(ItemField::ItemId, &value.item_id)?;
        let last_clock = parse_i64(ItemField::LastClock, &value.last_clock)?;
        let last_value_type = parse_i64(ItemField::LastValueType, &value.value_type)?;
        Ok(Self {
            host_id,
            item_id,
            name: value.name,
            description: value.description,
            last_clock,
            last_value: value.last_value,
            last_value_type,
        })
    }
}

/// Decode a whole `item.get` result, failing on the first bad record.
///
/// # Errors
///
/// Returns the index of the first record that does not decode, together with
/// the field error.
pub fn decode_items(raw: Vec<RawItem>) -> std::result::Result<Vec<Item>, RecordError> {
    raw.into_iter()
        .enumerate()
        .map(|(index, item)| Item::try_from(item).map_err(|source| RecordError { index, source }))
        .collect()
}

fn parse_i64(field: ItemField, raw: &str) -> std::result::Result<i64, DecodeError> {
    raw.parse::<i64>().map_err(|source| DecodeError {
        field,
        value: raw.to_string(),
        source,
    })
}
