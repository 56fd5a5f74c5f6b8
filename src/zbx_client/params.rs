use serde::Serialize;

/// Search criteria for `item.get`.
///
/// Every field is optional: empty id lists, `false` flags and `None` names are
/// left out of the request instead of being sent as defaults.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ItemGetParams {
    /// Only items with the given item ids.
    #[serde(rename = "itemids", skip_serializing_if = "Vec::is_empty")]
    pub item_ids: Vec<String>,
    /// Only items on hosts that belong to the given host groups.
    #[serde(rename = "groupids", skip_serializing_if = "Vec::is_empty")]
    pub group_ids: Vec<String>,
    #[serde(rename = "templateids", skip_serializing_if = "Vec::is_empty")]
    pub template_ids: Vec<String>,
    #[serde(rename = "hostids", skip_serializing_if = "Vec::is_empty")]
    pub host_ids: Vec<String>,
    /// Only items monitored by the given proxies.
    #[serde(rename = "proxyids", skip_serializing_if = "Vec::is_empty")]
    pub proxy_ids: Vec<String>,
    #[serde(rename = "interfaceids", skip_serializing_if = "Vec::is_empty")]
    pub interface_ids: Vec<String>,
    /// Only items used in the given graphs.
    #[serde(rename = "graphids", skip_serializing_if = "Vec::is_empty")]
    pub graph_ids: Vec<String>,
    /// Only items used in the given triggers.
    #[serde(rename = "triggerids", skip_serializing_if = "Vec::is_empty")]
    pub trigger_ids: Vec<String>,
    #[serde(rename = "applicationids", skip_serializing_if = "Vec::is_empty")]
    pub application_ids: Vec<String>,
    /// Include web items in the result.
    #[serde(rename = "webitems", skip_serializing_if = "is_false")]
    pub web_items: bool,
    /// Only items inherited from a template.
    #[serde(skip_serializing_if = "is_false")]
    pub inherited: bool,
    /// Only items that belong to templates.
    #[serde(skip_serializing_if = "is_false")]
    pub templated: bool,
    /// Only enabled items on monitored hosts.
    #[serde(skip_serializing_if = "is_false")]
    pub monitored: bool,
    /// Host group name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Technical host name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,
    /// Only items used in triggers.
    #[serde(skip_serializing_if = "is_false")]
    pub with_triggers: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::ItemGetParams;

    fn to_json(params: &ItemGetParams) -> serde_json::Value {
        match serde_json::to_value(params) {
            Ok(value) => value,
            Err(err) => panic!("failed to serialize params: {err}"),
        }
    }

    #[test]
    fn default_params_serialize_to_empty_object() {
        assert_eq!(to_json(&ItemGetParams::default()), json!({}));
    }

    #[test]
    fn set_fields_use_wire_names() {
        let params = ItemGetParams {
            host_ids: vec!["10084".to_string()],
            web_items: true,
            with_triggers: true,
            group: Some("Linux servers".to_string()),
            ..ItemGetParams::default()
        };
        assert_eq!(
            to_json(&params),
            json!({
                "hostids": ["10084"],
                "webitems": true,
                "with_triggers": true,
                "group": "Linux servers"
            })
        );
    }

    #[test]
    fn false_flags_are_not_sent() {
        let params = ItemGetParams {
            monitored: false,
            inherited: true,
            ..ItemGetParams::default()
        };
        let value = to_json(&params);
        assert!(value.get("monitored").is_none());
        assert_eq!(value["inherited"], json!(true));
    }
}
