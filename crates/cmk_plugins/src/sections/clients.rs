use super::join_cells;
use crate::agent_based::StringTable;
use crate::normalize::value_to_string;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Active clients of one AP, kept as loose JSON.
///
/// Expected shape:
/// `{"device_id": .., "hostname": .., "summary": {..}, "clients": [{..}, ..]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveClients {
    pub data: Map<String, Value>,
}

impl ActiveClients {
    pub fn device_id(&self) -> String {
        self.data.get("device_id").map(value_to_string).unwrap_or_default()
    }

    pub fn hostname(&self) -> String {
        self.data.get("hostname").map(value_to_string).unwrap_or_default()
    }

    pub fn clients(&self) -> &[Value] {
        self.data
            .get("clients")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Parse `xiq_active_clients`. A bare JSON list is wrapped into the object
/// form with a `summary.total` count.
pub fn parse_active_clients(table: &StringTable) -> Option<ActiveClients> {
    let raw = join_cells(table, " ");
    if raw.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(&raw).ok()? {
        Value::Object(data) => Some(ActiveClients { data }),
        Value::Array(list) => {
            let mut data = Map::new();
            data.insert(
                "summary".to_string(),
                json!({"total": list.len(), "band": {}, "per_ssid": {}}),
            );
            data.insert("clients".to_string(), Value::Array(list));
            Some(ActiveClients { data })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(cell: &str) -> StringTable {
        vec![vec![cell.to_string()]]
    }

    #[test]
    fn test_object_form() {
        let c = parse_active_clients(&one(
            r#"{"device_id": 91, "hostname": "AP-1", "clients": [{"mac": "x"}]}"#,
        ))
        .unwrap();
        assert_eq!(c.device_id(), "91");
        assert_eq!(c.hostname(), "AP-1");
        assert_eq!(c.clients().len(), 1);
    }

    #[test]
    fn test_list_form_is_wrapped() {
        let c = parse_active_clients(&one(r#"[{"mac": "a"}, {"mac": "b"}]"#)).unwrap();
        assert_eq!(c.data["summary"]["total"], 2);
        assert_eq!(c.clients().len(), 2);
        assert_eq!(c.device_id(), "");
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(parse_active_clients(&one("42")).is_none());
        assert!(parse_active_clients(&one("not json")).is_none());
        assert!(parse_active_clients(&Vec::new()).is_none());
    }
}
