use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One row of an inventory table, e.g. under `extreme.ap`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub path: Vec<String>,
    pub key_columns: BTreeMap<String, Value>,
    pub inventory_columns: BTreeMap<String, Value>,
}

impl TableRow {
    pub fn new(path: &[&str]) -> Self {
        Self {
            path: path.iter().map(|p| p.to_string()).collect(),
            key_columns: BTreeMap::new(),
            inventory_columns: BTreeMap::new(),
        }
    }

    pub fn key(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.key_columns.insert(name.to_string(), value.into());
        self
    }

    pub fn column(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.inventory_columns.insert(name.to_string(), value.into());
        self
    }

    /// Dotted node path, e.g. `networking.lldp_infos`.
    pub fn node(&self) -> String {
        self.path.join(".")
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.key_columns
            .get(name)
            .or_else(|| self.inventory_columns.get(name))
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }
}
