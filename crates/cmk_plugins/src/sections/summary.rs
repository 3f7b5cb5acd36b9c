use crate::agent_based::StringTable;
use std::collections::BTreeMap;

/// `key value` rows of `extreme_summary`. Later keys win.
pub fn parse_summary(table: &StringTable) -> Option<BTreeMap<String, String>> {
    if table.is_empty() {
        return None;
    }
    Some(
        table
            .iter()
            .filter(|row| row.len() >= 2)
            .map(|row| (row[0].clone(), row[1].clone()))
            .collect(),
    )
}
