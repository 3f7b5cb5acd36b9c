//! HW/SW inventory plugins.

pub mod active_clients;
pub mod devices;
pub mod neighbors;
pub mod radios;

use crate::agent_based::TableRow;
use crate::sections::Sections;

pub trait InventoryPlugin: Send + Sync {
    fn name(&self) -> &'static str;

    fn sections(&self) -> &'static [&'static str];

    /// Inventory rows; empty when the sections are absent.
    fn inventory(&self, sections: &Sections) -> Vec<TableRow>;
}

pub fn all() -> Vec<Box<dyn InventoryPlugin>> {
    vec![
        Box::new(devices::Devices),
        Box::new(neighbors::Neighbors),
        Box::new(radios::ApRadios),
        Box::new(radios::ApBssids),
        Box::new(active_clients::ActiveClientsInventory),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_from_empty_sections() {
        for plugin in all() {
            assert!(plugin.inventory(&Sections::new()).is_empty(), "{}", plugin.name());
        }
    }
}
