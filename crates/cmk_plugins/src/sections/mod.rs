//! Parse functions for every agent section.
//!
//! A parse function never fails: rows it cannot use are skipped, fields it
//! cannot coerce fall back to defaults, and a section without any usable
//! data parses to `None` (the host then treats it as absent).

pub mod ap;
pub mod clients;
pub mod devices;
pub mod login;
pub mod radios;
pub mod rate_limits;
pub mod summary;

pub use ap::{parse_ap_clients, parse_ap_status, parse_ap_status_at, ApStatus};
pub use clients::{parse_active_clients, ActiveClients};
pub use devices::{parse_device_inventory, parse_neighbors, DeviceRow, Neighbor};
pub use login::{format_login_line, parse_logincheck, parse_xiq_login, LoginStatus};
pub use radios::{parse_radio_information, Radio, RadioInformation, Wlan};
pub use rate_limits::{parse_rate_limits, RateLimits};
pub use summary::parse_summary;

use crate::agent_based::{HostSections, StringTable};
use crate::normalize::BandCounts;
use std::collections::BTreeMap;
use tracing::debug;

/// Agent section names.
pub mod names {
    pub const XIQ_LOGIN: &str = "extreme_cloud_iq_login";
    pub const LOGINCHECK: &str = "logincheck";
    pub const SUMMARY: &str = "extreme_summary";
    pub const AP_STATUS: &str = "extreme_ap_status";
    pub const AP_CLIENTS: &str = "extreme_ap_clients";
    pub const RATE_LIMITS: &str = "extreme_cloud_iq_rate_limits";
    pub const DEVICE_INVENTORY: &str = "extreme_device_inventory";
    pub const DEVICE_NEIGHBORS: &str = "extreme_device_neighbors";
    pub const AP_NEIGHBORS: &str = "extreme_ap_neighbors";
    pub const RADIO_INFORMATION: &str = "xiq_radio_information";
    pub const ACTIVE_CLIENTS: &str = "xiq_active_clients";

    pub const ALL: [&str; 11] = [
        XIQ_LOGIN,
        LOGINCHECK,
        SUMMARY,
        AP_STATUS,
        AP_CLIENTS,
        RATE_LIMITS,
        DEVICE_INVENTORY,
        DEVICE_NEIGHBORS,
        AP_NEIGHBORS,
        RADIO_INFORMATION,
        ACTIVE_CLIENTS,
    ];
}

/// A parsed section.
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Login(LoginStatus),
    Summary(BTreeMap<String, String>),
    ApStatus(ApStatus),
    ApClients(BandCounts),
    RateLimits(RateLimits),
    DeviceInventory(Vec<DeviceRow>),
    Neighbors(Vec<Neighbor>),
    RadioInformation(RadioInformation),
    ActiveClients(ActiveClients),
}

impl Section {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Login(_) => "login",
            Self::Summary(_) => "summary",
            Self::ApStatus(_) => "ap_status",
            Self::ApClients(_) => "ap_clients",
            Self::RateLimits(_) => "rate_limits",
            Self::DeviceInventory(_) => "device_inventory",
            Self::Neighbors(_) => "neighbors",
            Self::RadioInformation(_) => "radio_information",
            Self::ActiveClients(_) => "active_clients",
        }
    }

    pub fn as_login(&self) -> Option<&LoginStatus> {
        match self {
            Self::Login(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_summary(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Summary(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_ap_status(&self) -> Option<&ApStatus> {
        match self {
            Self::ApStatus(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_ap_clients(&self) -> Option<&BandCounts> {
        match self {
            Self::ApClients(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_rate_limits(&self) -> Option<&RateLimits> {
        match self {
            Self::RateLimits(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_device_inventory(&self) -> Option<&[DeviceRow]> {
        match self {
            Self::DeviceInventory(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_neighbors(&self) -> Option<&[Neighbor]> {
        match self {
            Self::Neighbors(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_radio_information(&self) -> Option<&RadioInformation> {
        match self {
            Self::RadioInformation(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_active_clients(&self) -> Option<&ActiveClients> {
        match self {
            Self::ActiveClients(s) => Some(s),
            _ => None,
        }
    }
}

/// Parse one raw section by name. Unknown names and sections without
/// usable data give `None`.
pub fn parse_section(name: &str, table: &StringTable) -> Option<Section> {
    let parsed = match name {
        names::XIQ_LOGIN => parse_xiq_login(table).map(Section::Login),
        names::LOGINCHECK => parse_logincheck(table).map(Section::Login),
        names::SUMMARY => parse_summary(table).map(Section::Summary),
        names::AP_STATUS => parse_ap_status(table).map(Section::ApStatus),
        names::AP_CLIENTS => parse_ap_clients(table).map(Section::ApClients),
        names::RATE_LIMITS => parse_rate_limits(table).map(Section::RateLimits),
        names::DEVICE_INVENTORY => parse_device_inventory(table).map(Section::DeviceInventory),
        names::DEVICE_NEIGHBORS | names::AP_NEIGHBORS => {
            parse_neighbors(table).map(Section::Neighbors)
        }
        names::RADIO_INFORMATION => parse_radio_information(table).map(Section::RadioInformation),
        names::ACTIVE_CLIENTS => parse_active_clients(table).map(Section::ActiveClients),
        _ => {
            debug!(section = name, "no parser registered");
            return None;
        }
    };
    if parsed.is_none() {
        debug!(section = name, rows = table.len(), "section has no usable data");
    }
    parsed
}

/// Parsed sections of one host, keyed by section name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sections {
    parsed: BTreeMap<String, Section>,
}

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every known section of a host. Sections without usable data
    /// are left out.
    pub fn from_host(host: &HostSections) -> Self {
        let mut sections = Self::new();
        for (name, table) in host.iter() {
            if let Some(section) = parse_section(name, table) {
                sections.insert(name, section);
            }
        }
        sections
    }

    pub fn insert(&mut self, name: impl Into<String>, section: Section) {
        self.parsed.insert(name.into(), section);
    }

    pub fn get(&self, name: &str) -> Option<&Section> {
        self.parsed.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parsed.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parsed.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.parsed.is_empty()
    }

    pub fn login(&self, name: &str) -> Option<&LoginStatus> {
        self.get(name).and_then(Section::as_login)
    }

    pub fn summary(&self) -> Option<&BTreeMap<String, String>> {
        self.get(names::SUMMARY).and_then(Section::as_summary)
    }

    pub fn ap_status(&self) -> Option<&ApStatus> {
        self.get(names::AP_STATUS).and_then(Section::as_ap_status)
    }

    pub fn ap_clients(&self) -> Option<&BandCounts> {
        self.get(names::AP_CLIENTS).and_then(Section::as_ap_clients)
    }

    pub fn rate_limits(&self) -> Option<&RateLimits> {
        self.get(names::RATE_LIMITS).and_then(Section::as_rate_limits)
    }

    pub fn device_inventory(&self) -> Option<&[DeviceRow]> {
        self.get(names::DEVICE_INVENTORY)
            .and_then(Section::as_device_inventory)
    }

    /// Neighbor rows from either `extreme_device_neighbors` or
    /// `extreme_ap_neighbors`.
    pub fn neighbors(&self, name: &str) -> Option<&[Neighbor]> {
        self.get(name).and_then(Section::as_neighbors)
    }

    pub fn radio_information(&self) -> Option<&RadioInformation> {
        self.get(names::RADIO_INFORMATION)
            .and_then(Section::as_radio_information)
    }

    pub fn active_clients(&self) -> Option<&ActiveClients> {
        self.get(names::ACTIVE_CLIENTS)
            .and_then(Section::as_active_clients)
    }
}

/// Join all cells of a JSON section into one document.
pub(crate) fn join_cells(table: &StringTable, sep: &str) -> String {
    table
        .iter()
        .flat_map(|row| row.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(sep)
        .trim()
        .to_string()
}
