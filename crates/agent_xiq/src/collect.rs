//! One agent run: login, then every listing the sections need.
//!
//! Only a failed login aborts the run. Later failures are logged and leave
//! the affected part of the [`Collection`] empty.

use crate::client::XiqApi;
use crate::models::{Device, RateLimitInfo};
use cmk_plugins::normalize::value_to_string;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Ok { code: u16 },
    Failed { code: u16, message: String },
}

impl LoginOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, LoginOutcome::Ok { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Collection {
    pub login: LoginOutcome,
    pub rate_limits: RateLimitInfo,
    pub devices: Vec<Device>,
    /// Raw radio record per device id.
    pub radios: BTreeMap<i64, Value>,
    /// Raw active client records per device id.
    pub clients: BTreeMap<i64, Vec<Value>>,
}

impl Collection {
    fn failed(code: u16, message: String, rate_limits: RateLimitInfo) -> Self {
        Self {
            login: LoginOutcome::Failed { code, message },
            rate_limits,
            devices: Vec::new(),
            radios: BTreeMap::new(),
            clients: BTreeMap::new(),
        }
    }

    pub fn access_points(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter().filter(|d| d.is_ap())
    }

    pub fn clients_of(&self, device_id: i64) -> &[Value] {
        self.clients.get(&device_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Device id a radio or client record belongs to.
fn owner_id(record: &Value) -> Option<i64> {
    ["device_id", "deviceId", "id"]
        .iter()
        .filter_map(|k| record.get(*k))
        .find_map(|v| value_to_string(v).trim().parse().ok())
}

pub fn collect(api: &mut dyn XiqApi) -> Collection {
    let code = match api.login() {
        Ok(code) => code,
        Err(e) => {
            warn!(error = %e, "XIQ login failed");
            return Collection::failed(e.status_code(), e.to_string(), api.rate_limits());
        }
    };

    let devices = api.devices().unwrap_or_else(|e| {
        warn!(error = %e, "failed to list devices");
        Vec::new()
    });
    let ap_ids: Vec<i64> = devices.iter().filter(|d| d.is_ap()).map(|d| d.id).collect();

    let mut radios = BTreeMap::new();
    let mut clients: BTreeMap<i64, Vec<Value>> = BTreeMap::new();
    if !ap_ids.is_empty() {
        match api.radio_information(&ap_ids) {
            Ok(list) => {
                for radio in list {
                    if let Some(id) = owner_id(&radio) {
                        radios.insert(id, radio);
                    }
                }
            }
            Err(e) => warn!(error = %e, "failed to fetch radio information"),
        }

        match api.active_clients(&ap_ids) {
            Ok(list) => {
                for client in list {
                    if let Some(id) = client.get("device_id").and_then(|v| value_to_string(v).trim().parse().ok()) {
                        clients.entry(id).or_default().push(client);
                    }
                }
            }
            Err(e) => warn!(error = %e, "failed to fetch active clients"),
        }
    }

    info!(
        devices = devices.len(),
        access_points = ap_ids.len(),
        clients = clients.values().map(Vec::len).sum::<usize>(),
        "XIQ collection complete"
    );

    Collection {
        login: LoginOutcome::Ok { code },
        rate_limits: api.rate_limits(),
        devices,
        radios,
        clients,
    }
}
