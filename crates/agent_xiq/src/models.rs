//! XIQ API payloads.
//!
//! XIQ sends `null` for many unset fields, so string fields go through
//! [`nullable`] instead of failing the whole device.

use cmk_plugins::normalize::value_to_string;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

fn nullable<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// One page of a paged XIQ listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default = "Vec::new", deserialize_with = "nullable")]
    pub data: Vec<T>,
}

/// LLDP/CDP neighbor entry of a device (`views=FULL`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LldpCdpInfo {
    #[serde(deserialize_with = "nullable")]
    pub port_name: String,
    #[serde(deserialize_with = "nullable")]
    pub system_name: String,
    #[serde(deserialize_with = "nullable")]
    pub management_ip: String,
    #[serde(deserialize_with = "nullable")]
    pub port_id: String,
    #[serde(deserialize_with = "nullable")]
    pub port_description: String,
    #[serde(deserialize_with = "nullable")]
    pub mac_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    pub id: i64,
    #[serde(deserialize_with = "nullable")]
    pub hostname: String,
    #[serde(deserialize_with = "nullable")]
    pub serial_number: String,
    #[serde(deserialize_with = "nullable")]
    pub mac_address: String,
    #[serde(deserialize_with = "nullable")]
    pub ip_address: String,
    #[serde(deserialize_with = "nullable")]
    pub product_type: String,
    #[serde(deserialize_with = "nullable")]
    pub software_version: String,
    /// Location path, either a list of `{name}` objects or plain text.
    pub locations: Value,
    #[serde(deserialize_with = "nullable")]
    pub device_function: String,
    #[serde(deserialize_with = "nullable")]
    pub managed_by: String,
    pub connected: Value,
    #[serde(deserialize_with = "nullable")]
    pub device_admin_state: String,
    /// Boot time or uptime, in whatever unit XIQ chose.
    pub system_up_time: Value,
    #[serde(deserialize_with = "nullable")]
    pub lldp_cdp_infos: Vec<LldpCdpInfo>,
}

impl Device {
    pub fn is_ap(&self) -> bool {
        self.device_function.to_uppercase().contains("AP")
    }

    pub fn is_connected(&self) -> bool {
        match &self.connected {
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_i64() == Some(1),
            Value::String(s) => cmk_plugins::normalize::norm_connected(s),
            _ => false,
        }
    }

    /// Location names joined with `/`.
    pub fn location_path(&self) -> String {
        match &self.locations {
            Value::Array(items) => items
                .iter()
                .map(|l| match l.get("name") {
                    Some(name) => value_to_string(name),
                    None => value_to_string(l),
                })
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("/"),
            other => value_to_string(other),
        }
    }

    /// Short neighbor summary like `SW-1 (1:5)`.
    pub fn lldp_short(&self) -> String {
        self.lldp_cdp_infos
            .iter()
            .filter(|n| !n.system_name.is_empty())
            .map(|n| {
                if n.port_id.is_empty() {
                    n.system_name.clone()
                } else {
                    format!("{} ({})", n.system_name, n.port_id)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Name used for the piggyback host.
    pub fn display_name(&self) -> String {
        if self.hostname.is_empty() {
            self.id.to_string()
        } else {
            self.hostname.clone()
        }
    }
}

/// `RateLimit-*` response headers of the last API call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// An HTTP response was received.
    pub responded: bool,
    pub status_code: Option<u16>,
    pub limit: Option<String>,
    pub remaining: Option<String>,
    pub reset: Option<String>,
    pub policy: Option<String>,
    /// All `RateLimit-*` headers as `name:value`.
    pub headers: Vec<String>,
}

impl RateLimitInfo {
    /// Window length from a `RateLimit-Policy` such as `7500;w=3600`.
    pub fn window_s(&self) -> Option<i64> {
        self.policy
            .as_deref()
            .or(self.limit.as_deref())?
            .split(';')
            .find_map(|part| part.trim().strip_prefix("w="))
            .and_then(|w| w.trim().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_device_with_nulls() {
        let d: Device = serde_json::from_value(json!({
            "id": 91,
            "hostname": "AP-1",
            "serial_number": null,
            "device_function": "AP",
            "connected": true,
            "locations": [{"id": 1, "name": "DE"}, {"id": 2, "name": "Berlin"}, {"name": "LOC7"}],
            "lldp_cdp_infos": [{"system_name": "SW-1", "port_id": "1:5", "port_name": "ETH0"}],
            "unknown_field": 1
        }))
        .unwrap();
        assert_eq!(d.serial_number, "");
        assert!(d.is_ap() && d.is_connected());
        assert_eq!(d.location_path(), "DE/Berlin/LOC7");
        assert_eq!(d.lldp_short(), "SW-1 (1:5)");
    }

    #[test]
    fn test_window_from_policy() {
        let info = RateLimitInfo {
            policy: Some("7500;w=3600".to_string()),
            ..Default::default()
        };
        assert_eq!(info.window_s(), Some(3600));
        assert_eq!(RateLimitInfo::default().window_s(), None);
    }
}
