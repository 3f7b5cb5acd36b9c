//! Render a [`Collection`] as Checkmk agent output.

use crate::collect::{Collection, LoginOutcome};
use crate::models::{Device, RateLimitInfo};
use cmk_plugins::normalize::{band_from_active_client, uptime_seconds, value_to_string, BandCounts};
use cmk_plugins::sections::{format_login_line, names};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};

const LOGIN_OK_RESPONSE: &str = "Login successful";

/// Make a value safe for a `sep(124)` cell.
fn cell(value: &str) -> String {
    value
        .replace('|', "/")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

fn row(cells: &[&str]) -> String {
    cells.iter().map(|c| cell(c)).collect::<Vec<_>>().join("|")
}

fn header(out: &mut String, name: &str, sep: Option<u32>) -> fmt::Result {
    match sep {
        Some(code) => writeln!(out, "<<<{}:sep({})>>>", name, code),
        None => writeln!(out, "<<<{}>>>", name),
    }
}

fn login_section(out: &mut String, login: &LoginOutcome) -> fmt::Result {
    header(out, names::XIQ_LOGIN, None)?;
    let line = match login {
        LoginOutcome::Ok { code } => format_login_line(true, *code, LOGIN_OK_RESPONSE),
        LoginOutcome::Failed { code, message } => format_login_line(false, *code, message),
    };
    writeln!(out, "{}", line)
}

fn rate_limit_section(out: &mut String, info: &RateLimitInfo) -> fmt::Result {
    header(out, names::RATE_LIMITS, None)?;
    if !info.responded {
        writeln!(out, "state NO_RESPONSE")?;
        return Ok(());
    }

    let limit = info.limit.as_deref().map(|l| l.split(';').next().unwrap_or("").trim());
    let state = if limit.map_or(true, str::is_empty) {
        "UNLIMITED"
    } else {
        "OK"
    };
    writeln!(out, "state {}", state)?;
    if let Some(limit) = limit.filter(|l| !l.is_empty()) {
        writeln!(out, "limit {}", limit)?;
    }
    if let Some(w) = info.window_s() {
        writeln!(out, "window_s {}", w)?;
    }
    if let Some(remaining) = info.remaining.as_deref() {
        writeln!(out, "remaining {}", remaining)?;
    }
    if let Some(reset) = info.reset.as_deref() {
        writeln!(out, "reset_in_seconds {}", reset)?;
    }
    if let Some(code) = info.status_code {
        writeln!(out, "status_code {}", code)?;
    }
    if !info.headers.is_empty() {
        writeln!(out, "headers_begin 1")?;
        for h in &info.headers {
            writeln!(out, "header {}", h.split_whitespace().collect::<String>())?;
        }
        writeln!(out, "headers_end 1")?;
    }
    Ok(())
}

fn client_bands(clients: &[Value]) -> BandCounts {
    let mut counts = BandCounts::default();
    for client in clients {
        counts.add(band_from_active_client(client), 1);
    }
    counts
}

fn summary_section(out: &mut String, c: &Collection) -> fmt::Result {
    let aps: Vec<&Device> = c.access_points().collect();
    let connected = aps.iter().filter(|d| d.is_connected()).count();
    let mut bands = BandCounts::default();
    for ap in &aps {
        let b = client_bands(c.clients_of(ap.id));
        for band in cmk_plugins::normalize::Band::ALL {
            bands.add(band, b.get(band));
        }
    }

    header(out, names::SUMMARY, None)?;
    writeln!(out, "access_points {}", aps.len())?;
    writeln!(out, "connected_aps {}", connected)?;
    writeln!(out, "disconnected_aps {}", aps.len() - connected)?;
    writeln!(out, "total_clients {}", bands.total())?;
    writeln!(out, "clients_24 {}", bands.ghz24)?;
    writeln!(out, "clients_5 {}", bands.ghz5)?;
    writeln!(out, "clients_6 {}", bands.ghz6)
}

fn inventory_section(out: &mut String, devices: &[Device]) -> fmt::Result {
    if devices.is_empty() {
        return Ok(());
    }
    header(out, names::DEVICE_INVENTORY, Some(124))?;
    for d in devices {
        let id = d.id.to_string();
        let location = d.location_path();
        let connected = d.is_connected().to_string();
        writeln!(
            out,
            "{}",
            row(&[
                &id,
                &d.hostname,
                &d.serial_number,
                &d.mac_address,
                &d.ip_address,
                &d.product_type,
                &d.software_version,
                &location,
                &d.device_function,
                &d.managed_by,
                &connected,
            ])
        )?;
    }
    Ok(())
}

fn neighbor_rows(out: &mut String, d: &Device) -> fmt::Result {
    let id = d.id.to_string();
    for n in &d.lldp_cdp_infos {
        writeln!(
            out,
            "{}",
            row(&[
                &id,
                &d.hostname,
                &d.ip_address,
                &n.port_name,
                &n.management_ip,
                &n.port_id,
                &n.port_description,
                &n.mac_address,
                &n.system_name,
            ])
        )?;
    }
    Ok(())
}

fn neighbors_section(out: &mut String, name: &str, devices: &[&Device]) -> fmt::Result {
    if devices.iter().all(|d| d.lldp_cdp_infos.is_empty()) {
        return Ok(());
    }
    header(out, name, Some(124))?;
    for d in devices {
        neighbor_rows(out, d)?;
    }
    Ok(())
}

fn uptime_cell(raw: &Value) -> String {
    match raw {
        Value::Null => String::new(),
        Value::Number(_) | Value::String(_) => value_to_string(raw),
        other => uptime_seconds(other).to_string(),
    }
}

fn ap_status_section(out: &mut String, d: &Device) -> fmt::Result {
    let state = if !d.device_admin_state.is_empty() {
        d.device_admin_state.clone()
    } else if d.is_connected() {
        "CONNECTED".to_string()
    } else {
        "DISCONNECTED".to_string()
    };
    let connected = if d.is_connected() { "1" } else { "0" };

    header(out, names::AP_STATUS, Some(124))?;
    writeln!(
        out,
        "{}",
        row(&[
            &d.hostname,
            &d.serial_number,
            &d.mac_address,
            &d.ip_address,
            &d.product_type,
            connected,
            &state,
            &d.software_version,
            &uptime_cell(&d.system_up_time),
            &d.location_path(),
            &d.lldp_short(),
        ])
    )
}

/// SSID -> band -> active client count.
fn ssid_freq(clients: &[Value]) -> Map<String, Value> {
    let mut per_ssid: BTreeMap<String, BandCounts> = BTreeMap::new();
    for client in clients {
        let ssid = client.get("ssid").map(value_to_string).unwrap_or_default();
        per_ssid
            .entry(ssid)
            .or_default()
            .add(band_from_active_client(client), 1);
    }
    per_ssid
        .into_iter()
        .map(|(ssid, counts)| {
            let mut bands = Map::new();
            for band in cmk_plugins::normalize::Band::ALL {
                if counts.get(band) > 0 {
                    bands.insert(band.label().to_string(), json!(counts.get(band)));
                }
            }
            (ssid, Value::Object(bands))
        })
        .collect()
}

fn radio_section(
    out: &mut String,
    d: &Device,
    radio: Option<&Value>,
    clients: &[Value],
) -> fmt::Result {
    let mut doc = match radio {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    };
    doc.insert("device_id".to_string(), json!(d.id));
    doc.insert("hostname".to_string(), json!(d.hostname));
    doc.entry("radios").or_insert_with(|| json!([]));
    doc.insert("_ssid_freq".to_string(), Value::Object(ssid_freq(clients)));

    header(out, names::RADIO_INFORMATION, Some(0))?;
    writeln!(out, "{}", Value::Object(doc))
}

const CLIENT_FIELDS: [&str; 16] = [
    "mac",
    "hostname",
    "ip",
    "ssid",
    "band",
    "bssid",
    "rssi",
    "snr",
    "channel",
    "ap_name",
    "ap_id",
    "os_type",
    "user_profile",
    "connected",
    "radio_type",
    "mac_protocol",
];

/// Keep only the client fields the inventory uses, renaming the XIQ
/// spellings where they differ.
fn client_record(client: &Value, d: &Device) -> Value {
    let pick = |keys: &[&str]| {
        keys.iter()
            .filter_map(|k| client.get(*k))
            .find(|v| !v.is_null())
            .cloned()
            .unwrap_or(Value::Null)
    };
    let mut record = Map::new();
    for field in CLIENT_FIELDS {
        let value = match field {
            "mac" => pick(&["mac", "mac_address"]),
            "ip" => pick(&["ip", "ip_address", "ipv4"]),
            "user_profile" => pick(&["user_profile", "user_profile_name"]),
            "band" => json!(band_from_active_client(client).label()),
            "ap_name" => json!(d.hostname),
            "ap_id" => json!(d.id),
            other => pick(&[other]),
        };
        record.insert(field.to_string(), value);
    }
    Value::Object(record)
}

fn clients_section(out: &mut String, d: &Device, clients: &[Value]) -> fmt::Result {
    let doc = json!({
        "device_id": d.id,
        "hostname": d.hostname,
        "clients": clients.iter().map(|c| client_record(c, d)).collect::<Vec<_>>(),
    });
    header(out, names::ACTIVE_CLIENTS, Some(0))?;
    writeln!(out, "{}", doc)
}

/// Sections that describe one AP.
fn ap_sections(out: &mut String, c: &Collection, d: &Device) -> fmt::Result {
    let clients = c.clients_of(d.id);
    let bands = client_bands(clients);

    ap_status_section(out, d)?;
    header(out, names::AP_CLIENTS, None)?;
    writeln!(out, "{} {} {}", bands.ghz24, bands.ghz5, bands.ghz6)?;
    neighbors_section(out, names::AP_NEIGHBORS, &[d])?;
    radio_section(out, d, c.radios.get(&d.id), clients)?;
    clients_section(out, d, clients)
}

/// Full agent output. APs named like `host` are written into the main
/// host's sections instead of a piggyback block.
pub fn render(c: &Collection, host: Option<&str>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    login_section(&mut out, &c.login)?;
    rate_limit_section(&mut out, &c.rate_limits)?;
    if !c.login.is_ok() {
        return Ok(out);
    }

    summary_section(&mut out, c)?;
    inventory_section(&mut out, &c.devices)?;
    let all: Vec<&Device> = c.devices.iter().collect();
    neighbors_section(&mut out, names::DEVICE_NEIGHBORS, &all)?;

    for d in c.access_points() {
        let is_self = host.is_some_and(|h| h.eq_ignore_ascii_case(&d.hostname));
        if is_self {
            ap_sections(&mut out, c, d)?;
            continue;
        }
        writeln!(out, "<<<<{}>>>>", cell(&d.display_name()))?;
        ap_sections(&mut out, c, d)?;
        writeln!(out, "<<<<>>>>")?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_sanitizes() {
        assert_eq!(cell(" a|b\nc "), "a/b c");
    }

    #[test]
    fn test_rate_limits_without_response() {
        let mut out = String::new();
        rate_limit_section(&mut out, &RateLimitInfo::default()).unwrap();
        assert_eq!(out, "<<<extreme_cloud_iq_rate_limits>>>\nstate NO_RESPONSE\n");
    }

    #[test]
    fn test_rate_limits_unlimited() {
        let mut out = String::new();
        let info = RateLimitInfo {
            responded: true,
            status_code: Some(200),
            ..Default::default()
        };
        rate_limit_section(&mut out, &info).unwrap();
        assert!(out.contains("state UNLIMITED\n"));
        assert!(out.contains("status_code 200\n"));
    }

    #[test]
    fn test_render_failed_login_writes_two_sections() {
        let c = Collection {
            login: LoginOutcome::Failed {
                code: 401,
                message: "bad credentials".to_string(),
            },
            rate_limits: RateLimitInfo::default(),
            devices: Vec::new(),
            radios: BTreeMap::new(),
            clients: BTreeMap::new(),
        };
        let out = render(&c, None).unwrap();
        assert!(out.starts_with("<<<extreme_cloud_iq_login>>>\nSTATUS:ERROR CODE:401"));
        assert!(out.ends_with("<<<extreme_cloud_iq_rate_limits>>>\nstate NO_RESPONSE\n"));
    }

    #[test]
    fn test_ssid_freq_counts_bands() {
        let clients = vec![
            json!({"ssid": "corp", "radio_type": 2}),
            json!({"ssid": "corp", "channel": 6}),
            json!({"ssid": "guest", "mac_protocol": "ax-6G"}),
        ];
        let freq = ssid_freq(&clients);
        assert_eq!(freq["corp"], json!({"2.4GHz": 1, "5GHz": 1}));
        assert_eq!(freq["guest"], json!({"6GHz": 1}));
    }
}
