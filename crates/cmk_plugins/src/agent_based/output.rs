//! Splitting raw agent output into sections.
//!
//! Format handled:
//! ```text
//! <<<extreme_summary>>>
//! access_points 12
//! <<<extreme_device_inventory:sep(124)>>>
//! 91|AP-1|SER|...
//! <<<<AP-1>>>>
//! <<<xiq_radio_information:sep(0)>>>
//! {"radios": []}
//! <<<<>>>>
//! ```
//! Sections between `<<<<host>>>>` and `<<<<>>>>` belong to the piggyback
//! host `host`. Repeated headers for the same section append rows.

use super::StringTable;
use std::collections::BTreeMap;
use tracing::debug;

/// Raw sections of one host, keyed by section name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostSections {
    sections: BTreeMap<String, StringTable>,
}

impl HostSections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, rows: StringTable) {
        self.sections.entry(name.into()).or_default().extend(rows);
    }

    pub fn get(&self, name: &str) -> Option<&StringTable> {
        self.sections.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StringTable)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Parsed agent output: the queried host plus any piggyback hosts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentOutput {
    pub host: HostSections,
    pub piggyback: BTreeMap<String, HostSections>,
}

/// How the cells of a section line are separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Separator {
    Whitespace,
    WholeLine,
    Char(char),
}

struct Header {
    name: String,
    separator: Separator,
}

impl AgentOutput {
    pub fn parse(text: &str) -> Self {
        let mut output = AgentOutput::default();
        let mut piggy_host: Option<String> = None;
        let mut current: Option<Header> = None;

        for line in text.lines() {
            let trimmed = line.trim_end_matches('\r');

            if let Some(host) = parse_piggyback_marker(trimmed) {
                piggy_host = if host.is_empty() { None } else { Some(host) };
                current = None;
                continue;
            }

            if let Some(header) = parse_section_header(trimmed) {
                debug!(section = %header.name, piggyback = ?piggy_host, "section header");
                // Register the section even if it turns out to be empty.
                output
                    .target(piggy_host.as_deref())
                    .insert(header.name.clone(), Vec::new());
                current = Some(header);
                continue;
            }

            let Some(header) = current.as_ref() else {
                continue;
            };
            if trimmed.trim().is_empty() {
                continue;
            }

            let row = split_line(trimmed, header.separator);
            output
                .target(piggy_host.as_deref())
                .insert(header.name.clone(), vec![row]);
        }

        output
    }

    fn target(&mut self, piggy_host: Option<&str>) -> &mut HostSections {
        match piggy_host {
            Some(host) => self.piggyback.entry(host.to_string()).or_default(),
            None => &mut self.host,
        }
    }

    /// Sections of `host`, or of the queried host when `host` is `None`.
    pub fn sections_for(&self, host: Option<&str>) -> Option<&HostSections> {
        match host {
            Some(h) => self.piggyback.get(h),
            None => Some(&self.host),
        }
    }
}

fn parse_piggyback_marker(line: &str) -> Option<String> {
    let inner = line.strip_prefix("<<<<")?.strip_suffix(">>>>")?;
    Some(inner.trim().to_string())
}

fn parse_section_header(line: &str) -> Option<Header> {
    let inner = line.strip_prefix("<<<")?.strip_suffix(">>>")?;
    if inner.starts_with('<') || inner.ends_with('>') {
        return None;
    }

    let mut parts = inner.split(':');
    let name = parts.next()?.trim().to_string();
    if name.is_empty() {
        return None;
    }

    let mut separator = Separator::Whitespace;
    for option in parts {
        if let Some(code) = option
            .trim()
            .strip_prefix("sep(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            separator = match code.trim().parse::<u32>() {
                Ok(0) => Separator::WholeLine,
                Ok(n) => char::from_u32(n)
                    .map(Separator::Char)
                    .unwrap_or(Separator::Whitespace),
                Err(_) => Separator::Whitespace,
            };
        }
    }

    Some(Header { name, separator })
}

fn split_line(line: &str, separator: Separator) -> Vec<String> {
    match separator {
        Separator::Whitespace => line.split_whitespace().map(str::to_string).collect(),
        Separator::WholeLine => vec![line.to_string()],
        Separator::Char(c) => line.split(c).map(str::to_string).collect(),
    }
}
