use crate::agent_based::StringTable;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// API quota as reported by the `RateLimit-*` response headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimits {
    /// `OK`, `UNLIMITED` or `NO_RESPONSE`.
    pub state: Option<String>,
    pub limit: Option<i64>,
    pub remaining: Option<i64>,
    pub reset_in_seconds: Option<i64>,
    pub window_s: Option<i64>,
    pub status_code: Option<i64>,
    /// Raw header lines between `headers_begin` and `headers_end`.
    pub headers: Vec<String>,
}

impl RateLimits {
    fn is_empty(&self) -> bool {
        *self == RateLimits::default()
    }

    /// Upper-cased state flag, `OK` if the agent sent none.
    pub fn state_flag(&self) -> String {
        self.state
            .as_deref()
            .map(str::to_uppercase)
            .unwrap_or_else(|| "OK".to_string())
    }
}

fn int_value(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
    })
}

/// Parse `extreme_cloud_iq_rate_limits`.
///
/// Rows are `key value` pairs; keys are matched case-insensitively and the
/// header names (`ratelimit-limit`, ...) are accepted as aliases. A limit of
/// the form `7500;w=3600` also sets the window.
pub fn parse_rate_limits(table: &StringTable) -> Option<RateLimits> {
    let mut res = RateLimits::default();
    let mut in_headers = false;

    for row in table {
        if row.len() != 2 {
            continue;
        }
        let key = row[0].trim().to_lowercase();
        let val = row[1].trim();

        match key.as_str() {
            "headers_begin" => in_headers = true,
            "headers_end" => in_headers = false,
            "header" if in_headers => {
                if !val.is_empty() {
                    res.headers.push(val.to_string());
                }
            }
            "state" => {
                res.state = Some(if val.is_empty() { "OK" } else { val }.to_string());
            }
            "limit" | "ratelimit-limit" => {
                let (main, policy) = match val.split_once(';') {
                    Some((main, policy)) => (main, Some(policy)),
                    None => (val, None),
                };
                if let Some(limit) = int_value(main) {
                    res.limit = Some(limit);
                }
                if let Some(w) = policy
                    .and_then(|p| p.trim().strip_prefix("w="))
                    .and_then(int_value)
                {
                    res.window_s = Some(w);
                }
            }
            "remaining" | "ratelimit-remaining" => {
                if let Some(v) = int_value(val) {
                    res.remaining = Some(v);
                }
            }
            "reset_in_seconds" | "ratelimit-reset" | "reset" => {
                if let Some(v) = int_value(val) {
                    res.reset_in_seconds = Some(v);
                }
            }
            "window_s" => {
                if let Ok(v) = val.parse::<i64>() {
                    res.window_s = Some(v);
                }
            }
            "status_code" => {
                if let Ok(v) = val.parse::<i64>() {
                    res.status_code = Some(v);
                }
            }
            other => debug!(key = other, "ignoring rate limit row"),
        }
    }

    if res.is_empty() {
        None
    } else {
        Some(res)
    }
}
