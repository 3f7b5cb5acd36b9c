use super::CheckPlugin;
use crate::agent_based::{CheckOutput, CheckResult, Service, State};
use crate::sections::{names, RateLimits, Sections};
use serde_json::Value;

/// Remaining quota ratios below which the service alarms.
const CRIT_RATIO: f64 = 0.05;
const WARN_RATIO: f64 = 0.10;

pub struct RateLimitsCheck;

pub fn discover_rate_limits(limits: Option<&RateLimits>) -> Vec<Service> {
    limits.map(|_| vec![Service::new()]).unwrap_or_default()
}

pub fn check_rate_limits(limits: Option<&RateLimits>) -> CheckOutput {
    let Some(limits) = limits else {
        return CheckOutput::unknown("No API rate limit data available");
    };

    let mut out = CheckOutput::new();
    match limits.state_flag().as_str() {
        "UNLIMITED" => {
            out.push(CheckResult::summary(State::Ok, "API reports no rate limits"));
            return out;
        }
        "NO_RESPONSE" => {
            out.push(CheckResult::summary(State::Crit, "No HTTP response from XIQ API"));
            return out;
        }
        _ => {}
    }

    let limit = limits.limit.unwrap_or(0);
    let remaining = limits.remaining.unwrap_or(0);
    let reset = limits.reset_in_seconds.unwrap_or(0);
    let window = limits.window_s.unwrap_or(0);

    let state = if limit > 0 {
        let ratio = remaining as f64 / limit as f64;
        if ratio < CRIT_RATIO {
            State::Crit
        } else if ratio < WARN_RATIO {
            State::Warn
        } else {
            State::Ok
        }
    } else {
        State::Ok
    };

    out.push(CheckResult::summary(
        state,
        format!("Remaining {}/{}, window {}s", remaining, limit, window),
    ));

    let mut details = Vec::new();
    if let Some(code) = limits.status_code {
        details.push(format!("- HTTP status code: {}", code));
    }
    if reset > 0 {
        details.push(format!("- Reset in: {}s", reset));
    }
    if window > 0 {
        details.push(format!("- Rate-limit window: {}s", window));
    }
    if !details.is_empty() {
        out.push(
            CheckResult::notice(state, "Rate-limit details available").with_details(details.join("\n")),
        );
    }

    out.metric("xiq_api_remaining", remaining as f64);
    out.metric("xiq_api_limit", limit as f64);
    out
}

impl CheckPlugin for RateLimitsCheck {
    fn name(&self) -> &'static str {
        "xiq_rate_limits"
    }

    fn service_name(&self) -> &'static str {
        "XIQ API Rate Limits"
    }

    fn sections(&self) -> &'static [&'static str] {
        &[names::RATE_LIMITS]
    }

    fn discover(&self, sections: &Sections) -> Vec<Service> {
        discover_rate_limits(sections.rate_limits())
    }

    fn check(&self, _item: Option<&str>, _params: &Value, sections: &Sections) -> CheckOutput {
        check_rate_limits(sections.rate_limits())
    }
}
