use super::CheckPlugin;
use crate::agent_based::{CheckOutput, CheckResult, Service, State};
use crate::normalize::fmt_dhms;
use crate::rulesets::{parse_params, UptimeLevels, XIQ_AP_UPTIME_LEVELS};
use crate::sections::{names, ApStatus, Sections};
use serde_json::Value;

pub struct ApUptime;

pub fn discover_ap_uptime(status: Option<&ApStatus>) -> Vec<Service> {
    status.map(|_| vec![Service::new()]).unwrap_or_default()
}

/// State and text for an uptime against lower levels. Fresh reboots are
/// bad; an uptime of 0 means the AP did not report one.
pub fn eval_min_uptime(uptime: u64, warn_below: u64, crit_below: u64) -> (State, String) {
    if uptime == 0 {
        return (State::Unknown, "uptime data unavailable".to_string());
    }
    if uptime < crit_below {
        return (
            State::Crit,
            format!("uptime {} < crit {}", fmt_dhms(uptime), fmt_dhms(crit_below)),
        );
    }
    if uptime < warn_below {
        return (
            State::Warn,
            format!("uptime {} < warn {}", fmt_dhms(uptime), fmt_dhms(warn_below)),
        );
    }
    (State::Ok, format!("uptime {}", fmt_dhms(uptime)))
}

pub fn check_ap_uptime(params: &UptimeLevels, status: Option<&ApStatus>) -> CheckOutput {
    let Some(status) = status else {
        return CheckOutput::unknown("No uptime data available");
    };

    let uptime = status.uptime_seconds;
    let (state, text) = eval_min_uptime(uptime, params.min_uptime_warn, params.min_uptime_crit);

    let mut out = CheckOutput::new();
    out.push(CheckResult::summary(state, text));
    out.metric("xiq_uptime_seconds", uptime as f64);
    out
}

impl CheckPlugin for ApUptime {
    fn name(&self) -> &'static str {
        "xiq_ap_uptime"
    }

    fn service_name(&self) -> &'static str {
        "XIQ AP Uptime"
    }

    fn sections(&self) -> &'static [&'static str] {
        &[names::AP_STATUS]
    }

    fn ruleset(&self) -> Option<&'static str> {
        Some(XIQ_AP_UPTIME_LEVELS)
    }

    fn discover(&self, sections: &Sections) -> Vec<Service> {
        discover_ap_uptime(sections.ap_status())
    }

    fn check(&self, _item: Option<&str>, params: &Value, sections: &Sections) -> CheckOutput {
        let params: UptimeLevels = parse_params(XIQ_AP_UPTIME_LEVELS, params);
        check_ap_uptime(&params, sections.ap_status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(uptime: u64) -> ApStatus {
        ApStatus {
            ap_name: "AP-1".to_string(),
            uptime_seconds: uptime,
            ..Default::default()
        }
    }

    #[test]
    fn test_uptime_levels() {
        let p = UptimeLevels::default();
        assert_eq!(check_ap_uptime(&p, Some(&status(30 * 60))).state(), State::Crit);
        assert_eq!(check_ap_uptime(&p, Some(&status(2 * 3600))).state(), State::Warn);

        let out = check_ap_uptime(&p, Some(&status(2 * 86_400)));
        assert_eq!(out.state(), State::Ok);
        assert_eq!(out.summary_line(), "uptime 2d");
        assert_eq!(out.metric_value("xiq_uptime_seconds"), Some(172_800.0));
    }

    #[test]
    fn test_boundary_is_not_below() {
        let p = UptimeLevels::default();
        assert_eq!(check_ap_uptime(&p, Some(&status(6 * 3600))).state(), State::Ok);
        assert_eq!(check_ap_uptime(&p, Some(&status(3600))).state(), State::Warn);
    }

    #[test]
    fn test_zero_uptime_is_unknown() {
        let out = check_ap_uptime(&UptimeLevels::default(), Some(&status(0)));
        assert_eq!(out.state(), State::Unknown);
        assert_eq!(out.summary_line(), "uptime data unavailable(?)");
    }

    #[test]
    fn test_missing_section() {
        let out = check_ap_uptime(&UptimeLevels::default(), None);
        assert_eq!(out.results.len(), 1);
        assert_eq!(out.state(), State::Unknown);
        assert!(discover_ap_uptime(None).is_empty());
    }
}
