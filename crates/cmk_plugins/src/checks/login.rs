//! Login status services of both special agents.

use super::CheckPlugin;
use crate::agent_based::{CheckOutput, CheckResult, Service, State};
use crate::sections::{names, LoginStatus, Sections};
use serde_json::Value;

pub struct XiqLogin;
pub struct LoginCheck;

pub fn discover_login(status: Option<&LoginStatus>) -> Vec<Service> {
    status.map(|_| vec![Service::new()]).unwrap_or_default()
}

/// STATUS OK is a successful login; everything else is CRIT with the code.
pub fn check_login(status: Option<&LoginStatus>) -> CheckOutput {
    let Some(status) = status else {
        return CheckOutput::unknown("No data received from agent");
    };

    let mut out = CheckOutput::new();
    if status.is_ok() {
        let mut result = CheckResult::summary(
            State::Ok,
            format!("Login successful (HTTP {})", status.code_or("200")),
        );
        if let Some(response) = status.response.as_deref() {
            result = result.with_details(format!("Response (truncated): {}", response));
        }
        out.push(result);
    } else {
        let mut result = CheckResult::summary(
            State::Crit,
            format!("Login failed (Code: {})", status.code_or("?")),
        );
        if let Some(response) = status.response.as_deref() {
            result = result.with_details(format!("Response: {}", response));
        }
        out.push(result);
    }
    out
}

impl CheckPlugin for XiqLogin {
    fn name(&self) -> &'static str {
        "xiq_login"
    }

    fn service_name(&self) -> &'static str {
        "XIQ API Login"
    }

    fn sections(&self) -> &'static [&'static str] {
        &[names::XIQ_LOGIN]
    }

    fn discover(&self, sections: &Sections) -> Vec<Service> {
        discover_login(sections.login(names::XIQ_LOGIN))
    }

    fn check(&self, _item: Option<&str>, _params: &Value, sections: &Sections) -> CheckOutput {
        check_login(sections.login(names::XIQ_LOGIN))
    }
}

impl CheckPlugin for LoginCheck {
    fn name(&self) -> &'static str {
        "logincheck"
    }

    fn service_name(&self) -> &'static str {
        "HTTP Login Check"
    }

    fn sections(&self) -> &'static [&'static str] {
        &[names::LOGINCHECK]
    }

    fn discover(&self, sections: &Sections) -> Vec<Service> {
        discover_login(sections.login(names::LOGINCHECK))
    }

    fn check(&self, _item: Option<&str>, _params: &Value, sections: &Sections) -> CheckOutput {
        check_login(sections.login(names::LOGINCHECK))
    }
}
