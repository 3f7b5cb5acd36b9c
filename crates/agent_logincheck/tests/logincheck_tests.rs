//! The agent's line as read back by the `HTTP Login` check.

use agent_logincheck::{attempt_login, render, Args, LoginAttempt};
use clap::Parser;
use cmk_plugins::config::PluginConfig;
use cmk_plugins::{AgentOutput, Registry, State};
use std::net::TcpListener;

fn check_state(text: &str) -> State {
    let output = AgentOutput::parse(text);
    let reports = Registry::new().run(&output, "app", &PluginConfig::default());
    assert_eq!(reports[0].services.len(), 1);
    reports[0].services[0].state
}

#[test]
fn test_success_line_is_ok() {
    let text = render(&LoginAttempt::from_response(200, "{\"ok\": true}".to_string()));
    assert_eq!(check_state(&text), State::Ok);
}

#[test]
fn test_rejected_login_is_crit() {
    let text = render(&LoginAttempt::from_response(401, "Unauthorized".to_string()));
    assert!(text.contains("STATUS:ERROR CODE:401 RESPONSE:Unauthorized"));
    assert_eq!(check_state(&text), State::Crit);
}

#[test]
fn test_unreachable_endpoint_reports_code_zero() {
    // Bind then drop to get a local port nobody listens on.
    let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let args = Args::try_parse_from([
        "agent_logincheck",
        "--url",
        &format!("http://127.0.0.1:{}/login", port),
        "--username",
        "u",
        "--password",
        "p",
        "--timeout",
        "5",
    ])
    .unwrap();

    let attempt = attempt_login(&args);
    assert!(!attempt.ok);
    assert_eq!(attempt.code, 0);
    assert!(render(&attempt).contains("STATUS:ERROR CODE:0 RESPONSE:"));
}
