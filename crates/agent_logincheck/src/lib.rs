//! HTTP POST login special agent.
//!
//! Sends `{"username": .., "password": ..}` as JSON to the configured URL
//! and writes one `logincheck` section line. HTTP 200 counts as success;
//! every other outcome (another status, a transport error) is an error
//! line, never a non-zero exit.

use clap::Parser;
use cmk_plugins::sections::{format_login_line, names};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

/// Checkmk special agent: HTTP POST login check
#[derive(Parser, Debug, Clone)]
#[command(name = "agent_logincheck")]
#[command(about = "Try an HTTP POST login and print the result as Checkmk agent output", long_about = None)]
#[command(version)]
pub struct Args {
    /// Login endpoint URL
    #[arg(long)]
    pub url: String,

    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub password: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Do not verify the server certificate
    #[arg(long)]
    pub no_cert_check: bool,

    /// Log more (repeat for more detail); logs go to stderr
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Result of one login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginAttempt {
    pub ok: bool,
    /// HTTP status, 0 if no response arrived.
    pub code: u16,
    /// Response body, or the transport error text.
    pub response: String,
}

impl LoginAttempt {
    pub fn from_response(code: u16, body: String) -> Self {
        Self {
            ok: code == 200,
            code,
            response: body,
        }
    }

    pub fn transport_error(error: impl std::fmt::Display) -> Self {
        Self {
            ok: false,
            code: 0,
            response: error.to_string(),
        }
    }
}

pub fn attempt_login(args: &Args) -> LoginAttempt {
    let client = match reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(args.timeout.max(1)))
        .danger_accept_invalid_certs(args.no_cert_check)
        .build()
    {
        Ok(c) => c,
        Err(e) => return LoginAttempt::transport_error(e),
    };

    let body = json!({"username": args.username, "password": args.password});
    match client.post(&args.url).json(&body).send() {
        Ok(response) => {
            let code = response.status().as_u16();
            let text = response.text().unwrap_or_default();
            debug!(code, "login response");
            LoginAttempt::from_response(code, text)
        }
        Err(e) => {
            warn!(url = %args.url, error = %e, "login request failed");
            match e.status() {
                Some(status) => LoginAttempt::from_response(status.as_u16(), e.to_string()),
                None => LoginAttempt::transport_error(e),
            }
        }
    }
}

pub fn render(attempt: &LoginAttempt) -> String {
    format!(
        "<<<{}>>>\n{}\n",
        names::LOGINCHECK,
        format_login_line(attempt.ok, attempt.code, &attempt.response)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_200_is_success() {
        assert!(LoginAttempt::from_response(200, String::new()).ok);
        assert!(!LoginAttempt::from_response(201, String::new()).ok);
        assert!(!LoginAttempt::from_response(401, String::new()).ok);
    }

    #[test]
    fn test_render_shortens_response() {
        let attempt = LoginAttempt::from_response(200, format!("{{\"token\": \"{}\"}}\n", "x".repeat(500)));
        let out = render(&attempt);
        assert!(out.starts_with("<<<logincheck>>>\nSTATUS:OK CODE:200 RESPONSE:{\"token\""));
        assert_eq!(out.lines().count(), 2);
        assert!(out.len() < 300);
    }

    #[test]
    fn test_args_from_generated_command_line() {
        let params = cmk_plugins::rulesets::LoginCheckParams {
            url: "https://api.example.com/login".to_string(),
            username: "u".to_string(),
            password: "p".to_string(),
        };
        let mut argv = vec!["agent_logincheck".to_string()];
        argv.extend(params.command_arguments());
        let args = Args::try_parse_from(argv).unwrap();
        assert_eq!(args.url, "https://api.example.com/login");
        assert_eq!(args.timeout, 30);
    }
}
