//! Command line of the XIQ special agent.

use crate::client::{ClientOptions, DEFAULT_BASE_URL};
use clap::Parser;
use std::time::Duration;

/// Checkmk special agent for ExtremeCloud IQ
#[derive(Parser, Debug, Clone)]
#[command(name = "agent_xiq")]
#[command(about = "Fetch devices, radios and clients from ExtremeCloud IQ as Checkmk agent output", long_about = None)]
#[command(version)]
pub struct Args {
    /// XIQ API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub url: String,

    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub password: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Name of the monitored host; an AP with this name is not piggybacked
    #[arg(long)]
    pub host: Option<String>,

    /// Do not verify the server certificate
    #[arg(long)]
    pub no_cert_check: bool,

    /// HTTP(S) proxy URL
    #[arg(long)]
    pub proxy: Option<String>,

    /// Log more (repeat for more detail); logs go to stderr
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            timeout: Duration::from_secs(self.timeout.max(1)),
            verify_tls: !self.no_cert_check,
            proxy: self.proxy.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generated_command_line() {
        let params = cmk_plugins::rulesets::XiqAgentParams {
            username: "u".to_string(),
            password: "p".to_string(),
            verify_tls: false,
            ..Default::default()
        };
        let mut argv = vec!["agent_xiq".to_string()];
        argv.extend(params.command_arguments("xiq-cloud"));

        let args = Args::try_parse_from(argv).unwrap();
        assert_eq!(args.host.as_deref(), Some("xiq-cloud"));
        let opts = args.client_options();
        assert!(!opts.verify_tls);
        assert_eq!(opts.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_credentials_required() {
        assert!(Args::try_parse_from(["agent_xiq", "--username", "u"]).is_err());
    }
}
