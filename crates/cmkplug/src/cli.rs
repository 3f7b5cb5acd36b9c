//! CLI - Command-line argument parsing

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Checkmk plugin runner
#[derive(Parser, Debug)]
#[command(name = "cmkplug")]
#[command(about = "Run the XIQ and login check plugins against agent output", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Config file (overrides the site and user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log more (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the sections of an agent output, per host
    Sections {
        /// Agent output file, `-` for stdin
        input: PathBuf,
    },

    /// Show the services discovery would create
    Discover {
        input: PathBuf,

        /// Name used for the queried host
        #[arg(long, default_value = "localhost")]
        host: String,
    },

    /// Discover and check every service
    Check {
        input: PathBuf,

        #[arg(long, default_value = "localhost")]
        host: String,

        /// Print the full reports as JSON
        #[arg(long)]
        json: bool,

        /// Include long output and metrics
        #[arg(long)]
        details: bool,
    },

    /// Show inventory rows
    Inventory {
        input: PathBuf,

        #[arg(long, default_value = "localhost")]
        host: String,

        #[arg(long)]
        json: bool,
    },

    /// List metrics, graphs and perfometers
    Metrics,

    /// List rulesets with their effective parameters
    Rules,

    /// Print the command line of a special agent from the configured rule
    AgentArgs {
        #[arg(value_enum)]
        agent: AgentKind,

        /// Host the agent runs for
        #[arg(long, default_value = "localhost")]
        host: String,
    },

    /// Render the link dashlet as HTML
    Dashlet {
        /// Dashlet config as JSON (`{"title": .., "link_type": [..]}`)
        #[arg(long)]
        settings: Option<String>,

        #[arg(long, default_value_t = 1)]
        id: u32,
    },

    /// Render the ticket system snapin as HTML
    Snapin {
        /// Site root; defaults to the config or `$OMD_ROOT`
        #[arg(long)]
        omd_root: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentKind {
    Xiq,
    Logincheck,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["cmkplug", "check", "out.txt", "-vv", "--config", "c.toml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
        assert!(matches!(cli.command, Commands::Check { ref host, .. } if host == "localhost"));
    }

    #[test]
    fn test_agent_kind() {
        let cli = Cli::try_parse_from(["cmkplug", "agent-args", "logincheck"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::AgentArgs {
                agent: AgentKind::Logincheck,
                ..
            }
        ));
    }
}
