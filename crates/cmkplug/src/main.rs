use anyhow::Result;
use clap::Parser;
use cmk_plugins::config::PluginConfig;
use cmk_plugins::logging;
use cmkplug::cli::{Cli, Commands};
use cmkplug::commands::{self, agent, gui, run};
use std::io::IsTerminal;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = PluginConfig::load(cli.config.as_deref())?;
    logging::init(config.log_level.raised_by(cli.verbose));
    let color = std::io::stdout().is_terminal();

    match cli.command {
        Commands::Sections { input } => {
            print!("{}", run::sections(&commands::read_input(&input)?));
        }
        Commands::Discover { input, host } => {
            print!("{}", run::discover(&commands::read_input(&input)?, &host, color));
        }
        Commands::Check {
            input,
            host,
            json,
            details,
        } => {
            let text = commands::read_input(&input)?;
            let (out, worst) = run::check(&text, &host, &config, json, details, color)?;
            println!("{}", out.trim_end());
            // Exit code follows the monitoring convention: 0 OK .. 3 UNKNOWN.
            return Ok(ExitCode::from(worst.code()));
        }
        Commands::Inventory { input, host, json } => {
            println!("{}", run::inventory(&commands::read_input(&input)?, &host, json)?.trim_end());
        }
        Commands::Metrics => print!("{}", agent::metrics()),
        Commands::Rules => print!("{}", agent::rules(&config)),
        Commands::AgentArgs { agent: kind, host } => {
            println!("{}", agent::agent_args(kind, &host, &config).join(" "));
        }
        Commands::Dashlet { settings, id } => {
            println!("{}", gui::dashlet(settings.as_deref(), id)?);
        }
        Commands::Snapin { omd_root } => {
            println!("{}", gui::snapin(omd_root.as_deref(), &config)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}
