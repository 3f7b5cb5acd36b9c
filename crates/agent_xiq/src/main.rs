use agent_xiq::{collect, render, Args, HttpXiqClient};
use anyhow::{Context, Result};
use clap::Parser;
use cmk_plugins::logging::{self, LogLevel};
use std::io::Write;

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(LogLevel::Warn.raised_by(args.verbose));

    let mut client =
        HttpXiqClient::new(args.client_options()).context("Failed to create XIQ client")?;
    let collection = collect(&mut client);
    let output =
        render(&collection, args.host.as_deref()).context("Failed to render agent output")?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
