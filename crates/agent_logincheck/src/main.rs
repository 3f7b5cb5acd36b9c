use agent_logincheck::{attempt_login, render, Args};
use anyhow::Result;
use clap::Parser;
use cmk_plugins::logging::{self, LogLevel};
use std::io::Write;

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(LogLevel::Warn.raised_by(args.verbose));

    let attempt = attempt_login(&args);
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(render(&attempt).as_bytes())?;
    stdout.flush()?;
    Ok(())
}
