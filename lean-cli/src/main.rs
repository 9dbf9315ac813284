use clap::Parser;
use env_logger::Env;
use log::{debug, error};

pub mod args;
pub mod commands;
pub mod error;

use args::Cli;
use error::CliError;

fn init_logger(verbose: bool) -> Result<(), CliError> {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).try_init()?;
    Ok(())
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logger(cli.verbose)?;
    debug!("Parsed arguments: {:?}", cli);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = commands::run(&cli, &mut out) {
        error!("{}", e);
        return Err(e);
    }

    Ok(())
}
