#![doc = include_str!("../README.md")]

pub mod cli;
pub mod color;
pub mod config;
pub mod debugger;
pub mod diag;
pub mod error;
mod facade;
pub mod global;
pub mod instance;
pub mod level;

pub use color::Color;
pub use config::{Parameter, Settings, DEFAULT_FILE};
pub use debugger::{Caller, Debugger};
pub use error::{LogError, Sink};
pub use global::{instance, instance_with, try_instance_with};
pub use instance::Logger;
pub use level::Level;

use clap::Parser;
use cli::Cli;
use diag::*;

pub fn run() -> Result<(), LogError> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Logs the command line's message through the process-wide logger it configures.
pub fn run_with_cli(cli: Cli) -> Result<(), LogError> {
    diag::init();
    info!("start");
    debug!("cli args: {:?}", cli);

    let param = cli.parameter();
    let logger = global::try_instance_with(&param).map_err(|err| {
        error!("failed to open {}: {}", param.filename.display(), err);
        err
    })?;
    debug!("logger ready: {:?}", logger);

    logger
        .try_log(cli.at, format_args!("{}\n", cli.message()))
        .map_err(|err| {
            warn!("write failed: {}", err);
            err
        })?;

    info!("{} end", env!("CARGO_PKG_NAME"));
    Ok(())
}
