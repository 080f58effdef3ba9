//! `bg3-mods` binary entry point.
use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use bg3_mods_cli::cli::{Cli, Command};
use bg3_mods_cli::commands;
use bg3_mods_cli::logging::{self, Logger};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    let command = args.resolved_command();

    if command == Command::Version {
        commands::version::run();
        return Ok(());
    }

    logging::init_subscriber(args.verbose, command.name());
    let log = Arc::new(Logger::new(command.name()));

    let result = match &command {
        Command::Install { path } => commands::install::run(&args.global, path, &log),
        Command::Remove { number } => commands::remove::run(&args.global, *number, &log),
        Command::List => commands::list::run(&args.global, &log),
        Command::Menu => commands::menu::run(&args.global, &log),
        Command::Version => Ok(()),
    };

    if result.is_err() {
        log.print_log_location();
    }
    result
}
