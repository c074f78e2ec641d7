//! paramlint CLI entry point.

use clap::Parser;
use paramlint::cli::{self, Cli, Commands, EXIT_ERROR};
use paramlint::logging;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.global.verbose, cli.global.log_format);

    let result = match &cli.command {
        Commands::Lint(args) => cli::run_lint(args),
        Commands::Monitor(args) => cli::run_monitor(args),
        Commands::Init(args) => cli::run_init(args),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
