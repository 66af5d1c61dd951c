//! Plugpack - plugin archive packager
//!
//! Command line entry point: parses arguments, installs logging and dispatches to the
//! command implementations in the library.

use clap::Parser;

use plugpack::cli::{Cli, Commands};
use plugpack::commands;

fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Package(args) => commands::package::run(cli.project_dir, cli.config, args),
        Commands::Select(args) => commands::select::run(cli.project_dir, cli.config, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
