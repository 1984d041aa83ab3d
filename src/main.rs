// src/main.rs

use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::io;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::GenerateOpts;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate {
            package,
            version,
            requirements,
            extras,
            outdir,
            python,
            licenses,
            default_license,
            license_map,
            non_interactive,
            index_url,
            skip_archives,
        }) => commands::cmd_generate(GenerateOpts {
            package,
            version,
            requirements,
            extras,
            outdir,
            python,
            licenses,
            default_license,
            license_map,
            non_interactive,
            index_url,
            skip_archives,
        }),
        Some(Commands::Licenses { license_map }) => {
            commands::cmd_licenses(license_map.as_deref())
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "pyoe", &mut io::stdout());
            Ok(())
        }
        None => {
            // No command provided, show help
            println!("pyoe v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'pyoe --help' for usage information");
            Ok(())
        }
    }
}
