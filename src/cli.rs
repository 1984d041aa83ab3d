// src/cli.rs
//! CLI definitions for pyoe
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pyoe")]
#[command(author = "pyoe Contributors")]
#[command(version)]
#[command(about = "Generate BitBake recipes for PyPI packages", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate recipes for a package or a requirements manifest
    Generate {
        /// The package to process
        #[arg(short, long)]
        package: Option<String>,

        /// The package version (default: latest)
        #[arg(short = 'v', long)]
        version: Option<String>,

        /// A pip requirements file to process instead of a single package
        #[arg(short, long)]
        requirements: Option<PathBuf>,

        /// Also generate packagegroup recipes for extras
        #[arg(short, long)]
        extras: bool,

        /// The recipe output directory
        #[arg(short, long, default_value = ".")]
        outdir: PathBuf,

        /// The python variant to generate recipes for
        #[arg(short = 'y', long, default_value = "python", value_parser = ["python", "python3"])]
        python: String,

        /// Write the updated license map upon completion
        #[arg(short, long)]
        licenses: bool,

        /// The license to use when a package license cannot be mapped
        #[arg(short, long)]
        default_license: Option<String>,

        /// License map file to load and extend (default: <outdir>/licenses.json)
        #[arg(long)]
        license_map: Option<PathBuf>,

        /// Fail on unmapped licenses instead of prompting
        #[arg(long)]
        non_interactive: bool,

        /// Package index endpoint
        #[arg(long, default_value = pyoe::DEFAULT_INDEX_URL)]
        index_url: String,

        /// Skip downloading sdists (recipes omit LIC_FILES_CHKSUM)
        #[arg(long)]
        skip_archives: bool,
    },

    /// Print the effective license map
    Licenses {
        /// License map overlay to include
        #[arg(long)]
        license_map: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
