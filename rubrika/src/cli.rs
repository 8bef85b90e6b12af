//! Command-line interface definitions for the server binary.

use std::path::PathBuf;

use clap::Parser;


/// Server command-line arguments.
#[derive(Parser)]
#[command(
    name = "rubrika",
    author,
    about = "API server for named categories of timestamped messages.",
    version
)]
pub struct CLIArgs {
    /// This is the path to the configuration file to use.
    /// If unspecified, this defaults to `./data/configuration.toml`
    /// (and to pure defaults plus environment variables if that file doesn't exist).
    #[arg(
        short = 'c',
        long = "configurationFilePath",
        help = "Path to the configuration file to use. Defaults to ./data/configuration.toml"
    )]
    pub configuration_file_path: Option<PathBuf>,
}
