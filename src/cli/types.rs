//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::category::CategoryArgs;
use super::commands::init::InitArgs;
use super::commands::serve::ServeArgs;

#[derive(Parser, Debug)]
#[command(name = "coursehub")]
#[command(about = "Coursehub - category catalogue with cached reads", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Read configuration from this file instead of coursehub.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize configuration and database
    Init(InitArgs),

    /// Run the HTTP API
    Serve(ServeArgs),

    /// Category management commands
    Category(CategoryArgs),
}
