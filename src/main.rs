//! Coursehub CLI entry point.

use clap::Parser;

use coursehub::cli::{Cli, Commands};
use coursehub::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match coursehub::cli::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => coursehub::cli::handle_error(err, cli.json),
    };

    // Held for the lifetime of the process so buffered file logs are flushed.
    let _logger = match LoggerImpl::init(&LogConfig::from(&config.logging)) {
        Ok(logger) => logger,
        Err(err) => coursehub::cli::handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Init(args) => coursehub::cli::commands::init::execute(args, &config, cli.json).await,
        Commands::Serve(args) => coursehub::cli::commands::serve::execute(args, config).await,
        Commands::Category(args) => {
            coursehub::cli::commands::category::execute(args, &config, cli.json).await
        }
    };

    if let Err(err) = result {
        coursehub::cli::handle_error(err, cli.json);
    }
}
