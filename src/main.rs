//! castmirror - CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use castmirror::cli::{Cli, Commands, ConfigCommands};
use castmirror::Config;

use commands::serve::ServeOverrides;

/// Install the tracing subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn config_file(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(PathBuf::from(path)),
        None => Config::config_path(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = config_file(&cli)?;
    let mut config = Config::load_from(&config_path)?;
    init_logging(&config.logging.level);

    match cli.command {
        Commands::Serve {
            bind,
            port,
            dir,
            frame_interval_ms,
        } => {
            let overrides = ServeOverrides {
                bind,
                port,
                dir,
                frame_interval_ms,
            };
            commands::serve::handle(config, overrides).await
        }
        Commands::Play { target, dir } => {
            commands::apply_dir_override(&mut config, dir);
            commands::play::handle(&target, &config).await
        }
        Commands::Meta { target, dir } => {
            commands::apply_dir_override(&mut config, dir);
            commands::meta::handle(&target, &config).await
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(&config),
            ConfigCommands::Path => commands::config::handle_path(&config_path),
        },
    }
}
