use clap::{Parser, Subcommand};
use std::{error::Error, path::PathBuf};
use tracing::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::DevConfig;

mod config;
mod serve;
mod stage;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML dev configuration, defaults reproduce the standard setup.
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the built application and proxy backend calls.
    Serve(serve::Command),
    /// Copy a built application into the backend's static directory.
    Stage(stage::Command),
}

fn get_rust_log(verbose: u8) -> String {
    let default = match verbose {
        0 => "lol_data=info",
        1 => "lol_data=debug",
        _ => "lol_data=trace",
    };

    let mut original = std::env::var("RUST_LOG").unwrap_or_else(|_| default.into());

    if !original.contains("tower_http=") {
        original.push_str(if verbose > 0 {
            ",tower_http=debug"
        } else {
            ",tower_http=info"
        });
    }

    if !original.contains("hyper=") {
        original.push_str(",hyper=info");
    }

    original
}

fn main() -> Result<(), Box<dyn Error>> {
    color_backtrace::install();

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(get_rust_log(cli.verbose)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DevConfig::load(cli.config.as_deref())?;

    info!("initialized, ready");

    match &cli.command {
        Some(Commands::Serve(cmd)) => Ok(serve::execute_command(&config, cmd)?),
        Some(Commands::Stage(cmd)) => Ok(stage::execute_command(&config, cmd)?),
        None => Ok(()),
    }
}
