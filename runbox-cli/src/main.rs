use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "runbox")]
#[command(about = "Run a Python script in a disposable Docker container", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an image for a script and run it to completion
    Run {
        /// Path to the Python script
        script: PathBuf,

        /// Base runtime image
        #[arg(long, default_value = runbox_core::DEFAULT_VERSION)]
        version: String,

        /// Host port to expose (repeatable; maps to the identical container port)
        #[arg(short, long = "port")]
        port: Vec<String>,

        /// Extra arguments appended to the launch command
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        arguments: String,

        /// Extra parameters appended after the arguments
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        params: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_level(true))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { script, version, port, arguments, params } => {
            // Validate ports up front; the daemon would reject them much later.
            for p in &port {
                if p.parse::<u16>().is_err() {
                    anyhow::bail!("Invalid port: {}", p);
                }
            }

            commands::run(&script, version, port, arguments, params).await?;
        }
    }

    Ok(())
}
