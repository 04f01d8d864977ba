use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod bootstrap;
mod commands;
mod logging;
mod render;
mod shell;

use bootstrap::{Bootstrap, Options};

#[derive(Parser)]
#[command(name = "postpilot")]
#[command(about = "PostPilot - plan, generate and review social media posts", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for the local mirror (overrides config and POSTPILOT_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Keep all state in memory; nothing is written to the data directory
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Also write logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive dashboard shell (default)
    Shell,
    /// Print the resolved config, data and log locations
    Paths,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let options = Options {
        config_path: cli.config,
        data_dir: cli.data_dir,
        ephemeral: cli.ephemeral,
    };
    let bootstrap = Bootstrap::resolve(&options)?;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Paths => {
            bootstrap.print_paths();
            Ok(())
        }
        Commands::Shell => {
            let _guard = logging::init(
                &bootstrap.config.logging.level,
                &bootstrap.paths.logs_dir(),
                cli.verbose,
            )?;
            let app = bootstrap.build(&options).await?;
            shell::run(app).await
        }
    }
}
