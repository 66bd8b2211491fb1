use std::io::{self, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tfc_workspace_tools::commands::unlock::UnlockScope;
use tfc_workspace_tools::commands::{migrate, unlock};
use tfc_workspace_tools::config::TfcConfig;
use tfc_workspace_tools::tfc::TfcClient;

#[derive(Parser)]
#[command(name = "tfc-workspace-tools")]
#[command(about = "Terraform Cloud workspace state migration and bulk unlock")]
#[command(long_about = "Utilities for Terraform Cloud workspace administration: copy the \
                       current state of one workspace into another as a new state version, \
                       or force-unlock every locked workspace in a project. Credentials and \
                       scope come from TFC_* environment variables.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy the source workspace's current state into the target as a new state version
    Migrate {
        /// Workspace to read the current state from
        source: String,
        /// Workspace to push the state into
        target: String,
        /// Skip the interactive confirmation prompt
        #[arg(long, help = "Answer yes to the confirmation prompt")]
        auto: bool,
    },
    /// Force-unlock locked workspaces selected by TFC_PROJECT or TFC_WORKSPACES
    Unlock,
}

fn main() -> Result<()> {
    TfcConfig::load_env_file()?;
    init_tracing();

    let cli = Cli::parse();
    let config = TfcConfig::load()?;
    let client = TfcClient::new(&config)?;

    match cli.command {
        Commands::Migrate {
            source,
            target,
            auto,
        } => tokio::runtime::Runtime::new()?.block_on(async {
            let outcome = if auto {
                migrate::run(&client, &source, &target, |_, _| Ok(true)).await?
            } else {
                migrate::run(&client, &source, &target, prompt_confirmation).await?
            };
            tracing::debug!(?outcome, "migrate finished");
            Ok(())
        }),
        Commands::Unlock => {
            let scope = UnlockScope {
                project: config.project.clone(),
                workspaces: config.workspaces.clone(),
            };
            tokio::runtime::Runtime::new()?.block_on(async {
                unlock::run(&client, &scope).await?;
                Ok(())
            })
        }
    }
}

fn prompt_confirmation(source: &str, target: &str) -> io::Result<bool> {
    print!("Migrate state from {source} to {target}? (y/[n]) ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer.trim() == "y")
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}
