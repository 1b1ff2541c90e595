use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ptctl_core::{Config, HostSelector, PassthruManager};
use std::sync::Arc;

mod client;
mod commands;

use client::ManagementClient;

#[derive(Parser)]
#[command(name = "ptctl")]
#[command(about = "PCI passthrough inventory and toggle for managed hosts", long_about = None)]
struct Cli {
    /// Management service endpoint (e.g. "http://vc.lab:50051")
    #[arg(long, global = true, env = "PTCTL_URL")]
    endpoint: Option<String>,

    /// Unix socket of a local management service
    #[arg(long, global = true)]
    socket: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// PCI device passthrough
    #[command(subcommand)]
    Pci(PciCommands),

    /// Check management service health
    Health,
}

#[derive(Subcommand)]
enum PciCommands {
    /// List PCI devices and their passthrough status
    Ls {
        /// Host names (defaults to the only host the service manages)
        hosts: Vec<String>,

        /// Target host, overrides HOST arguments
        #[arg(long, env = "PTCTL_HOST")]
        host: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Toggle passthrough on PCI devices
    Toggle {
        /// Device addresses (e.g. "0000:02:00.0")
        #[arg(required = true)]
        addresses: Vec<String>,

        /// Target host
        #[arg(long, env = "PTCTL_HOST")]
        host: Option<String>,
    },
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = Some(endpoint.clone());
        }
        if let Some(socket) = &self.socket {
            config.endpoint = None;
            config.socket_path = socket.clone();
        }
        match self.verbose {
            0 => {}
            1 => config.log_level = "info".to_string(),
            _ => config.log_level = "debug".to_string(),
        }
    }
}

fn manager(client: ManagementClient, host: Option<String>, config: &Config) -> PassthruManager {
    let selector = HostSelector::new(host.or_else(|| config.default_host.clone()));
    PassthruManager::new(Arc::new(client), selector)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().context("Failed to load configuration")?;
    cli.apply(&mut config);
    ptctl_core::init_observability(&config.log_level)?;

    let client = ManagementClient::connect(&config).await?;

    match cli.command {
        Commands::Pci(pci_cmd) => match pci_cmd {
            PciCommands::Ls { hosts, host, json } => {
                let manager = manager(client, host, &config);
                commands::pci::ls(&manager, &hosts, json).await?;
            }

            PciCommands::Toggle { addresses, host } => {
                let manager = manager(client, host, &config);
                commands::pci::toggle(&manager, &addresses).await?;
            }
        },

        Commands::Health => {
            let (status, version) = client.health().await?;
            println!("Status: {}", status);
            println!("Version: {}", version);
        }
    }

    Ok(())
}
