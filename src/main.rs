//! Sui submitter CLI
//!
//! Enroll in a cohort or sweep a dev wallet, then print a single result line.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wba_sui::wallet::{load_keypair, TransactionSigner};
use wba_sui::{Config, JsonRpcClient, Network, Result, SubmissionRunner};

#[derive(Parser)]
#[command(name = "wba-sui")]
#[command(about = "Enroll on Sui or sweep a dev wallet's gas coin")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Call enrollment::enroll with a GitHub handle
    Enroll {
        /// Key file of the enrolling address
        #[arg(long)]
        key_file: Option<PathBuf>,

        /// Package publishing the enrollment module
        #[arg(long)]
        package_id: Option<String>,

        /// Shared cohort object id
        #[arg(long)]
        cohort: Option<String>,

        /// GitHub handle to record
        #[arg(long)]
        github: Option<String>,

        /// Network (mainnet, testnet, devnet, localnet)
        #[arg(short, long)]
        network: Option<Network>,
    },

    /// Send the whole gas coin to a recipient
    Transfer {
        /// Key file of the address being swept
        #[arg(long)]
        key_file: Option<PathBuf>,

        /// Recipient address
        #[arg(long)]
        recipient: Option<String>,

        /// Network (mainnet, testnet, devnet, localnet)
        #[arg(short, long)]
        network: Option<Network>,
    },

    /// Print the Sui address of a key file
    Address {
        #[arg(long)]
        key_file: PathBuf,
    },

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the result line
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_process_env()?;

    match cli.command {
        Commands::Enroll {
            key_file,
            package_id,
            cohort,
            github,
            network,
        } => {
            if let Some(network) = network {
                config.network = network;
            }
            let enroll = &mut config.enroll;
            enroll.key_file = key_file.or(enroll.key_file.take());
            enroll.package_id = package_id.or(enroll.package_id.take());
            enroll.cohort_object_id = cohort.or(enroll.cohort_object_id.take());
            enroll.github = github.or(enroll.github.take());

            let params = config.enroll_params()?;
            let client = JsonRpcClient::from_rpc_config(&config.rpc()?);
            tracing::info!(
                network = %config.network,
                rpc = %client.url(),
                cohort = %params.cohort_object_id,
                "Enrolling"
            );

            SubmissionRunner::new(&client, config.explorer()?)
                .with_gas(config.gas())
                .run_enroll(&params, &mut std::io::stdout())
                .await?;
        }
        Commands::Transfer {
            key_file,
            recipient,
            network,
        } => {
            if let Some(network) = network {
                config.network = network;
            }
            let transfer = &mut config.transfer;
            transfer.key_file = key_file.or(transfer.key_file.take());
            transfer.recipient = recipient.or(transfer.recipient.take());

            let params = config.transfer_params()?;
            let client = JsonRpcClient::from_rpc_config(&config.rpc()?);
            tracing::info!(
                network = %config.network,
                rpc = %client.url(),
                recipient = %params.recipient,
                "Sweeping gas coin"
            );

            SubmissionRunner::new(&client, config.explorer()?)
                .with_gas(config.gas())
                .run_transfer(&params, &mut std::io::stdout())
                .await?;
        }
        Commands::Address { key_file } => {
            let keypair = load_keypair(&key_file)?;
            println!("{}", keypair.address());
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
