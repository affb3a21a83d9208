mod config;
mod error;
mod logger;
mod operations;

use std::sync::Arc;

use clap::{Arg, ArgMatches, Command};
use dotenvy::dotenv;
use miner_blockchain::{EvmLedger, EvmStakeTransactor, initialize_provider};

use crate::{
    config::Config,
    error::NodeError,
    operations::{DepositOutcome, StakeDepositOperation},
};

#[tokio::main]
async fn main() {
    // Install rustls crypto provider before any TLS connections
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    dotenv().ok();

    let matches = cli().get_matches();

    if let Err(error) = run(&matches).await {
        report_failure(&error);
        std::process::exit(1);
    }
}

async fn run(matches: &ArgMatches) -> Result<(), NodeError> {
    let config_path = matches.get_one::<String>("config").map(String::as_str);
    let config = config::load_configuration(config_path)?;

    logger::initialize(&config.logger);
    display_miner_banner();

    match matches.subcommand() {
        Some(("deposit", _)) => deposit(&config).await,
        _ => unreachable!("clap enforces a subcommand"),
    }
}

async fn deposit(config: &Config) -> Result<(), NodeError> {
    let chain = &config.blockchain;

    let provider = initialize_provider(chain).await?;
    let ledger = Arc::new(EvmLedger::new(provider.clone()));
    let transactor = Arc::new(EvmStakeTransactor::resolve(
        provider,
        chain.stake_contract_address(),
    )?);

    let operation = StakeDepositOperation::new(
        ledger,
        transactor,
        chain.wallet_private_key(),
        chain.stake_contract_address(),
    );

    match operation.run().await? {
        DepositOutcome::Submitted { tx_hash } => {
            tracing::info!("Stake deposit submitted: {}", tx_hash);
        }
        DepositOutcome::SkippedInsufficientStake { token_balance } => {
            tracing::warn!(
                "No deposit submitted; token balance {} is below the staking minimum",
                token_balance
            );
        }
    }

    Ok(())
}

fn report_failure(error: &NodeError) {
    // The logger is not initialized yet when configuration loading fails.
    match error {
        NodeError::Config(_) => eprintln!("{error}"),
        // The pipeline already logged the failure with step context; only the
        // exit decision is recorded here.
        NodeError::Blockchain(_) => tracing::info!("Exiting after failed operation"),
    }
}

fn cli() -> Command {
    Command::new("rust-miner-node")
        .about("Mining client operations for the staking ledger")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file (.toml format)"),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("deposit").about("Deposit stake tokens so this account can mine"))
}

fn display_miner_banner() {
    tracing::info!("======================================================");
    tracing::info!("             Miner Node v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("======================================================");
}
