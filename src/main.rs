use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use wallet_risk_scorer::{
    chains::{ExplorerClient, FixtureSource, TransactionSource},
    config::Settings,
    models::{RiskBucket, ScoreSummary},
    scoring::WalletScorer,
    tables,
    utils::validate_address,
};

#[derive(Parser)]
#[clap(name = "wallet-risk-scorer")]
#[clap(about = "Score wallet addresses for counterparty risk from their on-chain history", long_about = None)]
struct Cli {
    /// Settings file (defaults to config/default and config/local)
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Read wallet histories from <dir>/<address>.json instead of the explorer API
    #[clap(long, global = true)]
    fixtures: Option<PathBuf>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single wallet
    Score {
        /// Wallet address
        #[clap(short, long)]
        address: String,

        /// Print the per-factor breakdown
        #[clap(short, long)]
        verbose: bool,
    },

    /// Score every wallet in a CSV file and write a scores table
    Batch {
        /// CSV with a wallet_id column
        #[clap(short, long)]
        input: Option<PathBuf>,

        /// Destination for the wallet_id,score table
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)
            .map_err(|e| anyhow::anyhow!("Failed to load settings from {}: {}", path.display(), e))?,
        None => Settings::new().map_err(|e| anyhow::anyhow!("Failed to load settings: {}", e))?,
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.app.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Validate settings
    if let Err(e) = settings.validate() {
        error!("Invalid settings: {}", e);
        return Err(anyhow::anyhow!(e));
    }

    let source = build_source(cli.fixtures, &settings)?;
    let scorer = WalletScorer::from_settings(source, &settings);

    match cli.command {
        Commands::Score { address, verbose } => {
            validate_address(&address)?;

            let outcome = scorer.score_wallet(&address).await;

            println!("\n=== Wallet Risk Score ===");
            println!("Wallet: {}", outcome.score.wallet_id);
            println!("\nFeatures:");
            println!("{}", serde_json::to_string_pretty(&outcome.features)?);

            if verbose {
                let breakdown = scorer.scorer().breakdown(&outcome.features);
                println!("\nBreakdown:");
                println!("  Baseline:            {:.2}", breakdown.baseline);
                println!("  Failed tx ratio:    +{:.2}", breakdown.failed_ratio);
                println!("  Inactivity:         +{:.2}", breakdown.inactivity);
                println!("  Low activity:       +{:.2}", breakdown.low_activity);
                println!("  No protocol usage:  +{:.2}", breakdown.no_protocol_usage);
                println!("  High gas:           +{:.2}", breakdown.high_gas);
                println!("  Transaction count:  -{:.2}", breakdown.transaction_count);
                println!("  Account age:        -{:.2}", breakdown.account_age);
                println!("  Protocol usage:     -{:.2}", breakdown.protocol_usage);
                println!("  Contract diversity: -{:.2}", breakdown.contract_diversity);
                println!("  Value volume:       -{:.2}", breakdown.value_volume);
                println!("  Raw total:           {:.2}", breakdown.raw_total());
            }

            println!("\nRisk Score: {}/1000 ({})", outcome.score.score, outcome.score.bucket());

            if outcome.fetch_failed {
                println!("\n⚠️  History could not be fetched; scored as a wallet with no transactions");
            }
        }

        Commands::Batch { input, output } => {
            let input = input.unwrap_or_else(|| settings.batch.input_path.clone());
            let output = output.unwrap_or_else(|| settings.batch.output_path.clone());

            let wallets = tables::read_wallets(&input)
                .map_err(|e| anyhow::anyhow!("Failed to read wallet list {}: {}", input.display(), e))?;

            for wallet in &wallets {
                if let Err(e) = validate_address(wallet) {
                    warn!("{}", e);
                }
            }

            let report = scorer.score_wallets(&wallets).await;
            tables::write_scores(&output, &report.scores)?;

            println!("\n✅ COMPLETED!");
            println!("Results saved to: {}", output.display());
            print_summary(&report.summary);

            if !report.fetch_failures.is_empty() {
                println!(
                    "\n⚠️  {} wallets could not be fetched and were scored as having no history",
                    report.fetch_failures.len()
                );
            }
        }
    }

    Ok(())
}

fn build_source(fixtures: Option<PathBuf>, settings: &Settings) -> anyhow::Result<Arc<dyn TransactionSource>> {
    match fixtures {
        Some(dir) => {
            info!("Reading wallet histories from {}", dir.display());
            Ok(Arc::new(FixtureSource::new(dir)))
        }
        None => Ok(Arc::new(ExplorerClient::new(&settings.explorer)?)),
    }
}

fn print_summary(summary: &ScoreSummary) {
    println!("Average risk score: {:.1}", summary.mean);
    if let (Some(min), Some(max)) = (summary.min, summary.max) {
        println!("Score range: {} - {}", min, max);
    }

    println!("\nRisk Distribution:");
    for bucket in [RiskBucket::High, RiskBucket::Medium, RiskBucket::Low] {
        println!(
            "{} ({}): {} wallets",
            bucket,
            bucket.range_label(),
            summary.bucket_count(bucket)
        );
    }
}
