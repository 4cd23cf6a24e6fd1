mod compare;
mod telemetry;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "autolease-cli")]
#[command(about = "Fleet telemetry lookups and competitor listing comparison")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the last reported position of a tracked unit
    Locate {
        /// Provider unit id, as stored on the vehicle
        #[arg(long)]
        device_id: String,
        /// Print the status code and JSON body instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Resolve a hardware serial (IMEI) to the provider's unit id
    ResolveSerial {
        #[arg(long)]
        serial: String,
    },
    /// List every unit visible to the configured token
    Units,
    /// Scrape competitor listings and print them side by side
    Compare {
        /// Listing URLs (mashina.kg or lalafo)
        #[arg(required = true)]
        urls: Vec<String>,
        /// Print the comparison as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = autolease_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Some(Commands::Locate { device_id, json }) => {
            telemetry::run_locate(&config, &device_id, json).await?;
        }
        Some(Commands::ResolveSerial { serial }) => {
            telemetry::run_resolve_serial(&config, &serial).await?;
        }
        Some(Commands::Units) => telemetry::run_units(&config).await?,
        Some(Commands::Compare { urls, json }) => compare::run_compare(&config, &urls, json).await?,
        None => println!("autolease-cli: pass a subcommand, see --help"),
    }

    Ok(())
}
