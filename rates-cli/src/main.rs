//! Rates CLI
//!
//! Command-line front end for the exchange rate watcher:
//! - Load configuration from arguments, environment and `.env`
//! - Initialize tracing
//! - Fetch once, or run a rates manager until Ctrl-C

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rates_client::{DEFAULT_BASE_URL, FreeCurrencyApiClient};
use rates_manager::RatesManager;
use rates_types::{ManagerConfig, RateSnapshot, RatesUpdateListener, TimeUnit};

#[derive(Parser)]
#[command(name = "rates")]
#[command(author, version, about = "Exchange rates from freecurrencyapi.com", long_about = None)]
struct Cli {
    /// freecurrencyapi.com API key
    #[arg(long, env = "FREECURRENCYAPI_KEY", hide_env_values = true)]
    api_key: String,

    /// API host
    #[arg(long, env = "FREECURRENCYAPI_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Base currency (defaults to the API's, USD)
    #[arg(long, env = "RATES_BASE_CURRENCY")]
    base: Option<String>,

    /// Currencies to retrieve, comma-separated (defaults to all)
    #[arg(long, env = "RATES_CURRENCIES", value_delimiter = ',')]
    currencies: Vec<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the latest rates once and print them
    Latest,
    /// Keep fetching on an interval, printing one JSON line per update
    Watch {
        /// Interval between updates
        #[arg(long, default_value_t = 30)]
        every: u64,
        /// Unit of the interval (ms, seconds, minutes, hours, days)
        #[arg(long, default_value = "minutes")]
        unit: TimeUnit,
    },
}

impl Cli {
    fn manager_config(&self) -> Result<ManagerConfig> {
        let mut config = ManagerConfig::new().with_currencies(&self.currencies)?;
        if let Some(base) = &self.base {
            config = config.with_base_currency(base)?;
        }
        Ok(config)
    }

    fn client(&self) -> Result<FreeCurrencyApiClient> {
        Ok(FreeCurrencyApiClient::new(self.api_key.clone())?.with_base_url(&self.base_url))
    }
}

/// Prints each update to stdout as a single JSON line.
struct JsonLinePrinter;

impl RatesUpdateListener for JsonLinePrinter {
    fn on_update(&self, rates: &RateSnapshot) {
        match serde_json::to_string(rates) {
            Ok(line) => println!("{}", line),
            Err(e) => tracing::error!("Failed to serialize rates: {}", e),
        }
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,rates_manager=debug,rates_client=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = cli.manager_config()?;
    let client = cli.client()?;

    match cli.command {
        Commands::Latest => {
            let rates = client
                .latest(config.base_currency(), config.currencies())
                .await?;
            let snapshot = RateSnapshot::new(config.base_currency().cloned(), rates);
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }

        Commands::Watch { every, unit } => {
            let manager = RatesManager::new(client, config);
            manager.add_listener(Arc::new(JsonLinePrinter));

            let schedule_id = manager.start(every, unit)?;
            tracing::info!(%schedule_id, "Watching rates every {} {}", every, unit);

            tokio::signal::ctrl_c().await?;
            tracing::info!("Shutdown signal received, stopping rates manager...");
            manager.stop_and_wait().await?;
        }
    }

    Ok(())
}
