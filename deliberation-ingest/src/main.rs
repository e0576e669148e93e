use clap::Parser;
use deliberation_core::DeliberationConfig;
use tracing_subscriber::{fmt, EnvFilter};

use deliberation_ingest::{DocentClient, DocentConfig, Ingestor};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Upload prepared negotiation runs to Docent",
    long_about = None
)]
struct Args {
    #[arg(short, long, default_value = "deliberation.toml")]
    config: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (DOCENT_API_KEY)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = match DeliberationConfig::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", args.config, e);
            std::process::exit(1);
        }
    };

    let client = match DocentClient::new(DocentConfig::new(None, &config.ingest)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let ingestor = Ingestor::new(Box::new(client), config.ingest.dashboard_url.as_str());
    let report = ingestor
        .ingest_to_collection(&config.ingest.artifact(), &config.ingest.collection_id)
        .await?;

    if report.success {
        println!(
            "✅ Successfully ingested {} negotiation sessions into Docent!",
            report.count
        );
        if let Some(url) = &report.dashboard_url {
            println!("🔍 View your data at: {}", url);
        }
    } else {
        println!(
            "❌ Ingestion failed: {}",
            report.error.as_deref().unwrap_or("unknown error")
        );
    }

    Ok(())
}
