use clap::Parser;
use deliberation_core::{artifact, DeliberationConfig};
use tracing_subscriber::{fmt, EnvFilter};

use deliberation_parser::{archive_processed, TrajectoryParser};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Prepare negotiation trajectories for Docent",
    long_about = None
)]
struct Args {
    #[arg(short, long, default_value = "deliberation.toml")]
    config: String,
}

fn main() -> anyhow::Result<()> {
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

    let parser = TrajectoryParser::from_config(&config.parser)?;
    let report = parser.process_all_trajectories()?;

    let output = config.parser.output_file();
    artifact::write_runs(&output, &report.runs)?;
    tracing::info!(path = %output.display(), runs = report.runs.len(), "Prepared data saved");

    if config.parser.archive {
        let archived = archive_processed(
            parser.data_dir(),
            &config.parser.processed_dir,
            &report.processed,
        )?;
        if !archived.moved.is_empty() {
            tracing::info!(
                moved = archived.moved.len(),
                destination = %archived.destination.display(),
                "Archived processed trajectories"
            );
        }
    }

    println!("=== Summary ===");
    println!("Files found:     {}", report.files_found);
    println!("Runs prepared:   {}", report.runs.len());
    println!("Failed files:    {}", report.failures.len());
    for failure in &report.failures {
        println!("  {}: {}", failure.path.display(), failure.error);
    }
    println!("Total messages:  {}", report.total_messages());
    println!(
        "Unique agents:   {} - {:?}",
        report.agents.len(),
        report.agents.iter().collect::<Vec<_>>()
    );
    println!("Output:          {}", output.display());

    Ok(())
}
