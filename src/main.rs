use std::path::PathBuf;

use clap::{Parser, Subcommand};
use filmetl::{
    config::{self, Config, ExtractorConfig},
    db,
    export::OutputPaths,
    extractor::Extractor,
    logging::RunLogger,
    omdb, processor,
    store::MovieStore,
};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "filmetl")]
#[command(about = "Extract movie metadata into a local store")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch every configured title, export the batch and append it to the store
    Extract,
    /// Serve the dashboard JSON API
    Serve,
    /// Log the contents of the tabular export with coerced numbers
    Summary {
        /// Defaults to <OUTPUT_DIR>/movies.csv
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let logger = RunLogger::new(&config::log_file_from_env())?;
    let _guard = logger.enter();
    let runtime = logger.runtime()?;

    let result = runtime.block_on(run(args.command.unwrap_or(Command::Extract)));
    if let Err(err) = &result {
        error!(error = %err, "run failed");
    }
    result
}

async fn run(command: Command) -> anyhow::Result<()> {
    let config = Config::from_env()?;

    match command {
        Command::Extract => extract(&config).await,
        Command::Serve => serve(&config).await,
        Command::Summary { csv } => {
            let path = csv.unwrap_or_else(|| OutputPaths::in_dir(&config.output_dir).csv);
            processor::summarize_export(&path)?;
            Ok(())
        },
    }
}

async fn extract(config: &Config) -> anyhow::Result<()> {
    // Fails before any network activity when a required setting is missing.
    let extractor_config = ExtractorConfig::from_env()?;

    let http = reqwest::Client::builder()
        .user_agent("filmetl/0.1")
        .timeout(omdb::REQUEST_TIMEOUT)
        .build()?;

    let extractor =
        Extractor::new(extractor_config, OutputPaths::in_dir(&config.output_dir), http)?;
    let store = MovieStore::new(db::connect_and_migrate(&config.database_url).await?);

    processor::run(&extractor, &store).await?;
    Ok(())
}

async fn serve(config: &Config) -> anyhow::Result<()> {
    let addr = config.addr()?;
    let store = MovieStore::new(db::connect_and_migrate(&config.database_url).await?);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "listening");
    axum::serve(listener, filmetl::router(store)).await?;

    Ok(())
}
