use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use ticketdash::{render::render_report, server};
use ticketdash_core::{export::export_report, process_upload, DashboardConfig};
use ticketdash_parser::{DateOrder, Delimiter};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Ticket export analytics: CLI report and upload API", long_about = None)]
struct Cli {
    /// TOML config file (falls back to TICKETDASH_CONFIG, then defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ingest one ticket export and print every dashboard view
    Analyze(AnalyzeArgs),
    /// Serve the upload API
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// CSV export to analyze
    file: PathBuf,
    /// Field delimiter, ',' or ';'
    #[arg(long)]
    delimiter: Option<String>,
    /// Read slash dates as MM/DD/YYYY instead of DD/MM/YYYY
    #[arg(long)]
    month_first: bool,
    /// Length of the tag and agent rankings
    #[arg(long)]
    top_k: Option<usize>,
    /// Print the report as JSON instead of tables
    #[arg(long)]
    json: bool,
    /// Also write Parquet views and report.json into this directory
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:3000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Analyze(args) => handle_analyze(args, config),
        Command::Serve(args) => handle_serve(args, config).await,
    }
}

fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    dotenvy::dotenv().ok();
    match path {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => DashboardConfig::from_env()
            .context("failed to load config from TICKETDASH_CONFIG"),
    }
}

fn handle_analyze(args: AnalyzeArgs, mut config: DashboardConfig) -> Result<()> {
    if let Some(delimiter) = args.delimiter.as_deref() {
        config.ingest.delimiter = Delimiter::try_from(delimiter).map_err(|err| anyhow!(err))?;
    }
    if args.month_first {
        config.ingest.date_order = DateOrder::MonthFirst;
    }
    if let Some(top_k) = args.top_k {
        config.aggregate.top_k = top_k;
    }
    config.validate()?;

    let payload = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let filename = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());

    let outcome = process_upload(&payload, &filename, &config);
    let Some(report) = outcome.report.as_ref() else {
        bail!("{}", outcome.message.text);
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", render_report(report));
        println!("{}", outcome.message.text);
    }

    if let Some(dir) = args.export_dir.as_deref() {
        let written = export_report(report, dir)
            .with_context(|| format!("failed to export report to {}", dir.display()))?;
        info!(files = written.len(), dir = %dir.display(), "report exported");
    }

    Ok(())
}

async fn handle_serve(args: ServeArgs, config: DashboardConfig) -> Result<()> {
    let router = server::router(config);
    let listener = TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
