use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use triage_webhook::{
    ApiServerBuilder, Config, Context, ContextExpiry, IntentTable, most_recent_context,
    most_recent_contexts, prune_stale_contexts,
};

/// Triage Webhook - fulfillment backend for the regulatory triage questionnaire
#[derive(Parser)]
#[command(name = "triage-webhook", version, about)]
struct Cli {
    /// Config file (defaults to ~/.config/triage-webhook/config.toml)
    #[arg(short, long, env = "TRIAGE_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides env and config file)
    #[arg(long)]
    port: Option<u16>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the webhook server (default)
    Serve,
    /// List the intents the loaded table answers
    Intents,
    /// Resolve and prune a JSON array of contexts offline
    Resolve {
        /// JSON file with `[{"name": ..., "lifespanCount": ...}]`; reads stdin if omitted
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,triage_webhook=info",
        1 => "info,triage_webhook=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    tracing::debug!(
        host = %config.host,
        port = config.port,
        intents_path = ?config.intents_path,
        rate_limit_rpm = ?config.rate_limit_rpm,
        "loaded configuration"
    );

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config).await,
        Command::Intents => list_intents(&config),
        Command::Resolve { file } => resolve(file.as_deref()),
    }
}

/// Load the configured intent table, or the embedded one
fn load_table(config: &Config) -> anyhow::Result<Arc<IntentTable>> {
    match &config.intents_path {
        Some(path) => Ok(Arc::new(IntentTable::load(path)?)),
        None => Ok(IntentTable::embedded()),
    }
}

/// Run the webhook server until interrupted
async fn serve(config: &Config) -> anyhow::Result<()> {
    let table = load_table(config)?;

    tracing::info!(
        addr = %config.bind_addr(),
        intents = table.len(),
        auth = config.webhook_token.is_some(),
        debug = config.debug,
        "starting triage webhook"
    );

    ApiServerBuilder::new(table, config.bind_addr())
        .config(config)
        .build()
        .run()
        .await?;

    Ok(())
}

/// Print every intent and whether clarification hints exist
fn list_intents(config: &Config) -> anyhow::Result<()> {
    let table = load_table(config)?;

    for name in table.intent_names() {
        println!("{name}");
    }

    let clarification = table.clarification();
    println!("---");
    println!(
        "clarification intent: {} ({} hints)",
        clarification.intent,
        clarification.hints.len()
    );

    Ok(())
}

/// Run the resolvers and pruner over a context list
fn resolve(file: Option<&Path>) -> anyhow::Result<()> {
    let json = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let contexts: Vec<Context> = serde_json::from_str(&json)?;

    match most_recent_context(&contexts) {
        Ok(name) => println!("current: {name}"),
        Err(e) => println!("current: none ({e})"),
    }

    let recent = most_recent_contexts(&contexts);
    let mut recent_sorted: Vec<&str> = recent.iter().copied().collect();
    recent_sorted.sort_unstable();
    println!("recent: {}", recent_sorted.join(", "));

    let mut expired: Vec<ContextExpiry> = Vec::new();
    prune_stale_contexts(&contexts, &recent, &mut expired);
    println!("expire: {}", serde_json::to_string(&expired)?);

    Ok(())
}
