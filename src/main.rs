// Catalog command-line entry point.
// `serve` runs the backend, `browse` the terminal UI, `add` creates one item.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{Context, bail};
use catalog::{
    app::App,
    client::CatalogClient,
    config::{AddArgs, BrowseArgs, ServeArgs},
    model::NewItem,
    server,
    store::paths,
};
use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "catalog=info,tower_http=info";

#[derive(Debug, Parser)]
#[command(name = "catalog")]
#[command(about = "Item catalog: JSON-file backed API and terminal browser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the HTTP backend
    Serve(ServeArgs),
    /// Browse items in the terminal
    Browse(BrowseArgs),
    /// Create one item through the API
    Add(AddArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let runtime = Runtime::new().context("failed to start tokio runtime")?;

    match cli.command {
        Commands::Serve(args) => {
            init_tracing(LogTarget::Stderr)?;
            let config = args.into_config();
            runtime
                .block_on(server::serve(&config, shutdown_signal()))
                .context("server error")?;
        }
        Commands::Browse(args) => {
            init_tracing(LogTarget::File)?;
            let config = args.into_config();
            let client =
                CatalogClient::new(&config.base_url).context("failed to build HTTP client")?;
            let mut app = App::new(client, &config, runtime.handle().clone());

            let mut terminal = ratatui::init();
            let result = app.run(&mut terminal);
            ratatui::restore();
            result.context("terminal error")?;
        }
        Commands::Add(args) => {
            init_tracing(LogTarget::Stderr)?;
            let new = NewItem::new(args.name, args.category, args.price)?;
            let client = CatalogClient::new(&args.url).context("failed to build HTTP client")?;
            let item = runtime
                .block_on(client.create_item(&new))
                .context("failed to create item")?;
            info!(id = item.id, name = %item.name, "item created");
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
    }

    Ok(())
}

enum LogTarget {
    Stderr,
    /// Keeps log lines off the terminal UI.
    File,
}

fn init_tracing(target: LogTarget) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    match target {
        LogTarget::Stderr => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogTarget::File => {
            let Some(path) = paths::log_path() else {
                bail!("no cache directory available for the log file");
            };
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install ctrl+c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install sigterm handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
