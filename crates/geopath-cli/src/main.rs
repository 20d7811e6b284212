mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use geopath_cli::args::default_store_path;
use geopath_cli::logging::{init_logging, LoggingConfig};
use geopath_cli::output::{OutputFormat, Renderer};
use geopath_lib::{JsonFilePathRepository, PathService, ServiceConfig, TracingAnalyticsSink};

use commands::find::FindArgs;
use commands::CommandContext;

#[derive(Parser, Debug)]
#[command(author, version, about = "Great-circle path finding with stored history")]
struct Cli {
    /// JSON file holding stored paths.
    #[arg(long, env = "GEOPATH_STORE", global = true)]
    store: Option<PathBuf>,

    /// Owner id used to store and look up paths.
    #[arg(long, env = "GEOPATH_OWNER", default_value = "local", global = true)]
    owner: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a path between two points and store it.
    Find(FindArgs),
    /// Run every query in a JSON file; failed items are reported inline.
    Batch {
        /// JSON array of queries (`start`, `end`, `algorithm`, `options`, `isPublic`).
        #[arg(long)]
        file: PathBuf,
    },
    /// List stored paths, newest first.
    History {
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 10)]
        page_size: usize,
    },
    /// Show a stored path.
    Get { id: String },
    /// Delete a stored path you own.
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(&LoggingConfig::from_env());
    let cli = Cli::parse();

    let store = match cli.store {
        Some(path) => path,
        None => default_store_path()?,
    };
    tracing::debug!(store = %store.display(), owner = %cli.owner, "starting");

    let service = PathService::new(
        Arc::new(JsonFilePathRepository::new(store)),
        Arc::new(TracingAnalyticsSink),
    )
    .with_config(ServiceConfig::from_env());

    let ctx = CommandContext {
        service,
        owner: cli.owner,
        renderer: Renderer::new(cli.format),
    };

    match cli.command {
        Command::Find(args) => commands::find::handle_find(&ctx, &args).await,
        Command::Batch { file } => commands::batch::handle_batch(&ctx, &file).await,
        Command::History { page, page_size } => {
            commands::history::handle_history(&ctx, page, page_size).await
        }
        Command::Get { id } => commands::record::handle_get(&ctx, &id).await,
        Command::Delete { id } => commands::record::handle_delete(&ctx, &id).await,
    }
}
