use std::{io::Write, path::PathBuf, sync::Arc};

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use client_core::{ClientError, DocumentsApi, DocumentsClient};
use shared::{
    domain::{Category, Importance},
    query::{FilterState, SortField, SortOrder},
};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

mod browse;
mod config;
mod render;

#[derive(Parser, Debug)]
#[command(name = "docview", version, about = "Browse document metadata served by the documents API")]
struct Cli {
    /// Base URL of the documents API, e.g. http://localhost:8000/api
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[arg(long, global = true, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one page of documents matching the given filters.
    List(ListArgs),
    /// Trigger a backend import and report how many documents were imported.
    Import,
    /// Interactive session (the default).
    Browse,
}

#[derive(Args, Debug)]
struct ListArgs {
    #[arg(long)]
    category: Option<Category>,
    #[arg(long)]
    active: Option<bool>,
    #[arg(long)]
    importance: Option<Importance>,
    #[arg(long, default_value = "created_at")]
    sort: SortField,
    #[arg(long, default_value = "desc")]
    order: SortOrder,
    /// Earliest creation date (YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Latest creation date (YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,
    /// Emit the raw documents as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

impl ListArgs {
    fn filters(&self) -> FilterState {
        FilterState {
            category: self.category,
            active: self.active,
            importance: self.importance,
            sort_field: self.sort,
            sort_order: self.order,
            created_from: self.from,
            created_to: self.to,
        }
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn request_failed(action: &str, err: ClientError) -> anyhow::Error {
    match err.detail() {
        Some(detail) => anyhow!("{action} failed: {err} ({detail})"),
        None => anyhow!("{action} failed: {err}"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = config::load_settings(&cli.config)?;
    init_tracing(&settings.log_filter);

    let api_url = cli.api_url.as_deref().unwrap_or(&settings.api_base_url);
    let client = DocumentsClient::new(api_url).context("failed to configure documents client")?;
    tracing::debug!(base_url = %client.base_url(), "documents client ready");

    match cli.command.unwrap_or(Command::Browse) {
        Command::List(args) => {
            let documents = client
                .list_documents(&args.filters().query_params())
                .await
                .map_err(|err| request_failed("listing documents", err))?;
            let mut stdout = std::io::stdout().lock();
            if args.json {
                serde_json::to_writer_pretty(&mut stdout, &documents)?;
                writeln!(stdout)?;
            } else {
                write!(stdout, "{}", render::render_documents(&documents))?;
            }
        }
        Command::Import => {
            let summary = client
                .import_documents()
                .await
                .map_err(|err| request_failed("import", err))?;
            println!("Imported {} documents", summary.imported);
        }
        Command::Browse => {
            println!("{}", browse::HELP);
            let input = BufReader::new(tokio::io::stdin());
            browse::run(Arc::new(client), input, std::io::stdout()).await?;
        }
    }

    Ok(())
}
