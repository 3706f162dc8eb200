//! hs - hadith collection API
//!
//! CLI entry point: runs the HTTP server or queries the data directory directly.

use std::sync::Arc;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::info;

use hadithstore::cli::{Cli, Command, OutputFormat, PageArgs};
use hadithstore::config::Config;
use hadithstore::http::{HttpServer, shutdown_on};
use hadithstore::{CollectionStore, PageResult, QuerySpec, Record};

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .try_init()
        .map_err(|e| eyre::eyre!("{}", e))?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    info!("hadithstore data directory: {}", config.data_dir.display());

    match cli.command {
        Command::Serve { listen } => {
            if let Some(listen) = listen {
                config.server.listen_addr = listen;
            }
            cmd_serve(config).await
        }
        Command::Narrators => {
            let store = CollectionStore::open(&config.data_dir);
            let narrators = store.list_narrators()?;
            if narrators.is_empty() {
                println!("No narrators found");
            } else {
                for narrator in narrators {
                    println!("{}", narrator);
                }
            }
            Ok(())
        }
        Command::List { narrator, page } => {
            let store = CollectionStore::open(&config.data_dir);
            let spec = page_spec(&page);
            let result = store.query(&narrator, &spec)?;
            print_page(&spec, &result, &page.format)
        }
        Command::All { page } => {
            let store = CollectionStore::open(&config.data_dir);
            let spec = page_spec(&page);
            let result = store.query_all(&spec)?;
            print_page(&spec, &result, &page.format)
        }
        Command::Get {
            narrator,
            number,
            format,
        } => {
            let store = CollectionStore::open(&config.data_dir);
            let record = store.fetch_one(&narrator, number.into())?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
                OutputFormat::Text => print_record(&record),
            }
            Ok(())
        }
    }
}

async fn cmd_serve(config: Config) -> Result<()> {
    config.validate()?;

    let store = Arc::new(CollectionStore::open(&config.data_dir));
    let server = HttpServer::new(config, store);

    server.run(shutdown_on(tokio::signal::ctrl_c())).await
}

fn page_spec(args: &PageArgs) -> QuerySpec {
    QuerySpec::clamped(args.page, args.limit, args.query.clone())
}

fn print_page(spec: &QuerySpec, page: &PageResult, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(page)?),
        OutputFormat::Text => {
            for record in &page.items {
                print_record(record);
            }
            println!(
                "{}",
                format!(
                    "page {}/{} ({} matching, {} per page)",
                    spec.page,
                    page.total_pages(spec.limit),
                    page.total_matching,
                    spec.limit
                )
                .dimmed()
            );
        }
    }
    Ok(())
}

fn print_record(record: &Record) {
    println!("{}", format!("#{}", record.number).yellow());
    println!("{}", record.primary_text);
    println!("{}", record.translated_text.cyan());
    println!();
}
