//! orgtree — application entry point.

mod config;
mod report;

use anyhow::Context;
use clap::Parser;
use orgtree_core::seed::load_seed;
use orgtree_core::{LoadOutcome, NodeRepository, OrgDirectory};
use orgtree_db::{DbManager, MemoryNodeRepository};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::config::{Backend, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let filter = EnvFilter::from_default_env().add_directive("orgtree=info".parse()?);
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::info!(backend = ?config.backend, "Starting orgtree");

    match config.backend {
        Backend::Memory => run(MemoryNodeRepository::new(), &config).await?,
        Backend::Surreal => {
            let manager = DbManager::connect(&config.db_config())
                .await
                .context("failed to connect to SurrealDB")?;
            run(manager.node_repository(), &config).await?;
        }
    }

    tracing::info!("orgtree stopped.");
    Ok(())
}

async fn run<R: NodeRepository>(repo: R, config: &Config) -> anyhow::Result<()> {
    let directory = OrgDirectory::new(repo);

    let outcome = directory
        .initialize_from(|| load_seed(&config.seed))
        .await
        .context("failed to load seed snapshot")?;
    if let LoadOutcome::Loaded { nodes } = outcome {
        tracing::info!(nodes, seed = %config.seed.display(), "Seed snapshot applied");
    }

    let mut stdout = tokio::io::stdout();
    let summary = directory.summary().await?;
    stdout
        .write_all(format!("{}\n", report::render_summary(&summary)).as_bytes())
        .await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"\nEnter an id (0 to exit): ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input == "0" {
            break;
        }

        let output = match input.parse() {
            Ok(id) => match directory.lookup(id).await {
                Ok(lookup) => report::render_lookup(&lookup),
                Err(e) => {
                    tracing::error!(id, error = %e, "Lookup failed");
                    format!("Lookup failed: {e}")
                }
            },
            Err(_) => "Please enter a numeric id.".to_string(),
        };
        stdout.write_all(format!("{output}\n").as_bytes()).await?;
    }

    Ok(())
}
