mod cli;
mod config;
mod data;
mod filter;
mod history;
mod llm;
mod render;
mod report;
mod web;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use cli::{Cli, Commands};
use config::settings::{self, Config};
use data::records::{PromiseRecord, RecordStore};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = settings::load_config()?;

    // The one fatal startup condition: no usable API credential.
    cfg.llm.require_api_key()?;

    match cli.command {
        Some(Commands::Serve { port }) => handle_serve(cfg, port).await?,
        Some(Commands::Query { query }) => handle_query(&cfg, &query.join(" ")).await?,
        Some(Commands::Report { query, out }) => {
            handle_report(&cfg, &query.join(" "), out).await?
        }
        Some(Commands::Stats) => handle_stats(&cfg),
        None => {
            if !cli.query.is_empty() {
                let query = cli.query.join(" ");
                handle_query(&cfg, &query).await?;
            } else {
                handle_serve(cfg, 3141).await?;
            }
        }
    }

    Ok(())
}

/// Load the store, degrading a missing or malformed file to an empty table.
fn load_store(cfg: &Config) -> RecordStore {
    match RecordStore::load(&cfg.data.csv_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!(
                "  {} {}",
                "✗".red(),
                format!(
                    "Could not load {}: {}. Continuing with no data.",
                    cfg.data.csv_path.display(),
                    e
                )
                .yellow()
            );
            RecordStore::default()
        }
    }
}

async fn handle_serve(cfg: Config, port: u16) -> Result<()> {
    let store = load_store(&cfg);
    let state = Arc::new(web::AppState::new(store, cfg));
    web::server::start_server(state, port).await
}

async fn handle_query(cfg: &Config, query: &str) -> Result<()> {
    let store = load_store(cfg);
    if store.is_empty() {
        println!("\n  {} {}\n", "●".dimmed(), "No promise data loaded.".dimmed());
        return Ok(());
    }

    let records = filter::filter_records(&store, &cfg.llm, query).await;

    if records.is_empty() {
        println!(
            "\n  {} {}\n",
            "●".dimmed(),
            "No records matched your search criteria.".dimmed()
        );
        return Ok(());
    }

    let title = if query.trim().is_empty() {
        "All promises".to_string()
    } else {
        format!("Query: \"{}\"", query)
    };
    print_header(&title, records.len());
    print_records(&records);

    Ok(())
}

async fn handle_report(cfg: &Config, query: &str, out: Option<PathBuf>) -> Result<()> {
    let store = load_store(cfg);
    let records = filter::filter_records(&store, &cfg.llm, query).await;
    let out_dir = out.unwrap_or_else(|| cfg.data.reports_dir.clone());

    match report::generator::generate(&records, query, &out_dir)? {
        Some(path) => {
            println!(
                "\n  {} {}\n",
                "✓".green(),
                format!("Report written to {}", path.display()).green()
            );
        }
        None => {
            println!(
                "\n  {} {}\n",
                "●".yellow(),
                "No data to generate report for the given query.".yellow()
            );
        }
    }

    Ok(())
}

fn handle_stats(cfg: &Config) {
    let store = load_store(cfg);
    let kpis = store.kpis();

    println!();
    println!(
        "  {} {}  {}",
        "◉".cyan(),
        "Promise status".bold(),
        format!("{} total", kpis.total).dimmed()
    );
    println!("  {}", "─".repeat(40).dimmed());
    println!("  {} late     {}", "│".dimmed(), kpis.late.to_string().red());
    println!("  {} due      {}", "│".dimmed(), kpis.due.to_string().yellow());
    println!("  {} on-time  {}", "│".dimmed(), kpis.on_time.to_string().green());
    println!();
}

// ─── Rich output helpers ────────────────────────────────────

fn print_header(title: &str, count: usize) {
    println!();
    println!(
        "  {} {}  {}",
        "◉".cyan(),
        title.bold(),
        format!("{} records", count).dimmed()
    );
    println!("  {}", "─".repeat(60).dimmed());
}

fn print_records(records: &[PromiseRecord]) {
    for record in records {
        let status = match record.status.as_str() {
            "late" => record.status.red().to_string(),
            "due" => record.status.yellow().to_string(),
            "on-time" => record.status.green().to_string(),
            other => other.dimmed().to_string(),
        };

        println!(
            "  {} {}  {}  due {}  [{}]",
            "│".dimmed(),
            record.city.bold(),
            record.category.blue(),
            record.due_date.format("%Y-%m-%d"),
            status
        );
        println!(
            "  {}   {}",
            "│".dimmed(),
            record.promise_description.dimmed()
        );
    }
    println!();
}
