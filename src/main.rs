use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use dotenvy::dotenv;
use tracing::info;

use stac_title_search::config::{AppConfig, ConfigOverrides};
use stac_title_search::logging::{init_logging, resolve_level};
use stac_title_search::version::extract_version_from_file;
use stac_title_search::{Item, StacClient, TitleScanner};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "stac-title-search",
    version,
    about = "Find STAC items whose title contains a string (client-side scan)"
)]
struct Cli {
    /// Substring to look for in item titles (case-insensitive; empty matches all)
    #[arg(required_unless_present_any = ["show_url", "codemeta"])]
    title: Option<String>,

    /// Only scan this collection id
    #[arg(short, long)]
    collection: Option<String>,

    /// Print progress; repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// STAC API root (env: STAC_CATALOG_URL)
    #[arg(long)]
    catalog_url: Option<String>,

    /// Print matching items as a JSON array
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Log level (error,warn,info,debug,trace); env: STAC_SEARCH_LOG
    #[arg(long)]
    log_level: Option<String>,

    /// Print the version recorded in a codemeta.json file and exit
    #[arg(long, value_name = "PATH")]
    codemeta: Option<PathBuf>,

    /// Print the collections endpoint URL and exit
    #[arg(long, action = ArgAction::SetTrue)]
    show_url: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    init_logging(&resolve_level(cli.log_level.as_deref()))?;

    if let Some(path) = &cli.codemeta {
        println!("{}", extract_version_from_file(path)?);
        return Ok(());
    }

    let cfg = AppConfig::from_overrides(ConfigOverrides {
        catalog_url: cli.catalog_url.clone(),
    })?;
    info!(?cfg, "app config");

    let client = StacClient::with_http_config(&cfg.catalog_url, cfg.http.clone())
        .with_context(|| format!("open catalog {}", cfg.catalog_url))?;
    info!(root=%client.root_url(), "catalog client ready");

    if cli.show_url {
        println!("{}", client.collections_url());
        return Ok(());
    }

    let title = cli.title.unwrap_or_default();
    let mut scanner = TitleScanner::new(&client, cli.verbose);
    let items = scanner.search(&title, cli.collection.as_deref()).await?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &items).context("write json")?;
        writeln!(out)?;
    } else {
        print_items(&mut out, &items)?;
    }
    out.flush()?;
    Ok(())
}

fn print_items(out: &mut impl Write, items: &[Item]) -> io::Result<()> {
    for item in items {
        writeln!(
            out,
            "{}\t{}\t{}",
            item.collection.as_deref().unwrap_or("-"),
            item.id,
            item.title()
        )?;
    }
    Ok(())
}
