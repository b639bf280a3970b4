//! Site entry point
//!
//! Parses flags, loads `.env`, picks the analyzer and serves the page.

use anyhow::Context;
use clap::Parser;
use shared::{ProcessId, logging, process_info};

use site::{InMemoryImageStore, Site, SiteArgs, SiteConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = SiteArgs::parse();

    ProcessId::init_site();
    logging::init_tracing_with_level(Some(&args.log_level));
    logging::log_startup(ProcessId::current(), "AXIOME site");

    SiteConfig::load_env();
    let config = SiteConfig::from_args(args).context("Invalid site configuration")?;
    let analyzer = config.analyzer.build().context("Failed to set up the analyzer")?;

    process_info!(
        ProcessId::current(),
        "⚙️ Locale {}, selection policy {}, static files from {}",
        config.default_locale,
        config.selection_policy,
        config.static_dir.display()
    );

    let site = Site::new(&config, analyzer, InMemoryImageStore::new());
    site.run().await.context("Site stopped with an error")?;

    logging::log_success(ProcessId::current(), "Site stopped gracefully");
    Ok(())
}
