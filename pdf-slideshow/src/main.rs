use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pdf_slideshow::config::{Args, Config};
use pdf_slideshow::renderer::PdfiumSource;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pdf_slideshow=debug,info")),
        )
        .init();

    let config = Config::try_from(Args::parse()).context("Invalid arguments")?;
    tracing::info!(document = %config.document.display(), mode = ?config.mode, "starting slideshow");

    let source = PdfiumSource::open(&config.document).context("Failed to open document")?;

    pdf_slideshow::app::run(config, source).context("Presentation window failed")?;
    tracing::info!("slideshow closed");
    Ok(())
}
