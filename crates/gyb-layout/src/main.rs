// Layout CLI entry point.
//
// Usage: gyb-layout <request.json> [sponsors.csv]
//
// 1. Initialize tracing (stderr; stdout carries the JSON result)
// 2. Load engine config (config/engine.toml, seeded from defaults/)
// 3. Load the render request, optionally replacing its sponsors with a CSV export
// 4. Render and print the layout as JSON

use gyb_layout::config;
use gyb_layout::import;
use gyb_layout::LayoutEngine;

use anyhow::{bail, Context};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

const USAGE: &str = "usage: gyb-layout <request.json> [sponsors.csv]";

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (request_path, csv_path) = match args.as_slice() {
        [request] => (PathBuf::from(request), None),
        [request, csv] => (PathBuf::from(request), Some(PathBuf::from(csv))),
        _ => bail!(USAGE),
    };

    let config = config::load_config().context("failed to load engine configuration")?;

    let mut request = import::load_request(&request_path)
        .with_context(|| format!("failed to load request {}", request_path.display()))?;
    if let Some(csv_path) = csv_path {
        request.sponsors = import::load_sponsors_csv(&csv_path)
            .with_context(|| format!("failed to load sponsors {}", csv_path.display()))?;
        info!(
            "Loaded {} sponsors from {}",
            request.sponsors.len(),
            csv_path.display()
        );
    }

    let engine = LayoutEngine::new(config);
    let layout = engine.render(&request.sponsors, &request.layout, request.container);
    info!(
        "Rendered {:?} layout: {} placed, {} positions available",
        layout.strategy,
        layout.placed.len(),
        layout.available_positions.len()
    );
    if layout.is_empty() {
        info!("No sponsors yet");
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &layout).context("failed to write layout")?;
    writeln!(out)?;
    Ok(())
}

/// Initialize tracing on stderr so stdout stays machine-readable.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gyb_layout=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
