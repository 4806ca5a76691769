use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use anyhow::Context;
use hawk_screener::services::DISPLAY_SIGNALS;
use hawk_screener::{
    normalize_bars, BarSeries, EnrichmentRecord, OpenPosition, RawBar, ScreenerConfig, Screener,
    Side, StaticEnrichment,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn read_json<T: DeserializeOwned>(path: &Path) -> hawk_screener::Result<T> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hawk_screener=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = ScreenerConfig::from_env();
    if let Some(arg) = std::env::args().nth(1) {
        config.bars_path = Some(arg.into());
    }
    let bars_path = config
        .bars_path
        .clone()
        .context("no bar data: pass a path or set SCREENER_BARS_PATH")?;

    // Bars: {"AAPL": [{"date": "2024-06-03", "open": ..., ...}, ...], ...}
    let raw: BTreeMap<String, Vec<RawBar>> = read_json(&bars_path)
        .with_context(|| format!("loading bars from {}", bars_path.display()))?;
    let mut universe: Vec<BarSeries> = Vec::with_capacity(raw.len());
    for (symbol, rows) in &raw {
        match normalize_bars(symbol, rows) {
            Ok(series) => universe.push(series),
            Err(e) => debug!("Skipping {}: {}", symbol, e),
        }
    }
    info!(
        "Loaded {} of {} symbols from {}",
        universe.len(),
        raw.len(),
        bars_path.display()
    );

    let source = match &config.enrichment_path {
        Some(path) => {
            let records: HashMap<String, EnrichmentRecord> = read_json(path)
                .with_context(|| format!("loading enrichment from {}", path.display()))?;
            StaticEnrichment::new(records)
        }
        None => StaticEnrichment::default(),
    };

    let positions: Vec<OpenPosition> = match &config.positions_path {
        Some(path) => read_json(path)
            .with_context(|| format!("loading positions from {}", path.display()))?,
        None => Vec::new(),
    };

    let screener = Screener::new(config, source);
    let report = screener.run(&universe, &positions).await;

    for side in [Side::Long, Side::Short] {
        if !report.has_strong_setups(side) {
            info!("{}: no strong setups", side.label());
        }
        for candidate in report.side(side) {
            info!(
                "{} #{} {} {} [{}]",
                side.label(),
                candidate.rank,
                candidate.symbol,
                candidate.result.score,
                candidate.result.top_signals(DISPLAY_SIGNALS).join(", ")
            );
        }
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
