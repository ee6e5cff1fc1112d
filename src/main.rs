use anyhow::Result;
use reqwest::Client;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use visa_bulletin::{aggregate, chart, config::Config, export, fetch::HttpSource};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) configuration ────────────────────────────────────────────
    let cfg = Config::from_env()?;
    info!(
        base = %cfg.base_url,
        years = ?cfg.fiscal_years,
        output = %cfg.output.display(),
        strategy = ?cfg.strategy,
        "configured"
    );

    // ─── 3) fetch + extract every bulletin, one at a time ────────────
    let source = HttpSource::new(Client::new(), cfg.base_url.clone());
    let records =
        aggregate::aggregate(&source, &cfg.fiscal_years, &cfg.months, cfg.strategy).await;
    info!("\n{}", export::pretty_table(&records)?);

    // ─── 4) export ───────────────────────────────────────────────────
    export::write_csv(&records, &cfg.output)?;

    // ─── 5) chart ────────────────────────────────────────────────────
    if cfg.chart {
        chart::show(&records)?;
    }

    info!("all done");
    Ok(())
}
