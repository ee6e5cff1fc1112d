// src/extract/mod.rs

use anyhow::{Context, Result};
use chrono::Month;
use scraper::Html;
use tracing::{instrument, warn};

use crate::bulletin::{page::release_token, BulletinRecord};

pub mod date_parser;
pub mod tables;

pub use tables::TableStrategy;

/// Extract the INDIA employment-based dates from a bulletin page using table
/// positions. `Ok(None)` means the page had no usable tables.
pub fn extract(html: &str, month: Month, suffix: i32) -> Result<Option<BulletinRecord>> {
    extract_with(html, month, suffix, TableStrategy::Positional)
}

#[instrument(level = "debug", skip(html), fields(len = html.len()))]
pub fn extract_with(
    html: &str,
    month: Month,
    suffix: i32,
    strategy: TableStrategy,
) -> Result<Option<BulletinRecord>> {
    let doc = Html::parse_document(html);
    let Some(picked) = tables::select_tables(&doc, strategy)? else {
        warn!(
            "No tables with more than 2 rows found for {} {}.",
            month.name().to_lowercase(),
            suffix
        );
        return Ok(None);
    };

    let fa_col = tables::country_column(picked.final_action).context("final action table")?;
    let fi_col = tables::country_column(picked.filing).context("filing date table")?;
    let [fa1, fa2, fa3] =
        tables::category_cells(picked.final_action, fa_col).context("final action table")?;
    let [fi1, fi2, fi3] =
        tables::category_cells(picked.filing, fi_col).context("filing date table")?;

    let release = release_token(month, suffix);
    let resolve = |raw: String| {
        date_parser::resolve_current(date_parser::normalize_token(&raw), &release)
    };

    Ok(Some(BulletinRecord {
        eb1_final_action: resolve(fa1),
        eb2_final_action: resolve(fa2),
        eb3_final_action: resolve(fa3),
        eb1_filing: resolve(fi1),
        eb2_filing: resolve(fi2),
        eb3_filing: resolve(fi3),
        release_month: release,
    }))
}
