// src/config.rs

use anyhow::{bail, Context, Result};
use chrono::Month;
use std::{env, path::PathBuf};
use url::Url;

use crate::{bulletin::FISCAL_MONTHS, extract::TableStrategy, fetch::urls::DEFAULT_BASE_URL};

pub const ENV_BASE_URL: &str = "VISA_BULLETIN_BASE_URL";
pub const ENV_FISCAL_YEARS: &str = "VISA_BULLETIN_FISCAL_YEARS";
pub const ENV_OUTPUT: &str = "VISA_BULLETIN_OUTPUT";
pub const ENV_TABLES: &str = "VISA_BULLETIN_TABLES";
pub const ENV_CHART: &str = "VISA_BULLETIN_CHART";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: Url,
    pub fiscal_years: Vec<i32>,
    pub months: Vec<Month>,
    pub output: PathBuf,
    pub strategy: TableStrategy,
    pub chart: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL should parse"),
            fiscal_years: (2020..=2025).collect(),
            months: FISCAL_MONTHS.to_vec(),
            output: PathBuf::from("output.csv"),
            strategy: TableStrategy::Positional,
            chart: true,
        }
    }
}

impl Config {
    /// Defaults, overridden by whichever `VISA_BULLETIN_*` variables are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Config::default();
        if let Some(v) = lookup(ENV_BASE_URL) {
            cfg.base_url =
                Url::parse(v.trim()).with_context(|| format!("parsing {}={}", ENV_BASE_URL, v))?;
        }
        if let Some(v) = lookup(ENV_FISCAL_YEARS) {
            cfg.fiscal_years =
                parse_years(&v).with_context(|| format!("parsing {}={}", ENV_FISCAL_YEARS, v))?;
        }
        if let Some(v) = lookup(ENV_OUTPUT) {
            cfg.output = PathBuf::from(v);
        }
        if let Some(v) = lookup(ENV_TABLES) {
            cfg.strategy = v.parse().with_context(|| format!("parsing {}", ENV_TABLES))?;
        }
        if let Some(v) = lookup(ENV_CHART) {
            cfg.chart = parse_flag(&v).with_context(|| format!("parsing {}={}", ENV_CHART, v))?;
        }
        Ok(cfg)
    }
}

/// `2020..2025` and `2020..=2025` are both inclusive; otherwise a comma list.
fn parse_years(s: &str) -> Result<Vec<i32>> {
    let s = s.trim();
    if let Some((lo, hi)) = s.split_once("..") {
        let hi = hi.strip_prefix('=').unwrap_or(hi);
        let (lo, hi): (i32, i32) = (lo.trim().parse()?, hi.trim().parse()?);
        if lo > hi {
            bail!("empty fiscal year range {}..{}", lo, hi);
        }
        return Ok((lo..=hi).collect());
    }
    let years = s
        .split(',')
        .map(|y| y.trim().parse::<i32>().map_err(Into::into))
        .collect::<Result<Vec<_>>>()?;
    if years.is_empty() {
        bail!("no fiscal years given");
    }
    Ok(years)
}

fn parse_flag(s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got {:?}", other),
    }
}
