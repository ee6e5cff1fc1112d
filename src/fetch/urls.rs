// src/fetch/urls.rs
use anyhow::{anyhow, Result};
use url::Url;

use crate::bulletin::BulletinPage;

/// Index of all published bulletins, one directory per fiscal year.
pub static DEFAULT_BASE_URL: &str =
    "https://travel.state.gov/content/travel/en/legal/visa-law0/visa-bulletin";

/// `{base}/{fiscal_year}/visa-bulletin-for-{month}-{suffix}.html`
pub fn bulletin_url(base: &Url, page: &BulletinPage) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| anyhow!("base URL {} cannot carry a path", base))?
        .pop_if_empty()
        .push(&page.fiscal_year.to_string())
        .push(&format!(
            "visa-bulletin-for-{}-{}.html",
            page.month_slug(),
            page.suffix()
        ));
    Ok(url)
}
