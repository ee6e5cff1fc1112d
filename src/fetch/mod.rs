// src/fetch/mod.rs

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::bulletin::BulletinPage;

pub mod urls;

/// Anything that can hand back the raw HTML of a bulletin page.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn fetch_page(&self, page: &BulletinPage) -> Result<String>;
}

/// Fetches bulletins over HTTP. One GET per page, no retry.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base: Url,
}

impl HttpSource {
    pub fn new(client: Client, base: Url) -> Self {
        Self { client, base }
    }
}

impl PageSource for HttpSource {
    async fn fetch_page(&self, page: &BulletinPage) -> Result<String> {
        let url = urls::bulletin_url(&self.base, page)?;
        get_text(&self.client, &url).await
    }
}

async fn get_text(client: &Client, url: &Url) -> Result<String> {
    debug!("Fetching text from {}", url);
    client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Non-success status {}", url))?
        .text()
        .await
        .with_context(|| format!("Reading text from {}", url))
}
