// src/aggregate.rs

use anyhow::Result;
use chrono::Month;
use tracing::{error, info};

use crate::{
    bulletin::{BulletinPage, BulletinRecord},
    extract::{self, TableStrategy},
    fetch::PageSource,
};

/// Every (fiscal year, month) pair, fiscal year major, months in the order
/// given.
pub fn pages(fiscal_years: &[i32], months: &[Month]) -> Vec<BulletinPage> {
    fiscal_years
        .iter()
        .flat_map(|&fy| months.iter().map(move |&m| BulletinPage::new(fy, m)))
        .collect()
}

/// Fetch and extract every page in turn. A page that fails is logged and left
/// out; it never stops the run.
pub async fn aggregate<S: PageSource>(
    source: &S,
    fiscal_years: &[i32],
    months: &[Month],
    strategy: TableStrategy,
) -> Vec<BulletinRecord> {
    let pages = pages(fiscal_years, months);
    let mut records = Vec::with_capacity(pages.len());

    for page in &pages {
        info!(
            fiscal_year = page.fiscal_year,
            month = %page.month_slug(),
            "processing"
        );
        match process_page(source, page, strategy).await {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(e) => {
                error!(
                    "Error parsing data for {}-{}: {:#}",
                    page.fiscal_year,
                    page.month_slug(),
                    e
                );
            }
        }
    }

    info!(
        attempted = pages.len(),
        collected = records.len(),
        "bulletins processed"
    );
    records
}

async fn process_page<S: PageSource>(
    source: &S,
    page: &BulletinPage,
    strategy: TableStrategy,
) -> Result<Option<BulletinRecord>> {
    let html = source.fetch_page(page).await?;
    extract::extract_with(&html, page.month, page.suffix(), strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bulletin::FISCAL_MONTHS, extract::fixtures};
    use anyhow::anyhow;
    use std::{cell::RefCell, collections::HashMap};

    /// Serves canned pages and remembers what was asked for.
    #[derive(Default)]
    struct Fixtures {
        pages: HashMap<BulletinPage, String>,
        requested: RefCell<Vec<BulletinPage>>,
    }

    impl PageSource for Fixtures {
        async fn fetch_page(&self, page: &BulletinPage) -> Result<String> {
            self.requested.borrow_mut().push(*page);
            self.pages
                .get(page)
                .cloned()
                .ok_or_else(|| anyhow!("404 for {:?}", page))
        }
    }

    #[test]
    fn pages_are_fiscal_year_major() {
        let out = pages(&[2020, 2021], &[Month::October, Month::January]);
        let got: Vec<(i32, Month)> = out.iter().map(|p| (p.fiscal_year, p.month)).collect();
        assert_eq!(
            got,
            vec![
                (2020, Month::October),
                (2020, Month::January),
                (2021, Month::October),
                (2021, Month::January),
            ]
        );
    }

    #[tokio::test]
    async fn skips_pages_without_tables() {
        let months = [Month::October, Month::November, Month::December];
        let mut src = Fixtures::default();
        for m in months {
            src.pages.insert(
                BulletinPage::new(2024, m),
                fixtures::page(["C", "01JAN20", "01JAN12"], ["C", "C", "C"]),
            );
        }
        src.pages
            .insert(BulletinPage::new(2024, Month::November), fixtures::two_table_page());

        let records = aggregate(&src, &[2024], &months, TableStrategy::Positional).await;
        assert_eq!(records.len(), months.len() - 1);
        assert_eq!(records[0].release_month, "01Oct23");
        assert_eq!(records[1].release_month, "01Dec23");
        assert_eq!(records[0].eb1_final_action, "01Oct23");
    }

    #[tokio::test]
    async fn fetch_and_parse_errors_are_isolated() {
        let mut src = Fixtures::default();
        src.pages.insert(
            BulletinPage::new(2025, Month::January),
            "<table><tr><td>INDIA</td></tr></table>".repeat(3),
        );
        src.pages.insert(
            BulletinPage::new(2025, Month::February),
            fixtures::page(["01JAN13", "C", "C"], ["C", "C", "C"]),
        );
        src.pages.insert(
            BulletinPage::new(2025, Month::March),
            fixtures::page(["C", "C", "C"], ["C", "C", "C"]).replace("INDIA", "IND"),
        );

        let records = aggregate(&src, &[2025], &FISCAL_MONTHS, TableStrategy::Positional).await;
        assert_eq!(src.requested.borrow().len(), 12);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].release_month, "01Feb25");
        assert_eq!(records[0].eb1_final_action, "01Jan13");
    }
}
