// src/extract/tables.rs

use anyhow::{anyhow, bail, Context, Result};
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use std::{ops::Deref, str::FromStr};
use tracing::debug;

/// Header text of the only country column we read.
pub const COUNTRY_COLUMN: &str = "INDIA";

/// 0-indexed rows holding EB1, EB2 and EB3 under the header.
const CATEGORY_ROWS: [usize; 3] = [1, 2, 3];

/// How the final-action and filing tables are located among the valid ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableStrategy {
    /// Third and fourth table with more than two rows.
    #[default]
    Positional,
    /// Match the text preceding each table; falls back to `Positional`.
    Heading,
}

impl FromStr for TableStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "positional" => Ok(TableStrategy::Positional),
            "heading" => Ok(TableStrategy::Heading),
            other => Err(anyhow!("unknown table strategy {:?}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SelectedTables<'a> {
    pub final_action: ElementRef<'a>,
    pub filing: ElementRef<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Heading {
    FinalAction,
    Filing,
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector should parse")
}

/// Tables with more than two `<tr>`, in document order.
pub fn valid_tables(doc: &Html) -> Vec<ElementRef<'_>> {
    let table = selector("table");
    let row = selector("tr");
    doc.select(&table)
        .filter(|t| t.select(&row).count() > 2)
        .collect()
}

/// Picks the final-action and filing tables. `Ok(None)` when the page has
/// fewer than three valid tables.
pub fn select_tables(doc: &Html, strategy: TableStrategy) -> Result<Option<SelectedTables<'_>>> {
    let valid = valid_tables(doc);
    if valid.len() < 3 {
        return Ok(None);
    }

    if strategy == TableStrategy::Heading {
        match tables_by_heading(doc, &valid) {
            (Some(fa), Some(fi)) => {
                debug!(final_action = fa, filing = fi, "tables matched by heading");
                return Ok(Some(SelectedTables {
                    final_action: valid[fa],
                    filing: valid[fi],
                }));
            }
            found => debug!(?found, "heading match incomplete, using table positions"),
        }
    }

    let filing = valid.get(3).copied().with_context(|| {
        format!(
            "filing date table missing: {} tables with more than 2 rows",
            valid.len()
        )
    })?;
    Ok(Some(SelectedTables {
        final_action: valid[2],
        filing,
    }))
}

/// Index (into `valid`) of the first employment final-action table and the
/// first employment filing table, judged by the text since the previous table.
fn tables_by_heading(doc: &Html, valid: &[ElementRef<'_>]) -> (Option<usize>, Option<usize>) {
    let final_action_re =
        Regex::new(r"(?i)final\s+action\s+dates\s+for\s+employment").expect("heading regex");
    let filing_re =
        Regex::new(r"(?i)dates\s+for\s+filing\s+of\s+employment").expect("heading regex");

    let mut context = String::new();
    let mut final_action = None;
    let mut filing = None;

    for node in doc.tree.root().descendants() {
        match node.value() {
            Node::Text(text) if !node.ancestors().any(|a| is_table(a.value())) => {
                context.push_str(text);
                context.push(' ');
            }
            node_value if is_table(node_value) => {
                let pos = valid.iter().position(|t| Deref::deref(t).id() == node.id());
                if let Some(pos) = pos {
                    let fa_end = final_action_re.find_iter(&context).last().map(|m| m.end());
                    let fi_end = filing_re.find_iter(&context).last().map(|m| m.end());
                    let heading = match (fa_end, fi_end) {
                        (Some(a), Some(b)) if a > b => Some(Heading::FinalAction),
                        (Some(_), Some(_)) => Some(Heading::Filing),
                        (Some(_), None) => Some(Heading::FinalAction),
                        (None, Some(_)) => Some(Heading::Filing),
                        (None, None) => None,
                    };
                    match heading {
                        Some(Heading::FinalAction) if final_action.is_none() => {
                            final_action = Some(pos)
                        }
                        Some(Heading::Filing) if filing.is_none() => filing = Some(pos),
                        _ => {}
                    }
                }
                context.clear();
            }
            _ => {}
        }
    }

    (final_action, filing)
}

fn is_table(node: &Node) -> bool {
    node.as_element().is_some_and(|el| el.name() == "table")
}

/// Cell text with non-breaking spaces turned into plain spaces.
pub fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().replace('\u{a0}', " ")
}

/// Position of the `INDIA` header among the `<td>` cells of row 0.
pub fn country_column(table: ElementRef<'_>) -> Result<usize> {
    let row = selector("tr");
    let cell = selector("td");
    let header = table
        .select(&row)
        .next()
        .context("table has no header row")?;
    let headers: Vec<String> = header.select(&cell).map(cell_text).collect();
    match headers.iter().position(|h| h.trim() == COUNTRY_COLUMN) {
        Some(idx) => Ok(idx),
        None => bail!("column {} not found in header {:?}", COUNTRY_COLUMN, headers),
    }
}

/// EB1, EB2 and EB3 cells of the given column.
pub fn category_cells(table: ElementRef<'_>, column: usize) -> Result<[String; 3]> {
    let row = selector("tr");
    let cell = selector("td");
    let rows: Vec<ElementRef<'_>> = table.select(&row).collect();

    let mut out: [String; 3] = Default::default();
    for (slot, &pos) in out.iter_mut().zip(CATEGORY_ROWS.iter()) {
        let tr = rows
            .get(pos)
            .with_context(|| format!("table has {} rows, need row {}", rows.len(), pos + 1))?;
        let td = tr
            .select(&cell)
            .nth(column)
            .with_context(|| format!("row {} has no cell at column {}", pos + 1, column))?;
        *slot = cell_text(td);
    }
    Ok(out)
}
