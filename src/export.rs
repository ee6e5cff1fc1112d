// src/export.rs

use anyhow::{Context, Result};
use arrow::{
    array::{ArrayRef, StringArray},
    csv::{ReaderBuilder, WriterBuilder},
    datatypes::{DataType, Field, Schema, SchemaRef},
    record_batch::RecordBatch,
    util::pretty::pretty_format_batches,
};
use std::{fs::File, path::Path, sync::Arc};
use tracing::{info, instrument};

use crate::bulletin::{BulletinRecord, COLUMN_NAMES};

/// Seven Utf8 columns. Dates stay strings end to end.
pub fn bulletin_schema() -> SchemaRef {
    Arc::new(Schema::new(
        COLUMN_NAMES
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ))
}

/// Column-major view of the records, in insertion order.
pub fn to_record_batch(records: &[BulletinRecord]) -> Result<RecordBatch> {
    let columns: Vec<ArrayRef> = (0..COLUMN_NAMES.len())
        .map(|i| {
            let col: StringArray = records.iter().map(|r| Some(r.values()[i])).collect();
            Arc::new(col) as ArrayRef
        })
        .collect();
    RecordBatch::try_new(bulletin_schema(), columns).map_err(Into::into)
}

/// Write all records as one CSV with a header row, replacing `path`.
#[instrument(level = "info", skip(records), fields(rows = records.len()))]
pub fn write_csv(records: &[BulletinRecord], path: &Path) -> Result<()> {
    let batch = to_record_batch(records)?;
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer
        .write(&batch)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), rows = batch.num_rows(), "wrote csv");
    Ok(())
}

/// Read a CSV written by [`write_csv`] back into records.
pub fn read_csv(path: &Path) -> Result<Vec<BulletinRecord>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = ReaderBuilder::new(bulletin_schema())
        .with_header(true)
        .build(file)?;

    let mut out = Vec::new();
    for batch in reader {
        let batch = batch.with_context(|| format!("reading {}", path.display()))?;
        let cols: Vec<&StringArray> = batch
            .columns()
            .iter()
            .map(|c| {
                c.as_any()
                    .downcast_ref::<StringArray>()
                    .context("non-string column")
            })
            .collect::<Result<_>>()?;
        for row in 0..batch.num_rows() {
            let values: [String; 7] = std::array::from_fn(|i| cols[i].value(row).to_string());
            out.push(BulletinRecord::from_values(values));
        }
    }
    Ok(out)
}

/// Table dump for the log.
pub fn pretty_table(records: &[BulletinRecord]) -> Result<String> {
    let batch = to_record_batch(records)?;
    Ok(pretty_format_batches(&[batch])?.to_string())
}
