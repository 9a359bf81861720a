use anyhow::{Context, Result};
use csv::Writer;
use std::io;
use std::path::Path;

use crate::models::{category, Transaction};

const HEADER: [&str; 7] = [
    "id",
    "date",
    "type",
    "category",
    "category_name",
    "description",
    "amount",
];

/// Write every transaction as one CSV row, in stored order. Returns the
/// number of rows written.
pub(crate) fn write_transactions<W: io::Write>(
    transactions: &[Transaction],
    out: W,
) -> Result<usize> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record(HEADER)?;

    for txn in transactions {
        let name = category::by_id(&txn.category, txn.kind).name;
        wtr.write_record([
            txn.id.to_string().as_str(),
            txn.date.to_rfc3339().as_str(),
            txn.kind.as_str(),
            txn.category.as_str(),
            name,
            txn.description.as_str(),
            txn.amount.to_string().as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(transactions.len())
}

pub(crate) fn export_to_path(transactions: &[Transaction], path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    write_transactions(transactions, file)
        .with_context(|| format!("Failed to write export file: {}", path.display()))
}
