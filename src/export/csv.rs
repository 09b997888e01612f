//! CSV export of the categorized ledger
//!
//! One row per expense in ledger order: `Date,Expense,Amount,Category`.
//! Categories are resolved against the registry at export time.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{title_case, CategoryRegistry, Ledger};

const HEADER: [&str; 4] = ["Date", "Expense", "Amount", "Category"];

/// Write the ledger as CSV. Returns the number of rows written.
pub fn export_ledger_csv<W: Write>(
    ledger: &Ledger,
    registry: &CategoryRegistry,
    writer: W,
) -> LedgerResult<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADER).map_err(export_error)?;

    let mut rows = 0;
    for (date, entry) in ledger.entries() {
        let category = title_case(registry.categorize(&entry.expense));
        let amount = entry.amount.to_string();
        csv.write_record([date, entry.expense.as_str(), amount.as_str(), category.as_str()])
        .map_err(export_error)?;
        rows += 1;
    }

    csv.flush()?;
    Ok(rows)
}

/// Export to a file, creating or truncating it
pub fn export_ledger_csv_file(
    ledger: &Ledger,
    registry: &CategoryRegistry,
    path: &Path,
) -> LedgerResult<usize> {
    let file = File::create(path)
        .map_err(|e| LedgerError::Export(format!("cannot create {}: {}", path.display(), e)))?;
    let rows = export_ledger_csv(ledger, registry, file)?;
    info!(path = %path.display(), rows, "exported ledger to csv");
    Ok(rows)
}

fn export_error(e: csv::Error) -> LedgerError {
    LedgerError::Export(e.to_string())
}
