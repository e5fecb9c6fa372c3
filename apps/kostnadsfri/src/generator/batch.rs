//! CSV batch input.
//!
//! Header row required: `companyName,industry,website,contactEmail,contactName`.
//! Only `companyName` has to be present; other columns may be missing or blank.

use std::io::Read;

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

use crate::generator::PageDetails;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CsvRow {
    company_name: String,
    industry: String,
    website: String,
    contact_email: String,
    contact_name: String,
}

/// One usable line of the batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRow {
    /// 1-based line the record starts on, header included.
    pub line: u64,
    pub company_name: String,
    pub details: PageDetails,
}

/// A record that could not be read. The rest of the file is still usable.
#[derive(Debug, Error)]
#[error("Invalid CSV row on line {line}: {source}")]
pub struct RowError {
    pub line: u64,
    source: csv::Error,
}

/// Everything read from a batch file, in file order.
#[derive(Debug)]
pub struct BatchInput {
    pub rows: Vec<Result<BatchRow, RowError>>,
    /// Rows dropped for having a blank company name.
    pub skipped: usize,
}

/// Reads all records. A malformed record becomes an `Err` entry; only a broken
/// header or an I/O failure aborts the whole read.
pub fn read_rows<R: Read>(input: R) -> Result<BatchInput> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);

    let headers = reader
        .byte_headers()
        .context("Failed to read CSV header row")?
        .clone();

    let mut rows = Vec::new();
    let mut skipped = 0;

    for record in reader.byte_records() {
        let record = match record {
            Ok(record) => record,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                return Err(e).context("Failed to read batch file");
            }
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                rows.push(Err(RowError { line, source: e }));
                continue;
            }
        };

        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row: CsvRow = match record.deserialize(Some(&headers)) {
            Ok(row) => row,
            Err(source) => {
                rows.push(Err(RowError { line, source }));
                continue;
            }
        };

        if row.company_name.is_empty() {
            skipped += 1;
            continue;
        }

        rows.push(Ok(BatchRow {
            line,
            company_name: row.company_name,
            details: PageDetails {
                industry: non_empty(row.industry),
                website: non_empty(row.website),
                contact_email: non_empty(row.contact_email),
                contact_name: non_empty(row.contact_name),
            },
        }));
    }

    Ok(BatchInput { rows, skipped })
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
