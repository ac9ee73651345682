use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::model::{sniff_cell, Row, Table};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load every `{root}/{course}/{year}/data.csv` for the cartesian product of
/// the selections and concatenate the results in load order.
///
/// Missing files are skipped (logged, not failed). An unparseable file is
/// fatal for that file only: it is logged and the remaining files still
/// load. Returns `Ok(None)` when no file existed for any combination — the
/// "no data" outcome, distinct from `Err`, which is returned only when at
/// least one file failed to parse and nothing loaded at all.
pub fn load_all(root: &Path, courses: &[String], years: &[String]) -> Result<Option<Table>> {
    let mut merged: Option<Table> = None;
    let mut first_error: Option<anyhow::Error> = None;

    for course in courses {
        for year in years {
            let path = dataset_path(root, course, year);
            if !path.exists() {
                log::info!("No dataset at {}, skipping", path.display());
                continue;
            }
            log::info!("Loading {}", path.display());
            match load_csv(&path).with_context(|| format!("loading {}", path.display())) {
                Ok(table) => {
                    merged = Some(match merged {
                        Some(acc) => acc.concat(table),
                        None => table,
                    });
                }
                Err(err) => {
                    log::error!("Skipping unreadable file: {err:#}");
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
            }
        }
    }

    match (merged, first_error) {
        (Some(table), _) => Ok(Some(table)),
        (None, Some(err)) => Err(err),
        (None, None) => Ok(None),
    }
}

/// The storage path for one (course, year) pair.
pub fn dataset_path(root: &Path, course: &str, year: &str) -> PathBuf {
    root.join(course).join(year).join("data.csv")
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse one CSV file: header row gives column names, every cell is
/// type-sniffed. Short records are padded with the missing marker rather
/// than dropped; ragged rows are accepted.
pub fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let mut row = Row::new();
        for (col_idx, header) in headers.iter().enumerate() {
            let cell = sniff_cell(record.get(col_idx).unwrap_or(""));
            if !cell.is_null() {
                row.insert(header.clone(), cell);
            }
        }
        rows.push(row);
    }

    Ok(Table::new(headers, rows))
}

// ---------------------------------------------------------------------------
// CSV re-serialization (download)
// ---------------------------------------------------------------------------

/// Serialize a table back to CSV: UTF-8, comma-delimited, header row, no
/// index column. Missing cells become empty fields.
pub fn to_csv(table: &Table) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&table.columns)
        .context("writing CSV header")?;

    for row in &table.rows {
        let record: Vec<String> = table
            .columns
            .iter()
            .map(|col| table.cell(row, col).to_string())
            .collect();
        writer.write_record(&record).context("writing CSV row")?;
    }

    let bytes = writer.into_inner().context("flushing CSV writer")?;
    String::from_utf8(bytes).context("CSV output was not UTF-8")
}
