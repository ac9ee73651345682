use thiserror::Error;

use crate::data::model::Table;
use crate::text::FrequencyTable;

// ---------------------------------------------------------------------------
// Chart-data preparation
// ---------------------------------------------------------------------------
//
// Each chart gets its data from one of these functions and each returns an
// explicit Result. The rendering layer decides how to show a failure; a
// broken chart never takes the rest of the dashboard down with it.

#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("column '{0}' is not present in the loaded data")]
    MissingColumn(String),
    #[error("no data to plot for {0}")]
    EmptySeries(&'static str),
}

/// Value counts of one column, descending, ties by first-seen row order.
/// Missing cells are excluded. Drives the top-titles and deployment-type
/// charts.
pub fn top_values(
    table: &Table,
    column: &str,
    n: usize,
    chart: &'static str,
) -> Result<Vec<(String, usize)>, ChartError> {
    if !table.columns.iter().any(|c| c == column) {
        return Err(ChartError::MissingColumn(column.to_string()));
    }

    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in table.column_values(column) {
        if value.is_null() {
            continue;
        }
        let label = value.to_string();
        match counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, c)) => *c += 1,
            None => counts.push((label, 1)),
        }
    }
    if counts.is_empty() {
        return Err(ChartError::EmptySeries(chart));
    }

    // Stable sort keeps first-seen order within equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);
    Ok(counts)
}

/// Head of the token frequency table for the top-words chart.
pub fn top_words(
    freq: &FrequencyTable,
    n: usize,
) -> Result<Vec<(String, usize)>, ChartError> {
    if freq.is_empty() {
        return Err(ChartError::EmptySeries("word frequency"));
    }
    Ok(freq.top(n).to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Row, Table};
    use crate::text::word_frequency;

    fn deployments(values: &[Option<&str>]) -> Table {
        let rows = values
            .iter()
            .map(|v| {
                let mut row = Row::new();
                if let Some(v) = v {
                    row.insert(
                        "Deployment Type".to_string(),
                        CellValue::String(v.to_string()),
                    );
                }
                row
            })
            .collect();
        Table::new(vec!["Deployment Type".into()], rows)
    }

    #[test]
    fn counts_descend_with_first_seen_ties() {
        let t = deployments(&[
            Some("batch"),
            Some("web"),
            Some("batch"),
            Some("stream"),
            Some("web"),
            Some("batch"),
        ]);
        let counts = top_values(&t, "Deployment Type", 10, "deployment").unwrap();
        assert_eq!(
            counts,
            vec![("batch".into(), 3), ("web".into(), 2), ("stream".into(), 1)]
        );
    }

    #[test]
    fn nulls_are_excluded_from_counts() {
        let t = deployments(&[Some("web"), None, Some("web")]);
        let counts = top_values(&t, "Deployment Type", 10, "deployment").unwrap();
        assert_eq!(counts, vec![("web".into(), 2)]);
    }

    #[test]
    fn missing_column_is_an_explicit_error() {
        let t = deployments(&[Some("web")]);
        assert_eq!(
            top_values(&t, "project_title", 10, "titles"),
            Err(ChartError::MissingColumn("project_title".into()))
        );
    }

    #[test]
    fn all_null_column_is_an_empty_series() {
        let t = deployments(&[None, None]);
        assert_eq!(
            top_values(&t, "Deployment Type", 10, "deployment"),
            Err(ChartError::EmptySeries("deployment"))
        );
    }

    #[test]
    fn top_words_errors_on_empty_corpus() {
        let freq = word_frequency(Vec::<String>::new());
        assert_eq!(
            top_words(&freq, 10),
            Err(ChartError::EmptySeries("word frequency"))
        );

        let freq = word_frequency(["ml ml pipeline"]);
        assert_eq!(
            top_words(&freq, 1).unwrap(),
            vec![("ml".into(), 2)]
        );
    }
}
