use std::collections::BTreeSet;

use regex::RegexBuilder;

use super::model::{CellValue, Table};

// ---------------------------------------------------------------------------
// Column classification
// ---------------------------------------------------------------------------

/// How many distinct values a column may have and still count as a closed
/// enumeration.
pub const DEFAULT_CATEGORICAL_THRESHOLD: usize = 10;

/// The filtering discipline a column gets, re-derived from the current
/// values on every pass (never cached or declared upfront).
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnClass {
    /// Few distinct values: filtered by an inclusion set over the distinct
    /// values (which may include `Null`).
    Categorical(BTreeSet<CellValue>),
    /// All non-null values numeric: filtered by an inclusive range.
    Numeric { min: f64, max: f64 },
    /// Everything else: filtered by substring-or-regex match.
    Text,
    /// Column not present in this table: identity passthrough.
    Absent,
}

/// Classify one column of the table.
///
/// Categorical wins when the distinct-value count is below `threshold`;
/// otherwise numeric when every non-null value is numeric (and at least one
/// exists); otherwise free text.
pub fn classify(table: &Table, column: &str, threshold: usize) -> ColumnClass {
    if !table.columns.iter().any(|c| c == column) {
        return ColumnClass::Absent;
    }

    let distinct = table.distinct_values(column);
    // Cardinality excludes the missing marker; the inclusion menu keeps it.
    let cardinality = distinct.iter().filter(|v| !v.is_null()).count();
    if cardinality < threshold {
        return ColumnClass::Categorical(distinct);
    }

    let mut numeric = Vec::new();
    for value in &distinct {
        if value.is_null() {
            continue;
        }
        match value.as_f64() {
            Some(v) => numeric.push(v),
            None => return ColumnClass::Text,
        }
    }
    if numeric.is_empty() {
        return ColumnClass::Text;
    }

    let min = numeric.iter().copied().fold(f64::INFINITY, f64::min);
    let max = numeric.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    ColumnClass::Numeric { min, max }
}

/// The slider step for a numeric column's range widget.
pub fn range_step(min: f64, max: f64) -> f64 {
    (max - min) / 100.0
}

// ---------------------------------------------------------------------------
// Filter specification
// ---------------------------------------------------------------------------

/// One per-column filter, chosen by the column's [`ColumnClass`].
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnFilter {
    /// Keep rows whose value is in the set (default: all distinct values).
    IncludeSet(BTreeSet<CellValue>),
    /// Keep rows whose numeric value lies in `[lo, hi]` inclusive. When
    /// `lo == hi` this is an equality filter.
    Range { lo: f64, hi: f64 },
    /// Keep rows whose text matches the pattern (substring or regex). An
    /// empty pattern keeps every row; missing values never match.
    Pattern { pattern: String, case_sensitive: bool },
}

/// Apply filters column-by-column in the given order, each pass producing a
/// new table. Composition is a conjunction, so the result is
/// order-independent; iterating keeps later passes cheap on the already
/// narrowed subset.
pub fn apply(table: &Table, filters: &[(String, ColumnFilter)]) -> Table {
    let mut current = table.clone();
    for (column, filter) in filters {
        if !current.columns.iter().any(|c| c == column) {
            // Absent column: identity passthrough.
            continue;
        }
        current = apply_one(&current, column, filter);
    }
    current
}

fn apply_one(table: &Table, column: &str, filter: &ColumnFilter) -> Table {
    match filter {
        ColumnFilter::IncludeSet(selected) => {
            let all = table.distinct_values(column);
            if selected.len() == all.len() && selected == &all {
                // Everything selected: no effective filter.
                return table.clone();
            }
            table.retain_rows(|row| selected.contains(table.cell(row, column)))
        }
        ColumnFilter::Range { lo, hi } => table.retain_rows(|row| {
            table
                .cell(row, column)
                .as_f64()
                .map(|v| *lo <= v && v <= *hi)
                .unwrap_or(false)
        }),
        ColumnFilter::Pattern {
            pattern,
            case_sensitive,
        } => {
            if pattern.is_empty() {
                return table.clone();
            }
            let matcher = compile_pattern(pattern, *case_sensitive);
            table.retain_rows(|row| match table.cell(row, column) {
                CellValue::Null => false,
                other => {
                    // Non-string cells are matched against their display text.
                    match other.as_str() {
                        Some(s) => matcher.is_match(s),
                        None => matcher.is_match(&other.to_string()),
                    }
                }
            })
        }
    }
}

/// Compile the user pattern as a regex; an invalid pattern (commonly a
/// half-typed one) falls back to a literal substring match.
fn compile_pattern(pattern: &str, case_sensitive: bool) -> regex::Regex {
    let compile = |p: &str| {
        RegexBuilder::new(p)
            .case_insensitive(!case_sensitive)
            .build()
    };
    match compile(pattern) {
        Ok(re) => re,
        Err(err) => {
            log::warn!("Pattern '{pattern}' is not valid regex ({err}); matching literally");
            compile(&regex::escape(pattern)).expect("escaped pattern compiles")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;

    fn table(rows: Vec<Vec<(&str, CellValue)>>) -> Table {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for (col, _) in row {
                if !columns.iter().any(|c| c == col) {
                    columns.push(col.to_string());
                }
            }
        }
        let rows = rows
            .into_iter()
            .map(|pairs| {
                pairs
                    .into_iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(k, v)| (k.to_string(), v))
                    .collect::<Row>()
            })
            .collect();
        Table::new(columns, rows)
    }

    fn s(v: &str) -> CellValue {
        CellValue::String(v.into())
    }

    fn projects() -> Table {
        table(vec![
            vec![
                ("title", s("Fraud Detection API")),
                ("kind", s("api")),
                ("score", CellValue::Integer(3)),
            ],
            vec![
                ("title", s("Streaming Pipeline")),
                ("kind", s("batch")),
                ("score", CellValue::Integer(5)),
            ],
            vec![
                ("title", s("fraud dashboard")),
                ("kind", s("web")),
                ("score", CellValue::Integer(4)),
            ],
            vec![("title", CellValue::Null), ("kind", s("api")), ("score", CellValue::Null)],
        ])
    }

    #[test]
    fn classify_low_cardinality_as_categorical() {
        let t = projects();
        match classify(&t, "kind", DEFAULT_CATEGORICAL_THRESHOLD) {
            ColumnClass::Categorical(distinct) => {
                assert_eq!(distinct.len(), 3);
            }
            other => panic!("expected categorical, got {other:?}"),
        }
    }

    #[test]
    fn cardinality_ignores_missing_but_menu_keeps_it() {
        // Nine distinct values plus a missing cell: still categorical, and
        // the inclusion menu offers the missing marker.
        let mut rows: Vec<Vec<(&str, CellValue)>> =
            (0..9).map(|i| vec![("v", CellValue::Integer(i))]).collect();
        rows.push(vec![("v", CellValue::Null)]);
        let t = table(rows);
        match classify(&t, "v", DEFAULT_CATEGORICAL_THRESHOLD) {
            ColumnClass::Categorical(distinct) => {
                assert_eq!(distinct.len(), 10);
                assert!(distinct.contains(&CellValue::Null));
            }
            other => panic!("expected categorical, got {other:?}"),
        }
    }

    #[test]
    fn classify_numeric_when_above_threshold() {
        // Thirteen distinct integers: past the categorical threshold.
        let rows = (0..13)
            .map(|i| vec![("n", CellValue::Integer(i))])
            .collect();
        let t = table(rows);
        match classify(&t, "n", DEFAULT_CATEGORICAL_THRESHOLD) {
            ColumnClass::Numeric { min, max } => {
                assert_eq!(min, 0.0);
                assert_eq!(max, 12.0);
            }
            other => panic!("expected numeric, got {other:?}"),
        }
    }

    #[test]
    fn classify_mixed_values_as_text() {
        let mut rows: Vec<Vec<(&str, CellValue)>> = (0..12)
            .map(|i| vec![("v", CellValue::Integer(i))])
            .collect();
        rows.push(vec![("v", s("n/a"))]);
        let t = table(rows);
        assert_eq!(classify(&t, "v", DEFAULT_CATEGORICAL_THRESHOLD), ColumnClass::Text);
    }

    #[test]
    fn classify_missing_column_as_absent() {
        let t = projects();
        assert_eq!(
            classify(&t, "no_such_column", DEFAULT_CATEGORICAL_THRESHOLD),
            ColumnClass::Absent
        );
    }

    #[test]
    fn include_set_keeps_only_selected_values() {
        let t = projects();
        let selected: BTreeSet<CellValue> = [s("api")].into_iter().collect();
        let filtered = apply(&t, &[("kind".into(), ColumnFilter::IncludeSet(selected))]);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn full_range_is_identity_on_non_missing_rows() {
        let t = projects();
        let filtered = apply(
            &t,
            &[("score".into(), ColumnFilter::Range { lo: 3.0, hi: 5.0 })],
        );
        // The row with a missing score is dropped, the rest survive.
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn collapsed_range_is_an_equality_filter() {
        let t = projects();
        let filtered = apply(
            &t,
            &[("score".into(), ColumnFilter::Range { lo: 4.0, hi: 4.0 })],
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.cell(&filtered.rows[0], "kind"), &s("web"));
    }

    #[test]
    fn pattern_is_case_insensitive_by_default_and_skips_nulls() {
        let t = projects();
        let filtered = apply(
            &t,
            &[(
                "title".into(),
                ColumnFilter::Pattern {
                    pattern: "fraud".into(),
                    case_sensitive: false,
                },
            )],
        );
        assert_eq!(filtered.len(), 2);

        let sensitive = apply(
            &t,
            &[(
                "title".into(),
                ColumnFilter::Pattern {
                    pattern: "fraud".into(),
                    case_sensitive: true,
                },
            )],
        );
        assert_eq!(sensitive.len(), 1);
    }

    #[test]
    fn empty_pattern_keeps_every_row() {
        let t = projects();
        let filtered = apply(
            &t,
            &[(
                "title".into(),
                ColumnFilter::Pattern {
                    pattern: String::new(),
                    case_sensitive: false,
                },
            )],
        );
        assert_eq!(filtered.len(), t.len());
    }

    #[test]
    fn invalid_regex_falls_back_to_substring() {
        let t = table(vec![
            vec![("title", s("price (usd)"))],
            vec![("title", s("price chart"))],
        ]);
        let filtered = apply(
            &t,
            &[(
                "title".into(),
                ColumnFilter::Pattern {
                    pattern: "(usd".into(),
                    case_sensitive: false,
                },
            )],
        );
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn filtering_is_idempotent() {
        let t = projects();
        let spec = vec![
            (
                "kind".into(),
                ColumnFilter::IncludeSet([s("api"), s("web")].into_iter().collect()),
            ),
            ("score".into(), ColumnFilter::Range { lo: 3.0, hi: 4.0 }),
        ];
        let once = apply(&t, &spec);
        let twice = apply(&once, &spec);
        assert_eq!(once.len(), twice.len());
        assert_eq!(once.rows, twice.rows);
    }

    #[test]
    fn filter_order_does_not_change_the_result() {
        let t = projects();
        let by_kind = (
            "kind".to_string(),
            ColumnFilter::IncludeSet([s("api"), s("batch")].into_iter().collect()),
        );
        let by_score = ("score".to_string(), ColumnFilter::Range { lo: 3.0, hi: 5.0 });

        let ab = apply(&t, &[by_kind.clone(), by_score.clone()]);
        let ba = apply(&t, &[by_score, by_kind]);
        assert_eq!(ab.rows, ba.rows);
    }

    #[test]
    fn absent_column_passes_through_unfiltered() {
        let t = projects();
        let filtered = apply(
            &t,
            &[(
                "no_such_column".into(),
                ColumnFilter::Pattern {
                    pattern: "x".into(),
                    case_sensitive: false,
                },
            )],
        );
        assert_eq!(filtered.len(), t.len());
    }
}
