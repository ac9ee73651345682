use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the record table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value sniffed from CSV text.
/// Using `BTreeMap` / `BTreeSet` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for range filtering.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Whether this cell is the missing-value marker.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// The string content of a text cell, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Row / Table – the loaded record table
// ---------------------------------------------------------------------------

/// One record (row): column name → cell value. Columns missing from the
/// source file of this row simply have no entry and read back as `Null`.
pub type Row = BTreeMap<String, CellValue>;

/// An ordered collection of rows with a first-seen-ordered column superset.
///
/// Immutable downstream of loading: filtering produces a new `Table`, the
/// original stays intact so re-filtering always starts from the full load.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Column names in first-seen order across all loaded files.
    pub columns: Vec<String>,
    /// All rows, in load order.
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Table { columns, rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row-wise concatenation. Columns become the union of both tables'
    /// columns: `self`'s order first, then `other`'s unseen columns.
    pub fn concat(mut self, other: Table) -> Table {
        for col in other.columns {
            if !self.columns.contains(&col) {
                self.columns.push(col);
            }
        }
        self.rows.extend(other.rows);
        self
    }

    /// Cell lookup; absent entries are the missing marker.
    pub fn cell<'a>(&self, row: &'a Row, column: &str) -> &'a CellValue {
        row.get(column).unwrap_or(&CellValue::Null)
    }

    /// The sorted set of distinct values in a column, including `Null` for
    /// rows where the column is missing or empty.
    ///
    /// Computed fresh on every call: classification and filter menus must
    /// reflect the current table, never a cache from a previous pass.
    pub fn distinct_values(&self, column: &str) -> BTreeSet<CellValue> {
        self.rows
            .iter()
            .map(|row| self.cell(row, column).clone())
            .collect()
    }

    /// All values of one column in row order.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a CellValue> {
        self.rows.iter().map(move |row| self.cell(row, column))
    }

    /// Keep only the rows for which `pred` returns true, as a new table.
    pub fn retain_rows(&self, mut pred: impl FnMut(&Row) -> bool) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|r| pred(r)).cloned().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Cell type sniffing
// ---------------------------------------------------------------------------

/// Infer a typed cell from raw CSV text: i64, then f64, then bool, else
/// string; empty text is the missing marker.
pub fn sniff_cell(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}
