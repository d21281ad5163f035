//! Metric extraction from run-history tables.
//!
//! A run history arrives as a sequence of JSON rows (one per logged step).
//! Columns are heterogeneous: numeric metrics, string labels, and internal
//! bookkeeping columns whose names start with an underscore. This module
//! turns that table into per-metric numeric series.
//!
//! Column dtype follows the upstream tabular semantics: a column holding
//! only integers with no gaps is an integer column, but a single missing
//! entry (or any fractional value) promotes it to float. Only float
//! columns become metrics.

use serde::Serialize;

/// One decoded history row: column name -> logged value.
///
/// `serde_json`'s `preserve_order` feature keeps the keys in the order the
/// tracking service emitted them, which fixes the column order of the
/// extracted series.
pub type HistoryRow = serde_json::Map<String, serde_json::Value>;

/// A named numeric series extracted from one history column.
///
/// `epochs` is a positional index assigned *after* missing values are
/// dropped, not the original row index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSeries {
    pub title: String,
    pub key: String,
    pub data: Vec<f64>,
    pub epochs: Vec<usize>,
}

/// Inferred dtype of a history column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    /// All present values are numeric, and at least one is fractional or
    /// at least one entry is missing.
    Float,
    /// All values present and integral.
    Integer,
    /// At least one non-numeric value (string, bool, array, object).
    NonNumeric,
}

/// Extract metric series from history rows.
///
/// Candidate columns are those whose name does not start with `_` and
/// whose inferred dtype is [`ColumnKind::Float`]. For each candidate, in
/// first-appearance column order, the non-missing values are collected in
/// row order (a missing value is an absent key or JSON `null`).
///
/// A float column with no surviving values still yields a series with
/// empty `data` and `epochs`; a history with no float columns yields an
/// empty vector.
pub fn extract_metrics(rows: &[HistoryRow]) -> Vec<MetricSeries> {
    let mut series = Vec::new();

    for column in column_order(rows) {
        if column.starts_with('_') {
            continue;
        }
        if column_kind(rows, &column) != ColumnKind::Float {
            continue;
        }

        let data: Vec<f64> = rows
            .iter()
            .filter_map(|row| row.get(&column))
            .filter_map(|value| value.as_f64())
            .collect();
        let epochs: Vec<usize> = (0..data.len()).collect();

        series.push(MetricSeries {
            title: column.clone(),
            key: column,
            data,
            epochs,
        });
    }

    series
}

/// Column names in first-appearance order across rows.
fn column_order(rows: &[HistoryRow]) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !order.iter().any(|seen| seen == key) {
                order.push(key.clone());
            }
        }
    }
    order
}

/// Infer the dtype of one column by scanning every row.
fn column_kind(rows: &[HistoryRow], column: &str) -> ColumnKind {
    let mut has_missing = false;
    let mut has_fractional = false;

    for row in rows {
        match row.get(column) {
            None | Some(serde_json::Value::Null) => has_missing = true,
            Some(serde_json::Value::Number(n)) => {
                // serde_json keeps `3` and `3.0` distinct: only values
                // written as integers report `as_i64`/`as_u64`.
                if n.as_i64().is_none() && n.as_u64().is_none() {
                    has_fractional = true;
                }
            }
            Some(_) => return ColumnKind::NonNumeric,
        }
    }

    if has_fractional || has_missing {
        ColumnKind::Float
    } else {
        ColumnKind::Integer
    }
}
