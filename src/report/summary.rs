//! Read-only summaries behind the structural, categorical and numerical
//! sections.

use crate::domain::{Column, ColumnData, Table};
use crate::stats::{Describe, describe, value_counts};

/// One column with absent cells.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingEntry {
    pub column: String,
    pub count: usize,
    /// Share of rows, 0–100.
    pub percentage: f64,
}

/// Columns with at least one absent cell, most-missing first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MissingReport {
    pub entries: Vec<MissingEntry>,
}

impl MissingReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<&MissingEntry> {
        self.entries.iter().find(|e| e.column == column)
    }
}

pub fn missing_values(table: &Table) -> MissingReport {
    let rows = table.n_rows();
    let mut entries: Vec<MissingEntry> = table
        .columns()
        .iter()
        .map(|c| (c.name(), c.missing_count()))
        .filter(|&(_, count)| count > 0)
        .map(|(name, count)| MissingEntry {
            column: name.to_string(),
            count,
            percentage: percent(count, rows),
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    MissingReport { entries }
}

/// Cardinality and most frequent values of a categorical column.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalSummary {
    pub column: String,
    pub n_unique: usize,
    pub top: Vec<(String, usize)>,
}

pub fn categorical_summary(column: &Column, top_n: usize) -> CategoricalSummary {
    let mut counts = value_counts(column);
    let n_unique = counts.len();
    counts.truncate(top_n);
    CategoricalSummary {
        column: column.name().to_string(),
        n_unique,
        top: counts,
    }
}

/// Summaries for the wanted columns that exist, in the requested order.
pub fn categorical_summaries(table: &Table, wanted: &[&str], top_n: usize) -> Vec<CategoricalSummary> {
    wanted
        .iter()
        .filter_map(|name| table.column(name))
        .map(|c| categorical_summary(c, top_n))
        .collect()
}

/// How a column of interest is summarized.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericalKind {
    Numeric(Describe),
    /// The column exists but did not parse as numbers.
    Text {
        count: usize,
        unique: usize,
        top: Option<(String, usize)>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumericalSummary {
    pub column: String,
    pub kind: NumericalKind,
}

pub fn numerical_summary(column: &Column) -> NumericalSummary {
    let kind = match column.data() {
        ColumnData::Numeric(values) => NumericalKind::Numeric(describe(values)),
        ColumnData::Text(_) => {
            let counts = value_counts(column);
            NumericalKind::Text {
                count: column.present_count(),
                unique: counts.len(),
                top: counts.into_iter().next(),
            }
        }
    };
    NumericalSummary {
        column: column.name().to_string(),
        kind,
    }
}

pub fn numerical_summaries(table: &Table, wanted: &[&str]) -> Vec<NumericalSummary> {
    wanted
        .iter()
        .filter_map(|name| table.column(name))
        .map(numerical_summary)
        .collect()
}

pub(crate) fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}
