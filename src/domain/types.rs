//! Shared domain types.
//!
//! The dataset is a small column store:
//!
//! - `Table`: ordered, equally long columns
//! - `Column`: a name, an inferred `DType`, and its cells
//! - `AnalysisConfig`: everything a run needs, derived from CLI flags

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

use crate::error::AppError;

/// Column type, named the way a dataframe library reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DType {
    Int64,
    Float64,
    Object,
}

impl DType {
    pub fn as_str(self) -> &'static str {
        match self {
            DType::Int64 => "int64",
            DType::Float64 => "float64",
            DType::Object => "object",
        }
    }

    /// Dtype for a numeric column holding only integral values.
    ///
    /// Absent cells force `float64`, matching how integer columns with gaps
    /// are promoted on load.
    pub fn for_integers(values: &[Option<f64>]) -> DType {
        if values.iter().all(Option::is_some) {
            DType::Int64
        } else {
            DType::Float64
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cell storage for one column. `None` is an absent value.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    dtype: DType,
    data: ColumnData,
}

impl Column {
    /// Build a numeric column. `dtype` must be `Int64` or `Float64`.
    pub fn numeric(name: impl Into<String>, dtype: DType, values: Vec<Option<f64>>) -> Self {
        debug_assert!(dtype != DType::Object);
        Self {
            name: name.into(),
            dtype,
            data: ColumnData::Numeric(values),
        }
    }

    pub fn text(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            dtype: DType::Object,
            data: ColumnData::Text(values),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Numeric cells, or `None` for a text column.
    pub fn as_numeric(&self) -> Option<&[Option<f64>]> {
        match &self.data {
            ColumnData::Numeric(v) => Some(v),
            ColumnData::Text(_) => None,
        }
    }

    pub fn is_missing(&self, row: usize) -> bool {
        match &self.data {
            ColumnData::Numeric(v) => v.get(row).is_none_or(Option::is_none),
            ColumnData::Text(v) => v.get(row).is_none_or(Option::is_none),
        }
    }

    pub fn missing_count(&self) -> usize {
        (0..self.len()).filter(|&i| self.is_missing(i)).count()
    }

    pub fn present_count(&self) -> usize {
        self.len() - self.missing_count()
    }

    /// Text form of a cell.
    ///
    /// Integer columns render without a fractional part; float columns always
    /// carry one (`12345.0`), so downstream text parsing sees what a CSV
    /// round-trip of the float column would produce.
    pub fn text_at(&self, row: usize) -> Option<Cow<'_, str>> {
        match &self.data {
            ColumnData::Text(v) => v.get(row)?.as_deref().map(Cow::Borrowed),
            ColumnData::Numeric(v) => {
                let value = (*v.get(row)?)?;
                Some(Cow::Owned(format_number(value, self.dtype)))
            }
        }
    }

    /// Iterate the text form of every cell.
    pub fn texts(&self) -> impl Iterator<Item = Option<Cow<'_, str>>> + '_ {
        (0..self.len()).map(move |i| self.text_at(i))
    }
}

fn format_number(value: f64, dtype: DType) -> String {
    match dtype {
        DType::Int64 => format!("{value:.0}"),
        // Debug formatting keeps the trailing `.0` on integral floats.
        _ => format!("{value:?}"),
    }
}

/// The in-memory dataset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Build a table, rejecting columns of unequal length.
    pub fn new(columns: Vec<Column>) -> Result<Self, AppError> {
        let n_rows = columns.first().map_or(0, Column::len);
        if let Some(bad) = columns.iter().find(|c| c.len() != n_rows) {
            return Err(AppError::analysis(format!(
                "Column `{}` has {} rows, expected {n_rows}.",
                bad.name(),
                bad.len()
            )));
        }
        Ok(Self { columns, n_rows })
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Numeric cells of a column, if it exists and is numeric.
    pub fn numeric(&self, name: &str) -> Option<&[Option<f64>]> {
        self.column(name)?.as_numeric()
    }

    pub fn total_missing(&self) -> usize {
        self.columns.iter().map(Column::missing_count).sum()
    }

    /// Return a copy with `column` appended, replacing any column of the same name.
    pub fn with_column(&self, column: Column) -> Result<Table, AppError> {
        let mut columns = self.columns.clone();
        match columns.iter_mut().find(|c| c.name() == column.name()) {
            Some(slot) => *slot = column,
            None => columns.push(column),
        }
        if self.columns.is_empty() {
            return Table::new(columns);
        }
        if columns.iter().any(|c| c.len() != self.n_rows) {
            return Err(AppError::analysis(format!(
                "Derived column has a different length than the table ({} rows).",
                self.n_rows
            )));
        }
        Ok(Table {
            columns,
            n_rows: self.n_rows,
        })
    }

    /// Return a copy without the named column (unchanged copy if absent).
    pub fn without_column(&self, name: &str) -> Table {
        Table {
            columns: self
                .columns
                .iter()
                .filter(|c| c.name() != name)
                .cloned()
                .collect(),
            n_rows: self.n_rows,
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub csv_path: PathBuf,
    pub output_path: PathBuf,
    /// Upper bound on points drawn in the price/mileage scatter.
    pub sample_size: usize,
    pub seed: u64,
    /// Top-N frequencies printed per categorical column.
    pub top_n: usize,
    pub plot: bool,
    pub plot_width: u32,
    pub plot_height: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(super::DEFAULT_INPUT),
            output_path: PathBuf::from(super::DEFAULT_OUTPUT),
            sample_size: 2000,
            seed: 42,
            top_n: 5,
            plot: true,
            plot_width: 2000,
            plot_height: 1500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::new(vec![
            Column::numeric("price", DType::Float64, vec![Some(1.0), None, Some(3.0)]),
            Column::text(
                "brand",
                vec![Some("Toyota".into()), Some("Honda".into()), None],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_ragged_columns() {
        let err = Table::new(vec![
            Column::numeric("a", DType::Int64, vec![Some(1.0)]),
            Column::numeric("b", DType::Int64, vec![Some(1.0), Some(2.0)]),
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn missing_counts_cover_both_storages() {
        let t = sample_table();
        assert_eq!((t.n_rows(), t.n_cols()), (3, 2));
        assert_eq!(t.column("price").unwrap().missing_count(), 1);
        assert_eq!(t.column("brand").unwrap().missing_count(), 1);
        assert_eq!(t.total_missing(), 2);
    }

    #[test]
    fn float_cells_render_with_decimal_point() {
        let c = Column::numeric("m", DType::Float64, vec![Some(12345.0), Some(1.5)]);
        assert_eq!(c.text_at(0).as_deref(), Some("12345.0"));
        assert_eq!(c.text_at(1).as_deref(), Some("1.5"));

        let c = Column::numeric("m", DType::Int64, vec![Some(12345.0)]);
        assert_eq!(c.text_at(0).as_deref(), Some("12345"));
    }

    #[test]
    fn with_column_copies_and_replaces() {
        let t = sample_table();
        let derived = Column::numeric("x", DType::Int64, vec![Some(1.0), Some(2.0), Some(3.0)]);
        let t2 = t.with_column(derived).unwrap();
        assert_eq!(t.n_cols(), 2);
        assert_eq!(t2.n_cols(), 3);

        let replaced = Column::numeric("x", DType::Float64, vec![None, None, None]);
        let t3 = t2.with_column(replaced).unwrap();
        assert_eq!(t3.n_cols(), 3);
        assert_eq!(t3.column("x").unwrap().missing_count(), 3);

        let short = Column::numeric("y", DType::Int64, vec![Some(1.0)]);
        assert!(t.with_column(short).is_err());
    }

    #[test]
    fn without_column_ignores_unknown_names() {
        let t = sample_table();
        assert_eq!(t.without_column("nope"), t);
        assert_eq!(t.without_column("brand").column_names(), vec!["price"]);
    }
}
