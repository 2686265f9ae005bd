//! Table-level cleaning.
//!
//! The loaded table is never modified: `clean_table` returns a working copy
//! with the unnamed index column dropped and the derived columns attached.

use tracing::{debug, info, warn};

use crate::clean::normalize::{normalize_engine, normalize_mileage};
use crate::domain::columns;
use crate::domain::{Column, DType, Table};
use crate::error::AppError;

/// Outcome of deriving one numeric column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedColumn {
    pub name: &'static str,
    pub source: &'static str,
    /// Non-absent values produced.
    pub parsed: usize,
    /// Present source cells that did not parse.
    pub failed: usize,
}

/// What the cleaning stage did, for the console report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleaningSummary {
    pub dropped_index: bool,
    pub derived: Vec<DerivedColumn>,
    /// Source columns that were not in the table.
    pub skipped: Vec<&'static str>,
}

struct Derivation {
    name: &'static str,
    source: &'static str,
    parse: fn(Option<&str>) -> Option<i64>,
}

const DERIVATIONS: [Derivation; 2] = [
    Derivation {
        name: columns::MILEAGE_NUMERIC,
        source: columns::MILEAGE_SOURCE,
        parse: normalize_mileage,
    },
    Derivation {
        name: columns::ENGINE_NUMERIC,
        source: columns::ENGINE_SOURCE,
        parse: normalize_engine,
    },
];

/// Derive the working copy used by every later stage.
pub fn clean_table(table: &Table) -> Result<(Table, CleaningSummary), AppError> {
    let mut summary = CleaningSummary::default();

    let mut clean = if table.has_column(columns::UNNAMED_INDEX) {
        summary.dropped_index = true;
        info!("removed unnamed index column");
        table.without_column(columns::UNNAMED_INDEX)
    } else {
        table.clone()
    };

    for derivation in &DERIVATIONS {
        let Some(source) = clean.column(derivation.source) else {
            warn!(
                column = derivation.source,
                "source column missing, skipping {}", derivation.name
            );
            summary.skipped.push(derivation.source);
            continue;
        };

        let (column, result) = derive(source, derivation);
        debug!(
            column = result.name,
            parsed = result.parsed,
            failed = result.failed,
            "derived numeric column"
        );
        summary.derived.push(result);
        clean = clean.with_column(column)?;
    }

    Ok((clean, summary))
}

fn derive(source: &Column, derivation: &Derivation) -> (Column, DerivedColumn) {
    let mut failed = 0usize;
    let values: Vec<Option<f64>> = source
        .texts()
        .map(|text| {
            let parsed = (derivation.parse)(text.as_deref());
            if text.is_some() && parsed.is_none() {
                failed += 1;
            }
            parsed.map(|v| v as f64)
        })
        .collect();

    let parsed = values.iter().flatten().count();
    let dtype = DType::for_integers(&values);
    (
        Column::numeric(derivation.name, dtype, values),
        DerivedColumn {
            name: derivation.name,
            source: derivation.source,
            parsed,
            failed,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(name: &str, cells: &[Option<&str>]) -> Column {
        Column::text(name, cells.iter().map(|c| c.map(str::to_string)).collect())
    }

    #[test]
    fn derives_both_columns_without_touching_input() {
        let table = Table::new(vec![
            Column::numeric(columns::UNNAMED_INDEX, DType::Int64, vec![Some(0.0), Some(1.0), Some(2.0)]),
            text(columns::MILEAGE_SOURCE, &[Some("12,345 km"), Some("n/a km"), None]),
            text(columns::ENGINE_SOURCE, &[Some("1500cc"), Some("1000 cc"), Some("electric")]),
        ])
        .unwrap();

        let (clean, summary) = clean_table(&table).unwrap();

        assert_eq!(table.n_cols(), 3);
        assert!(summary.dropped_index);
        assert!(!clean.has_column(columns::UNNAMED_INDEX));

        let mileage = clean.numeric(columns::MILEAGE_NUMERIC).unwrap();
        assert_eq!(mileage, &[Some(12345.0), None, None]);
        assert_eq!(clean.column(columns::MILEAGE_NUMERIC).unwrap().dtype(), DType::Float64);

        let engine = clean.numeric(columns::ENGINE_NUMERIC).unwrap();
        assert_eq!(engine, &[Some(1500.0), Some(1000.0), None]);

        assert_eq!(
            summary.derived[0],
            DerivedColumn {
                name: columns::MILEAGE_NUMERIC,
                source: columns::MILEAGE_SOURCE,
                parsed: 1,
                failed: 1,
            }
        );
        assert_eq!(summary.derived[1].failed, 1);
    }

    #[test]
    fn missing_sources_are_skipped() {
        let table = Table::new(vec![text("brand", &[Some("Toyota")])]).unwrap();
        let (clean, summary) = clean_table(&table).unwrap();
        assert_eq!(clean, table);
        assert_eq!(
            summary.skipped,
            vec![columns::MILEAGE_SOURCE, columns::ENGINE_SOURCE]
        );
    }

    #[test]
    fn numeric_source_uses_text_form() {
        // A float mileage column renders as `12345.0`, which is not an integer.
        let table = Table::new(vec![Column::numeric(
            columns::MILEAGE_SOURCE,
            DType::Float64,
            vec![Some(12345.0), None],
        )])
        .unwrap();
        let (clean, _) = clean_table(&table).unwrap();
        assert_eq!(clean.numeric(columns::MILEAGE_NUMERIC).unwrap(), &[None, None]);

        let table = Table::new(vec![Column::numeric(
            columns::MILEAGE_SOURCE,
            DType::Int64,
            vec![Some(12345.0)],
        )])
        .unwrap();
        let (clean, _) = clean_table(&table).unwrap();
        assert_eq!(clean.numeric(columns::MILEAGE_NUMERIC).unwrap(), &[Some(12345.0)]);
    }
}
