//! Narrative findings computed from the cleaned table.

use crate::clean::{CleaningSummary, DerivedColumn};
use crate::domain::{Table, columns};
use crate::report::summary::percent;
use crate::stats::{CorrelationMatrix, Describe, describe, present, skewness, value_counts};

/// Below this share of absent cells the dataset counts as nearly complete.
pub const MINIMAL_MISSING_PCT: f64 = 5.0;

/// Below this absolute skewness a distribution reads as roughly symmetric.
pub const SYMMETRIC_SKEW: f64 = 0.5;

/// The most frequent value of a column and its share of all rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub value: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Insights {
    pub records: usize,
    pub features: usize,
    pub missing_cells: usize,
    pub missing_pct: f64,
    pub price: Option<Describe>,
    pub price_skew: Option<f64>,
    pub top_brand: Option<Share>,
    pub n_brands: Option<usize>,
    pub top_fuel: Option<Share>,
    pub top_currency: Option<Share>,
    /// Correlations with price, strongest first.
    pub price_correlations: Vec<(String, f64)>,
    pub derived: Vec<DerivedColumn>,
}

pub fn compute_insights(table: &Table, cleaning: &CleaningSummary) -> Insights {
    let rows = table.n_rows();
    let missing_cells = table.total_missing();
    let total_cells = rows * table.n_cols();

    let price_values = table.numeric(columns::PRICE);
    let price = price_values.map(describe);
    let price_skew = price_values
        .map(|v| skewness(&present(v)))
        .filter(|s| !s.is_nan());

    let correlations = CorrelationMatrix::from_table(table, &columns::NUMERICAL);

    Insights {
        records: rows,
        features: table.n_cols(),
        missing_cells,
        missing_pct: percent(missing_cells, total_cells),
        price,
        price_skew,
        top_brand: top_share(table, columns::BRAND),
        n_brands: table.column(columns::BRAND).map(|c| value_counts(c).len()),
        top_fuel: top_share(table, columns::FUEL_TYPE),
        top_currency: top_share(table, columns::CURRENCY),
        price_correlations: correlations.ranked_against(columns::PRICE),
        derived: cleaning.derived.clone(),
    }
}

fn top_share(table: &Table, column: &str) -> Option<Share> {
    let (value, count) = value_counts(table.column(column)?).into_iter().next()?;
    Some(Share {
        value,
        count,
        percentage: percent(count, table.n_rows()),
    })
}

/// Plain-language reading of a skewness value.
pub fn skew_phrase(skew: f64) -> &'static str {
    if skew >= SYMMETRIC_SKEW {
        "right-skewed with some high-value outliers"
    } else if skew <= -SYMMETRIC_SKEW {
        "left-skewed with some low-value outliers"
    } else {
        "roughly symmetric"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Column, DType};

    fn text(name: &str, cells: &[Option<&str>]) -> Column {
        Column::text(name, cells.iter().map(|c| c.map(str::to_string)).collect())
    }

    #[test]
    fn insights_from_small_table() {
        let table = Table::new(vec![
            Column::numeric(
                columns::PRICE,
                DType::Float64,
                vec![Some(100.0), Some(200.0), Some(300.0), Some(4000.0)],
            ),
            Column::numeric(
                columns::MODEL_DATE,
                DType::Float64,
                vec![Some(2001.0), Some(2005.0), Some(2010.0), Some(2020.0)],
            ),
            text(columns::BRAND, &[Some("Toyota"), Some("Honda"), Some("Toyota"), None]),
            text(columns::FUEL_TYPE, &[Some("Petrol"); 4]),
        ])
        .unwrap();

        let insights = compute_insights(&table, &CleaningSummary::default());
        assert_eq!(insights.records, 4);
        assert_eq!(insights.features, 4);
        assert_eq!(insights.missing_cells, 1);
        assert!((insights.missing_pct - 6.25).abs() < 1e-12);

        let brand = insights.top_brand.unwrap();
        assert_eq!(brand.value, "Toyota");
        assert_eq!(brand.count, 2);
        assert!((brand.percentage - 50.0).abs() < 1e-12);
        assert_eq!(insights.n_brands, Some(2));

        assert_eq!(insights.top_fuel.unwrap().count, 4);
        assert!(insights.top_currency.is_none());

        assert_eq!(insights.price_correlations.len(), 1);
        assert_eq!(insights.price_correlations[0].0, columns::MODEL_DATE);
        assert!(insights.price_correlations[0].1 > 0.5);
        assert_eq!(skew_phrase(insights.price_skew.unwrap()), "right-skewed with some high-value outliers");
    }

    #[test]
    fn no_price_column_means_no_price_insights() {
        let table = Table::new(vec![text(columns::BRAND, &[Some("Kia")])]).unwrap();
        let insights = compute_insights(&table, &CleaningSummary::default());
        assert!(insights.price.is_none());
        assert!(insights.price_skew.is_none());
        assert!(insights.price_correlations.is_empty());
    }
}
